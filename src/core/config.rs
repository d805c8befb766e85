//! # Bar configuration.
//!
//! [`BarConfig`] holds everything the supervisor needs: the ordered section
//! list and runtime knobs. [`BarConfig::default`] is the compiled-in bar:
//!
//! | Slot | Source  | Interval |
//! |------|---------|----------|
//! | 0    | player  | 5s       |
//! | 1    | clock   | 1s       |
//! | 2    | volume  | 1s       |
//! | 3    | battery | 60s      |
//!
//! The same structure can be loaded from TOML:
//! ```toml
//! grace = 1.0
//! section_max_chars = 64
//!
//! [[section]]
//! kind = "clock"
//! interval = 1
//! format = "[%H:%M]"
//!
//! [[section]]
//! kind = "battery"
//! interval = 60
//! path = "/sys/class/power_supply/BAT1"
//! ```
//!
//! ## Sentinel values
//! - `grace = 0` → workers that have not exited immediately after cancellation are aborted
//! - `bus_capacity` is clamped to at least 1 by the bus

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::section::SectionSpec;
use crate::sources::{
    BatterySource, ClockSource, CommandQuery, PlayerSource, SourceRef, VolumeSource,
};
use crate::text::DEFAULT_SECTION_MAX_CHARS;

/// Smallest usable section width: two brackets plus one character.
pub const MIN_SECTION_CHARS: usize = 3;

/// Global configuration of the bar.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Maximum time to wait for section workers after cancellation before aborting them.
    #[serde(deserialize_with = "seconds")]
    pub grace: Duration,

    /// Capacity of the event bus ring buffer.
    pub bus_capacity: usize,

    /// Maximum width of every section, in characters.
    pub section_max_chars: usize,

    /// Sections in display order.
    #[serde(rename = "section")]
    pub sections: Vec<SectionConfig>,
}

/// One configured section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SectionConfig {
    /// What produces the text.
    #[serde(flatten)]
    pub source: SourceKind,

    /// Refresh interval.
    #[serde(deserialize_with = "seconds")]
    pub interval: Duration,
}

/// Built-in source kinds and their optional overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceKind {
    /// Track title. `command` replaces `playerctl metadata title`.
    Player {
        #[serde(default)]
        command: Option<Vec<String>>,
    },
    /// Local time. `format` is a strftime pattern.
    Clock {
        #[serde(default)]
        format: Option<String>,
    },
    /// Output volume. `command` replaces `pulsemixer --get-volume`.
    Volume {
        #[serde(default)]
        command: Option<Vec<String>>,
    },
    /// Battery. `path` is a power-supply directory holding `capacity` and `status`.
    Battery {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl SourceKind {
    /// Instantiates the source.
    pub fn build(&self) -> SourceRef {
        match self {
            SourceKind::Player { command } => match command_query(command) {
                Some(q) => Arc::new(PlayerSource::with_query(q)),
                None => Arc::new(PlayerSource::new()),
            },
            SourceKind::Clock { format } => match format {
                Some(f) => Arc::new(ClockSource::with_format(f.clone())),
                None => Arc::new(ClockSource::new()),
            },
            SourceKind::Volume { command } => match command_query(command) {
                Some(q) => Arc::new(VolumeSource::with_query(q)),
                None => Arc::new(VolumeSource::new()),
            },
            SourceKind::Battery { path } => match path {
                Some(dir) => Arc::new(BatterySource::from_dir(dir)),
                None => Arc::new(BatterySource::new()),
            },
        }
    }
}

fn command_query(command: &Option<Vec<String>>) -> Option<CommandQuery> {
    let (program, args) = command.as_deref()?.split_first()?;
    Some(CommandQuery::new(program.clone(), args.iter().cloned()))
}

impl SectionConfig {
    pub fn new(source: SourceKind, interval: Duration) -> Self {
        Self { source, interval }
    }
}

impl BarConfig {
    /// Loads a TOML file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        let cfg: BarConfig = toml::from_str(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks invariants the runtime relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        if self.section_max_chars < MIN_SECTION_CHARS {
            return Err(ConfigError::WidthTooSmall(self.section_max_chars));
        }
        for (index, section) in self.sections.iter().enumerate() {
            if section.interval.is_zero() {
                return Err(ConfigError::ZeroInterval { index });
            }
            if let SourceKind::Clock {
                format: Some(format),
            } = &section.source
            {
                if !ClockSource::is_valid_format(format) {
                    return Err(ConfigError::ClockFormat(format.clone()));
                }
            }
        }
        Ok(())
    }

    /// Builds the ordered section set.
    pub fn section_specs(&self) -> Vec<SectionSpec> {
        self.sections
            .iter()
            .map(|s| SectionSpec::new(s.source.build(), s.interval))
            .collect()
    }

    /// Upper bound of the composed bar length, in characters.
    #[inline]
    pub fn bar_max_chars(&self) -> usize {
        self.sections.len() * self.section_max_chars
    }
}

impl Default for BarConfig {
    /// Default configuration:
    ///
    /// - player / clock / volume / battery at 5s / 1s / 1s / 60s
    /// - `section_max_chars = 64`
    /// - `grace = 1s`
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(1),
            bus_capacity: 256,
            section_max_chars: DEFAULT_SECTION_MAX_CHARS,
            sections: vec![
                SectionConfig::new(SourceKind::Player { command: None }, Duration::from_secs(5)),
                SectionConfig::new(SourceKind::Clock { format: None }, Duration::from_secs(1)),
                SectionConfig::new(SourceKind::Volume { command: None }, Duration::from_secs(1)),
                SectionConfig::new(SourceKind::Battery { path: None }, Duration::from_secs(60)),
            ],
        }
    }
}

/// Deserializes a non-negative number of seconds (integer or fractional).
fn seconds<'de, D>(de: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(de)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_bar() {
        let cfg = BarConfig::default();
        cfg.validate().unwrap();
        let names: Vec<String> = cfg
            .section_specs()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["player", "clock", "volume", "battery"]);
        let intervals: Vec<u64> = cfg.sections.iter().map(|s| s.interval.as_secs()).collect();
        assert_eq!(intervals, [5, 1, 1, 60]);
        assert_eq!(cfg.bar_max_chars(), 256);
    }

    #[test]
    fn parses_toml_sections_in_order() {
        let cfg: BarConfig = toml::from_str(
            r#"
            grace = 0.5

            [[section]]
            kind = "volume"
            interval = 2
            command = ["amixer-wrapper", "--percent"]

            [[section]]
            kind = "clock"
            interval = 0.25
            format = "[%H:%M]"
            "#,
        )
        .unwrap();
        cfg.validate().unwrap();

        assert_eq!(cfg.grace, Duration::from_millis(500));
        assert_eq!(cfg.section_max_chars, DEFAULT_SECTION_MAX_CHARS);
        assert_eq!(
            cfg.sections,
            vec![
                SectionConfig::new(
                    SourceKind::Volume {
                        command: Some(vec!["amixer-wrapper".into(), "--percent".into()])
                    },
                    Duration::from_secs(2)
                ),
                SectionConfig::new(
                    SourceKind::Clock {
                        format: Some("[%H:%M]".into())
                    },
                    Duration::from_millis(250)
                ),
            ]
        );
    }

    #[test]
    fn rejects_zero_interval() {
        let mut cfg = BarConfig::default();
        cfg.sections[2].interval = Duration::ZERO;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroInterval { index: 2 })
        ));
    }

    #[test]
    fn rejects_empty_and_narrow_bars() {
        let mut cfg = BarConfig::default();
        cfg.section_max_chars = 2;
        assert!(matches!(cfg.validate(), Err(ConfigError::WidthTooSmall(2))));

        cfg.sections.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::NoSections)));
    }

    #[test]
    fn rejects_bad_clock_format() {
        let cfg = BarConfig {
            sections: vec![SectionConfig::new(
                SourceKind::Clock {
                    format: Some("%Q".into()),
                },
                Duration::from_secs(1),
            )],
            ..BarConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ClockFormat(_))));
    }

    #[test]
    fn negative_seconds_do_not_parse() {
        let res: Result<BarConfig, _> = toml::from_str("grace = -1.0");
        assert!(res.is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = BarConfig::load("/nonexistent/rootbar.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.toml");
        std::fs::write(&path, "[[section]]\nkind = \"battery\"\ninterval = 60\n").unwrap();
        let cfg = BarConfig::load(&path).unwrap();
        assert_eq!(cfg.sections.len(), 1);
    }
}
