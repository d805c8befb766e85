//! # Section sources.
//!
//! A [`Source`] produces the current display text of one section. Sources
//! never fail towards their caller: [`Source::read`] converts every
//! [`SourceError`] into the source's placeholder text, so a section worker
//! keeps ticking no matter what the external tool does.
//!
//! ## Built-in sources
//! | Source            | Backing collaborator                          | Placeholder  |
//! |-------------------|-----------------------------------------------|--------------|
//! | [`PlayerSource`]  | `playerctl metadata title`                    | `[Error]`    |
//! | [`ClockSource`]   | local system clock                            | `[Error]`    |
//! | [`VolumeSource`]  | `pulsemixer --get-volume`                     | `[Error]`    |
//! | [`BatterySource`] | `/sys/class/power_supply/BAT0/{capacity,status}` | `[Battery?]` |

mod battery;
mod clock;
mod command;
mod player;
mod volume;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::text::SectionText;

pub use battery::{BatterySource, DEFAULT_BATTERY_DIR};
pub use clock::{ClockSource, DEFAULT_CLOCK_FORMAT};
pub use command::{CommandQuery, Query};
pub use player::PlayerSource;
pub use volume::VolumeSource;

/// Placeholder shown when a source fails transiently.
pub const ERROR_MARKER: &str = "[Error]";

/// Placeholder shown when no battery can be read.
pub const BATTERY_MARKER: &str = "[Battery?]";

/// Result of one read: real content or the placeholder that replaced it.
#[derive(Debug)]
pub enum Reading {
    /// Content produced by the source.
    Fresh(SectionText),
    /// The source failed; `text` is its placeholder.
    Fallback {
        /// Placeholder text to display.
        text: SectionText,
        /// Why the source failed.
        error: SourceError,
    },
}

impl Reading {
    /// Text to store in the section slot.
    pub fn text(&self) -> &SectionText {
        match self {
            Reading::Fresh(text) | Reading::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> SectionText {
        match self {
            Reading::Fresh(text) | Reading::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reading::Fallback { .. })
    }
}

/// # Producer of one section's display text.
///
/// Implementors only write [`fetch`](Source::fetch); the provided
/// [`read`](Source::read) is what section workers call.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use rootbar::{SectionText, Source, SourceError};
///
/// struct Hostname;
///
/// #[async_trait]
/// impl Source for Hostname {
///     fn name(&self) -> &str { "hostname" }
///
///     async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError> {
///         Ok(SectionText::bracketed("box", max_chars))
///     }
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync + 'static {
    /// Stable, human-readable section name used in events and logs.
    fn name(&self) -> &str;

    /// Produces fresh text, at most `max_chars` characters wide.
    async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError>;

    /// Placeholder stored when [`fetch`](Source::fetch) fails.
    fn fallback(&self) -> &'static str {
        ERROR_MARKER
    }

    /// Reads the source; never fails.
    async fn read(&self, max_chars: usize) -> Reading {
        match self.fetch(max_chars).await {
            Ok(text) => Reading::Fresh(text),
            Err(error) => Reading::Fallback {
                text: placeholder(self.fallback(), max_chars),
                error,
            },
        }
    }
}

/// Bounds a bracketed marker like a real reading, keeping both brackets.
fn placeholder(marker: &str, max_chars: usize) -> SectionText {
    match marker.strip_prefix('[').and_then(|m| m.strip_suffix(']')) {
        Some(inner) => SectionText::bracketed(inner, max_chars),
        None => SectionText::new(marker, max_chars),
    }
}

/// Shared handle to a source.
pub type SourceRef = std::sync::Arc<dyn Source>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    #[async_trait]
    impl Source for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch(&self, _max_chars: usize) -> Result<SectionText, SourceError> {
            Err(SourceError::Empty("broken".into()))
        }
    }

    #[tokio::test]
    async fn read_replaces_failure_with_placeholder() {
        let reading = Broken.read(64).await;
        assert!(reading.is_fallback());
        assert_eq!(reading.text().as_str(), ERROR_MARKER);
    }

    #[tokio::test]
    async fn placeholder_is_bounded_too() {
        let reading = Broken.read(3).await;
        assert_eq!(reading.into_text().as_str(), "[E]");
    }

    #[test]
    fn placeholders_keep_their_brackets() {
        assert_eq!(placeholder(BATTERY_MARKER, 64).as_str(), BATTERY_MARKER);
        assert_eq!(placeholder(BATTERY_MARKER, 5).as_str(), "[Bat]");
        assert_eq!(placeholder("n/a", 2).as_str(), "n/");
    }
}
