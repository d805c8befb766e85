//! Local wall clock.

use std::fmt::Write as _;

use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDateTime};

use super::Source;
use crate::error::SourceError;
use crate::text::SectionText;

/// Default clock pattern: `[05. 01. 2024 - 13:07:22]`.
pub const DEFAULT_CLOCK_FORMAT: &str = "[%d. %m. %Y - %H:%M:%S]";

/// Formats the current local time with a strftime pattern.
///
/// The pattern carries its own brackets.
#[derive(Debug, Clone)]
pub struct ClockSource {
    format: String,
}

impl ClockSource {
    pub fn new() -> Self {
        Self {
            format: DEFAULT_CLOCK_FORMAT.to_string(),
        }
    }

    /// Uses a custom strftime pattern. See [`ClockSource::is_valid_format`].
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// True if every item of `format` is a known strftime specifier.
    pub fn is_valid_format(format: &str) -> bool {
        !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
    }

    /// Renders a given instant.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rootbar::ClockSource;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(13, 7, 22).unwrap();
    /// let text = ClockSource::new().render_at(at, 64).unwrap();
    /// assert_eq!(text.as_str(), "[05. 01. 2024 - 13:07:22]");
    /// ```
    pub fn render_at(&self, at: NaiveDateTime, max_chars: usize) -> Result<SectionText, SourceError> {
        let mut out = String::with_capacity(self.format.len() + 16);
        write!(out, "{}", at.format(&self.format))
            .map_err(|_| SourceError::Format(self.format.clone()))?;
        Ok(SectionText::new(&out, max_chars))
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for ClockSource {
    fn name(&self) -> &str {
        "clock"
    }

    async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError> {
        self.render_at(Local::now().naive_local(), max_chars)
    }
}
