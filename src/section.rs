//! # Section specification.
//!
//! A [`SectionSpec`] pairs a [`Source`](crate::Source) with its refresh
//! interval. The ordered list of specs handed to the
//! [`Supervisor`](crate::Supervisor) is the section set: its order is the
//! display order and neither order nor length change while the bar runs.

use std::sync::Arc;
use std::time::Duration;

use crate::sources::{Source, SourceRef};

/// How one section is produced and how often.
#[derive(Clone)]
pub struct SectionSpec {
    source: SourceRef,
    interval: Duration,
}

impl SectionSpec {
    /// Creates a section from a shared source.
    pub fn new(source: SourceRef, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Creates a section, taking ownership of the source.
    ///
    /// ```
    /// use std::time::Duration;
    /// use rootbar::{ClockSource, SectionSpec};
    ///
    /// let spec = SectionSpec::from_source(ClockSource::new(), Duration::from_secs(1));
    /// assert_eq!(spec.name(), "clock");
    /// ```
    pub fn from_source(source: impl Source, interval: Duration) -> Self {
        Self::new(Arc::new(source), interval)
    }

    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    /// Convenience: returns the source name.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl std::fmt::Debug for SectionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionSpec")
            .field("name", &self.name())
            .field("interval", &self.interval)
            .finish()
    }
}
