//! Error types used by the rootbar runtime, its sources and its sinks.
//!
//! This module defines four error enums:
//!
//! - [`RuntimeError`]: fatal failures of the runtime itself (startup or signal wiring).
//! - [`SourceError`]: a single read of a section source failed; always recovered locally.
//! - [`SinkError`]: the display sink rejected a title or could not be reached.
//! - [`ConfigError`]: the bar configuration is unusable.
//!
//! Every type provides `as_label` for logs and event payloads.

use std::path::PathBuf;

use thiserror::Error;

/// # Errors produced by the rootbar runtime.
///
/// All of them are fatal: the bar cannot run without a display connection
/// or without a way to observe termination signals.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The display sink could not be opened at startup.
    #[error("failed to open display: {0}")]
    Display(#[source] SinkError),

    /// Termination signal handlers could not be registered.
    #[error("failed to register signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    /// Configuration rejected at startup.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use rootbar::RuntimeError;
    ///
    /// let err = RuntimeError::Signal(std::io::Error::other("no signal driver"));
    /// assert_eq!(err.as_label(), "runtime_signal");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Display(_) => "runtime_display",
            RuntimeError::Signal(_) => "runtime_signal",
            RuntimeError::Config(_) => "runtime_config",
        }
    }
}

/// # Errors produced while reading one section source.
///
/// None of these ever reach a worker: [`Source::read`](crate::Source::read)
/// turns them into the source's placeholder text.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SourceError {
    /// The external program could not be started.
    #[error("failed to launch `{program}`: {error}")]
    Launch {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The external program ran but reported failure.
    #[error("`{program}` exited with {status}: {stderr}")]
    Status {
        /// Program name.
        program: String,
        /// Exit status as printed by the OS.
        status: std::process::ExitStatus,
        /// First line of standard error, if any.
        stderr: String,
    },

    /// A file backing the source could not be read.
    #[error("failed to read {path}: {error}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Output was not valid UTF-8.
    #[error("non UTF-8 output from {0}")]
    Encoding(String),

    /// The source produced nothing to show.
    #[error("empty output from {0}")]
    Empty(String),

    /// A format pattern could not be rendered.
    #[error("invalid format pattern {0:?}")]
    Format(String),
}

impl SourceError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SourceError::Launch { .. } => "source_launch",
            SourceError::Status { .. } => "source_status",
            SourceError::Read { .. } => "source_read",
            SourceError::Encoding(_) => "source_encoding",
            SourceError::Empty(_) => "source_empty",
            SourceError::Format(_) => "source_format",
        }
    }
}

/// # Errors produced by display sinks.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// Connecting to the display failed.
    #[error("connect: {0}")]
    Connect(String),

    /// Writing the title failed.
    #[error("write: {0}")]
    Write(String),

    /// Flushing pending requests failed.
    #[error("flush: {0}")]
    Flush(String),

    /// The sink was already closed.
    #[error("sink closed")]
    Closed,
}

impl SinkError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Connect(_) => "sink_connect",
            SinkError::Write(_) => "sink_write",
            SinkError::Flush(_) => "sink_flush",
            SinkError::Closed => "sink_closed",
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Write(err.to_string())
    }
}

/// # Errors produced while loading or validating [`BarConfig`](crate::BarConfig).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {error}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The config file is not valid TOML for [`BarConfig`](crate::BarConfig).
    #[error("failed to parse {path}: {error}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Parser error.
        #[source]
        error: toml::de::Error,
    },

    /// No sections configured.
    #[error("no sections configured")]
    NoSections,

    /// A section has a zero refresh interval.
    #[error("section {index} has a zero refresh interval")]
    ZeroInterval {
        /// Position of the offending section.
        index: usize,
    },

    /// A clock pattern contains an invalid strftime item.
    #[error("invalid clock format {0:?}")]
    ClockFormat(String),

    /// Section width too small to hold brackets plus one character.
    #[error("section width {0} is below the minimum of 3")]
    WidthTooSmall(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(SourceError::Empty("playerctl".into()).as_label(), "source_empty");
        assert_eq!(SinkError::Closed.as_label(), "sink_closed");
        assert_eq!(
            RuntimeError::Config(ConfigError::NoSections).as_label(),
            "runtime_config"
        );
    }

    #[test]
    fn config_error_is_transparent() {
        let err = RuntimeError::from(ConfigError::ZeroInterval { index: 2 });
        assert_eq!(err.to_string(), "section 2 has a zero refresh interval");
    }
}
