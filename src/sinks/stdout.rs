//! Line-per-update sink on standard output.

use std::io::{self, Write};

use super::DisplaySink;
use crate::error::SinkError;

/// Writes each composed bar as one line, for status-line pipes.
pub struct StdoutSink<W: Write + Send + 'static = io::Stdout> {
    out: Option<W>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send + 'static> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out: Some(out) }
    }
}

impl<W: Write + Send + 'static> DisplaySink for StdoutSink<W> {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn set_title(&mut self, title: &str) -> Result<(), SinkError> {
        let out = self.out.as_mut().ok_or(SinkError::Closed)?;
        writeln!(out, "{title}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let out = self.out.as_mut().ok_or(SinkError::Closed)?;
        out.flush().map_err(|e| SinkError::Flush(e.to_string()))
    }

    fn close(&mut self) {
        if let Some(mut out) = self.out.take() {
            let _ = out.flush();
        }
    }
}
