//! External text queries.
//!
//! [`Query`] is the seam between a source and the outside world: the real
//! implementation is [`CommandQuery`], tests plug in scripted ones.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::SourceError;
use crate::text::SectionText;

/// One external query returning text on standard output.
#[async_trait]
pub trait Query: Send + Sync + 'static {
    /// Short description used in error messages (usually the program name).
    fn label(&self) -> &str;

    /// Runs the query and returns its raw standard output.
    async fn output(&self) -> Result<String, SourceError>;
}

/// Runs a program and captures its standard output.
///
/// The child is killed if the returned future is dropped, so a cancelled
/// section worker does not leave it running.
#[derive(Debug, Clone)]
pub struct CommandQuery {
    program: String,
    args: Vec<String>,
}

impl CommandQuery {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Query for CommandQuery {
    fn label(&self) -> &str {
        &self.program
    }

    async fn output(&self) -> Result<String, SourceError> {
        let out = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|error| SourceError::Launch {
                program: self.program.clone(),
                error,
            })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(SourceError::Status {
                program: self.program.clone(),
                status: out.status,
                stderr: stderr.lines().next().unwrap_or_default().to_string(),
            });
        }

        String::from_utf8(out.stdout).map_err(|_| SourceError::Encoding(self.program.clone()))
    }
}

/// Shared rendering of single-line tool output: first line, bracketed.
///
/// Blank output is an error so the section shows a placeholder instead of `[]`.
pub(crate) fn bracket_first_line(
    raw: &str,
    label: &str,
    max_chars: usize,
) -> Result<SectionText, SourceError> {
    let line = raw.split('\n').next().unwrap_or_default();
    if line.trim().is_empty() {
        return Err(SourceError::Empty(label.to_string()));
    }
    Ok(SectionText::bracketed(line, max_chars))
}
