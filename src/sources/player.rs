//! Media player title, via `playerctl`.

use async_trait::async_trait;

use super::command::{CommandQuery, Query, bracket_first_line};
use super::Source;
use crate::error::SourceError;
use crate::text::SectionText;

/// Current track title, e.g. `[My Song]`.
///
/// No running player makes `playerctl` exit non-zero, which renders as `[Error]`.
pub struct PlayerSource {
    query: Box<dyn Query>,
}

impl PlayerSource {
    /// Queries `playerctl metadata title`.
    pub fn new() -> Self {
        Self::with_query(CommandQuery::new("playerctl", ["metadata", "title"]))
    }

    /// Uses a custom query (another player tool, or a scripted one in tests).
    pub fn with_query(query: impl Query) -> Self {
        Self {
            query: Box::new(query),
        }
    }
}

impl Default for PlayerSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for PlayerSource {
    fn name(&self) -> &str {
        "player"
    }

    async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError> {
        let raw = self.query.output().await?;
        bracket_first_line(&raw, self.query.label(), max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ERROR_MARKER;

    struct Scripted(Result<&'static str, ()>);

    #[async_trait]
    impl Query for Scripted {
        fn label(&self) -> &str {
            "scripted"
        }

        async fn output(&self) -> Result<String, SourceError> {
            match self.0 {
                Ok(out) => Ok(out.to_string()),
                Err(()) => Err(SourceError::Launch {
                    program: "playerctl".into(),
                    error: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            }
        }
    }

    #[tokio::test]
    async fn title_is_bracketed_without_newline() {
        let src = PlayerSource::with_query(Scripted(Ok("My Song\n")));
        assert_eq!(src.read(64).await.text().as_str(), "[My Song]");
    }

    #[tokio::test]
    async fn launch_failure_renders_error_marker() {
        let src = PlayerSource::with_query(Scripted(Err(())));
        let reading = src.read(64).await;
        assert!(reading.is_fallback());
        assert_eq!(reading.text().as_str(), ERROR_MARKER);
    }

    #[tokio::test]
    async fn empty_title_renders_error_marker() {
        let src = PlayerSource::with_query(Scripted(Ok("")));
        assert_eq!(src.read(64).await.text().as_str(), ERROR_MARKER);
    }

    #[tokio::test]
    async fn overlong_title_is_truncated() {
        let long: &'static str = Box::leak("t".repeat(300).into_boxed_str());
        let src = PlayerSource::with_query(Scripted(Ok(long)));
        let text = src.read(64).await.into_text();
        assert_eq!(text.char_len(), 64);
    }
}
