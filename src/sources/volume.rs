//! Output volume, via `pulsemixer`.

use async_trait::async_trait;

use super::command::{CommandQuery, Query, bracket_first_line};
use super::Source;
use crate::error::SourceError;
use crate::text::SectionText;

/// Current output level as printed by the mixer, e.g. `[50 50]`.
pub struct VolumeSource {
    query: Box<dyn Query>,
}

impl VolumeSource {
    /// Queries `pulsemixer --get-volume`.
    pub fn new() -> Self {
        Self::with_query(CommandQuery::new("pulsemixer", ["--get-volume"]))
    }

    pub fn with_query(query: impl Query) -> Self {
        Self {
            query: Box::new(query),
        }
    }
}

impl Default for VolumeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for VolumeSource {
    fn name(&self) -> &str {
        "volume"
    }

    async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError> {
        let raw = self.query.output().await?;
        bracket_first_line(&raw, self.query.label(), max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl Query for Fixed {
        fn label(&self) -> &str {
            "fixed"
        }

        async fn output(&self) -> Result<String, SourceError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn stereo_levels_are_kept_verbatim() {
        let src = VolumeSource::with_query(Fixed("50 50\n"));
        assert_eq!(src.read(64).await.text().as_str(), "[50 50]");
    }

    #[tokio::test]
    async fn only_first_line_is_used() {
        let src = VolumeSource::with_query(Fixed("30 30\nwarning: something\n"));
        assert_eq!(src.read(64).await.text().as_str(), "[30 30]");
    }
}
