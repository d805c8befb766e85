//! Battery capacity and charge status from the power-supply class in sysfs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{BATTERY_MARKER, Source};
use crate::error::SourceError;
use crate::text::SectionText;

/// Default sysfs directory of the first battery.
pub const DEFAULT_BATTERY_DIR: &str = "/sys/class/power_supply/BAT0";

/// Renders `[NN% STATUS]`, or `[Battery?]` when the battery cannot be read.
#[derive(Debug, Clone)]
pub struct BatterySource {
    capacity: PathBuf,
    status: PathBuf,
}

impl BatterySource {
    pub fn new() -> Self {
        Self::from_dir(DEFAULT_BATTERY_DIR)
    }

    /// Reads `capacity` and `status` from a power-supply directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::with_paths(dir.join("capacity"), dir.join("status"))
    }

    pub fn with_paths(capacity: impl Into<PathBuf>, status: impl Into<PathBuf>) -> Self {
        Self {
            capacity: capacity.into(),
            status: status.into(),
        }
    }
}

impl Default for BatterySource {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_trimmed(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map(|s| s.trim().to_string())
        .map_err(|error| SourceError::Read {
            path: path.to_path_buf(),
            error,
        })
}

#[async_trait]
impl Source for BatterySource {
    fn name(&self) -> &str {
        "battery"
    }

    async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError> {
        let capacity = read_trimmed(&self.capacity).await?;
        if capacity.is_empty() {
            return Err(SourceError::Empty(self.capacity.display().to_string()));
        }
        let status = read_trimmed(&self.status).await?;
        let line = format!("{capacity}% {status}");
        Ok(SectionText::bracketed(line.trim_end(), max_chars))
    }

    fn fallback(&self) -> &'static str {
        BATTERY_MARKER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ERROR_MARKER;

    fn battery_dir(capacity: &str, status: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("capacity"), capacity).unwrap();
        std::fs::write(dir.path().join("status"), status).unwrap();
        dir
    }

    #[tokio::test]
    async fn renders_capacity_and_status() {
        let dir = battery_dir("87\n", "Discharging\n");
        let src = BatterySource::from_dir(dir.path());
        assert_eq!(src.read(64).await.text().as_str(), "[87% Discharging]");
    }

    #[tokio::test]
    async fn missing_battery_has_distinct_marker() {
        let dir = tempfile::tempdir().unwrap();
        let src = BatterySource::from_dir(dir.path().join("BAT9"));
        let reading = src.read(64).await;
        assert!(reading.is_fallback());
        assert_eq!(reading.text().as_str(), BATTERY_MARKER);
        assert_ne!(reading.text().as_str(), ERROR_MARKER);
    }

    #[tokio::test]
    async fn empty_capacity_is_treated_as_absent() {
        let dir = battery_dir("", "Unknown\n");
        let src = BatterySource::from_dir(dir.path());
        assert_eq!(src.read(64).await.text().as_str(), BATTERY_MARKER);
    }

    #[tokio::test]
    async fn empty_status_leaves_no_trailing_space() {
        let dir = battery_dir("100\n", "");
        let src = BatterySource::from_dir(dir.path());
        assert_eq!(src.read(64).await.text().as_str(), "[100%]");
    }
}
