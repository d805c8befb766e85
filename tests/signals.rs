#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use rootbar::{BarConfig, MemorySink, SectionSpec, SectionText, Source, SourceError, Supervisor};

/// Wakes the test on its first read, so signal handlers are known to be installed.
struct Announcing(Arc<Notify>);

#[async_trait]
impl Source for Announcing {
    fn name(&self) -> &str {
        "announcing"
    }

    async fn fetch(&self, max_chars: usize) -> Result<SectionText, SourceError> {
        self.0.notify_one();
        Ok(SectionText::bracketed("up", max_chars))
    }
}

#[tokio::test]
async fn sigterm_stops_the_bar_and_closes_the_sink() {
    let started = Arc::new(Notify::new());
    let (sink, handle) = MemorySink::new();
    let section = SectionSpec::from_source(
        Announcing(Arc::clone(&started)),
        Duration::from_millis(100),
    );
    let sup = Supervisor::builder(BarConfig::default())
        .with_sections(vec![section])
        .build(Box::new(sink))
        .unwrap();

    let run = tokio::spawn(sup.run());
    started.notified().await;

    let status = std::process::Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("bar did not stop on SIGTERM")
        .unwrap()
        .unwrap();

    assert_eq!(handle.closes(), 1);
    assert_eq!(handle.last_title().as_deref(), Some("[up]"));
}
