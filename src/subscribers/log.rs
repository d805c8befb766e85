//! # LogWriter: runtime events as `tracing` records
//!
//! Routine per-tick events go to `debug`, lifecycle to `info`, anything that
//! replaced real content or lost data to `warn`.
//!
//! ## Example output (`RUST_LOG=rootbar=debug`)
//! ```text
//! DEBUG rootbar: section started section="clock" slot=1
//! DEBUG rootbar: section updated section="clock" slot=1 text="[05. 01. 2024 - 13:07:22]"
//!  WARN rootbar: source fallback section="player" slot=0 text="[Error]" reason="failed to launch `playerctl`: ..."
//!  INFO rootbar: shutdown requested
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let section = e.section.as_deref().unwrap_or("-");
        let text = e.text.as_deref().unwrap_or("");
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::SectionStarted => {
                debug!(section, slot = ?e.slot, "section started");
            }
            EventKind::SectionUpdated => {
                debug!(section, slot = ?e.slot, text, "section updated");
            }
            EventKind::SourceFallback => {
                warn!(section, slot = ?e.slot, text, reason, "source fallback");
            }
            EventKind::SectionDead => {
                error!(section, slot = ?e.slot, reason, "section worker panicked");
            }
            EventKind::SectionStopped => {
                debug!(section, slot = ?e.slot, "section stopped");
            }
            EventKind::BarPublished => {
                debug!(bar = text, "bar published");
            }
            EventKind::PublishFailed => {
                warn!(reason, "publish failed");
            }
            EventKind::SinkClosed => {
                info!("display sink closed");
            }
            EventKind::ShutdownRequested => {
                info!("shutdown requested");
            }
            EventKind::AllStoppedWithin => {
                info!("all sections stopped within grace");
            }
            EventKind::GraceExceeded => {
                warn!(reason, "grace exceeded, aborting sections");
            }
            EventKind::SubscriberOverflow => {
                warn!(subscriber = section, reason, "subscriber dropped event");
            }
            EventKind::SubscriberPanicked => {
                warn!(subscriber = section, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }

    fn queue_capacity(&self) -> usize {
        1024
    }
}
