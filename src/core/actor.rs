//! # SectionActor: the worker of one section.
//!
//! Each section runs in its own actor, independent of every other section.
//!
//! ## Architecture
//! ```text
//! SectionSpec ──► Supervisor ──► SectionActor::run()
//!
//! loop {
//!   ├─► cancelled? ─────────────────────► exit (no final read/publish)
//!   ├─► source.read(max) ◄─ raced with cancellation (dropped read kills its child)
//!   ├─► store.write(slot, text)
//!   ├─► publish SectionUpdated / SourceFallback
//!   ├─► compositor.publish()  (sink errors are reported, not fatal)
//!   └─► sleep(interval)      ◄─ raced with cancellation
//! }
//! ```
//!
//! ## Rules
//! - Only this actor writes its slot.
//! - A failed read stores the placeholder; the next tick is the retry.
//! - Ticks never overlap within one actor; a slow source only delays itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::core::compositor::Compositor;
use crate::core::store::SlotStore;
use crate::events::{Bus, Event, EventKind};
use crate::section::SectionSpec;
use crate::sources::{Reading, SourceRef};

/// Why an actor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorExit {
    /// Cancellation observed at a safe point.
    Cancelled,
}

/// Drives one section: read, store, publish, sleep.
pub struct SectionActor {
    /// Position of the section (also its slot index).
    pub slot: usize,
    /// Source of the section text.
    pub source: SourceRef,
    /// Time between the end of one tick and the start of the next.
    pub interval: Duration,
    /// Maximum width of the section text.
    pub max_chars: usize,
    pub store: Arc<SlotStore>,
    pub compositor: Arc<Compositor>,
    pub bus: Bus,
}

impl SectionActor {
    pub fn new(
        slot: usize,
        spec: &SectionSpec,
        max_chars: usize,
        store: Arc<SlotStore>,
        compositor: Arc<Compositor>,
        bus: Bus,
    ) -> Self {
        Self {
            slot,
            source: Arc::clone(spec.source()),
            interval: spec.interval(),
            max_chars,
            store,
            compositor,
            bus,
        }
    }

    /// Runs until `token` is cancelled.
    pub async fn run(self, token: CancellationToken) -> ActorExit {
        self.bus.publish(self.event(EventKind::SectionStarted));

        loop {
            if token.is_cancelled() {
                break;
            }

            let reading = select! {
                biased;
                _ = token.cancelled() => break,
                reading = self.source.read(self.max_chars) => reading,
            };
            self.tick(reading).await;

            let sleep = time::sleep(self.interval);
            tokio::pin!(sleep);
            select! {
                biased;
                _ = token.cancelled() => break,
                _ = &mut sleep => {}
            }
        }

        self.bus.publish(self.event(EventKind::SectionStopped));
        ActorExit::Cancelled
    }

    /// Stores one reading and asks the compositor to publish.
    async fn tick(&self, reading: Reading) {
        let event = match &reading {
            Reading::Fresh(text) => self
                .event(EventKind::SectionUpdated)
                .with_text(text.as_str()),
            Reading::Fallback { text, error } => self
                .event(EventKind::SourceFallback)
                .with_text(text.as_str())
                .with_reason(error.to_string()),
        };

        self.store.write(self.slot, reading.into_text()).await;
        self.bus.publish(event);

        // Failures are already on the bus as PublishFailed.
        let _ = self.compositor.publish().await;
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_section(self.source.name())
            .with_slot(self.slot)
    }
}
