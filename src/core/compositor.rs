//! # Compositor: slot snapshot → one title → display sink.
//!
//! Every section actor calls [`Compositor::publish`] after writing its slot.
//! Publishes are serialized by one mutex that guards both the sink and the
//! scratch buffer; the slot snapshot is taken while holding it, so the most
//! recent publish always reflects the most recent writes.
//!
//! ```text
//! publish():
//!   lock(sink, scratch)
//!     ├─► store.read_all()            (per-slot snapshot)
//!     ├─► scratch = concat(texts)     (slot order, no separator)
//!     ├─► sink.set_title(scratch) + sink.flush()
//!     │      ├─ Ok  ─► BarPublished
//!     │      └─ Err ─► PublishFailed (worker keeps running)
//!   unlock
//! ```
//!
//! ## Rules
//! - The sink is closed **exactly once**: by [`Compositor::close`] or, failing that, on drop.
//! - Publishing after close returns [`SinkError::Closed`] and touches nothing.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::store::SlotStore;
use crate::error::SinkError;
use crate::events::{Bus, Event, EventKind};
use crate::sinks::DisplaySink;
use crate::text::SectionText;

struct Output {
    sink: Option<Box<dyn DisplaySink>>,
    scratch: String,
}

/// Composes the bar and forwards it to the display sink.
pub struct Compositor {
    store: Arc<SlotStore>,
    bus: Bus,
    output: Mutex<Output>,
}

/// Concatenates section texts in order, without separators.
///
/// ```
/// use rootbar::{SectionText, compose};
///
/// let texts: Vec<SectionText> = ["[A]", "[B]"].iter().map(|s| SectionText::new(s, 64)).collect();
/// assert_eq!(compose(&texts), "[A][B]");
/// ```
pub fn compose(texts: &[SectionText]) -> String {
    let mut out = String::new();
    compose_into(texts, &mut out);
    out
}

fn compose_into(texts: &[SectionText], buf: &mut String) {
    buf.clear();
    buf.reserve(texts.iter().map(|t| t.as_str().len()).sum());
    for text in texts {
        buf.push_str(text.as_str());
    }
}

impl Compositor {
    pub fn new(store: Arc<SlotStore>, sink: Box<dyn DisplaySink>, bus: Bus) -> Self {
        Self {
            store,
            bus,
            output: Mutex::new(Output {
                sink: Some(sink),
                scratch: String::new(),
            }),
        }
    }

    /// Composes the current slots and forwards the result to the sink.
    ///
    /// Returns the published bar.
    pub async fn publish(&self) -> Result<String, SinkError> {
        let mut output = self.output.lock().await;
        let Output { sink, scratch } = &mut *output;
        let Some(sink) = sink.as_mut() else {
            return Err(SinkError::Closed);
        };

        let snapshot = self.store.read_all().await;
        compose_into(&snapshot, scratch);

        match sink.set_title(scratch).and_then(|()| sink.flush()) {
            Ok(()) => {
                let bar = std::mem::take(scratch);
                self.bus
                    .publish(Event::new(EventKind::BarPublished).with_text(bar.as_str()));
                Ok(bar)
            }
            Err(e) => {
                self.bus.publish(
                    Event::new(EventKind::PublishFailed)
                        .with_reason(format!("{}: {e}", sink.name())),
                );
                Err(e)
            }
        }
    }

    /// Closes the sink. Returns `false` if it was already closed.
    pub async fn close(&self) -> bool {
        let mut output = self.output.lock().await;
        Self::close_output(&mut output, &self.bus)
    }

    /// True until [`close`](Self::close) has run.
    pub async fn is_open(&self) -> bool {
        self.output.lock().await.sink.is_some()
    }

    fn close_output(output: &mut Output, bus: &Bus) -> bool {
        output.scratch.clear();
        match output.sink.take() {
            Some(mut sink) => {
                sink.close();
                bus.publish(Event::new(EventKind::SinkClosed));
                true
            }
            None => false,
        }
    }
}

impl Drop for Compositor {
    fn drop(&mut self) {
        Self::close_output(self.output.get_mut(), &self.bus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MemorySink, MemorySinkHandle};

    fn setup(slots: &[&str]) -> (Arc<SlotStore>, Compositor, MemorySinkHandle, Bus) {
        let store = Arc::new(SlotStore::new(slots.len()));
        let (sink, handle) = MemorySink::new();
        let bus = Bus::new(64);
        let comp = Compositor::new(Arc::clone(&store), Box::new(sink), bus.clone());
        (store, comp, handle, bus)
    }

    async fn fill(store: &SlotStore, texts: &[&str]) {
        for (i, t) in texts.iter().enumerate() {
            store.write(i, SectionText::new(t, 64)).await;
        }
    }

    #[tokio::test]
    async fn concatenates_in_slot_order_without_separator() {
        let texts = ["[A]", "[B]", "[C]", "[D]"];
        let (store, comp, handle, _bus) = setup(&texts);
        fill(&store, &texts).await;

        assert_eq!(comp.publish().await.unwrap(), "[A][B][C][D]");
        assert_eq!(handle.last_title().as_deref(), Some("[A][B][C][D]"));
        assert_eq!(handle.flushes(), 1);
    }

    #[tokio::test]
    async fn composing_twice_is_identical() {
        let texts = ["[A]", "[B]"];
        let (store, comp, handle, _bus) = setup(&texts);
        fill(&store, &texts).await;

        let first = comp.publish().await.unwrap();
        let second = comp.publish().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(handle.titles(), vec![first.clone(), first]);
    }

    #[tokio::test]
    async fn shorter_bar_does_not_inherit_old_content() {
        let (store, comp, handle, _bus) = setup(&["", ""]);
        fill(&store, &["[a long title]", "[x]"]).await;
        comp.publish().await.unwrap();

        store.write(0, SectionText::new("[s]", 64)).await;
        comp.publish().await.unwrap();
        assert_eq!(handle.last_title().as_deref(), Some("[s][x]"));
    }

    #[tokio::test]
    async fn unwritten_slots_contribute_nothing() {
        let (store, comp, _handle, _bus) = setup(&["", "", ""]);
        store.write(1, SectionText::new("[clock]", 64)).await;
        assert_eq!(comp.publish().await.unwrap(), "[clock]");
    }

    #[tokio::test]
    async fn sink_failure_is_reported_not_fatal() {
        let (store, comp, handle, bus) = setup(&["[A]"]);
        let mut rx = bus.subscribe();
        fill(&store, &["[A]"]).await;

        handle.fail_next(1);
        assert!(comp.publish().await.is_err());
        assert_eq!(rx.recv().await.unwrap().kind, EventKind::PublishFailed);

        assert_eq!(comp.publish().await.unwrap(), "[A]");
    }

    #[tokio::test]
    async fn close_happens_once() {
        let (_store, comp, handle, _bus) = setup(&["[A]"]);
        assert!(comp.is_open().await);
        assert!(comp.close().await);
        assert!(!comp.close().await);
        assert!(matches!(comp.publish().await, Err(SinkError::Closed)));
        drop(comp);
        assert_eq!(handle.closes(), 1);
    }

    #[tokio::test]
    async fn drop_closes_unclosed_sink() {
        let (_store, comp, handle, _bus) = setup(&["[A]"]);
        drop(comp);
        assert_eq!(handle.closes(), 1);
    }
}
