//! # Runtime event bus.
//!
//! Section actors, the compositor and the supervisor all report through one
//! [`Bus`]. The supervisor keeps a single receiver that feeds the subscriber
//! set; tests may attach their own.
//!
//! ```text
//! SectionActor[0..N] ─┐
//! Compositor        ──┼──► Bus ──► subscriber_listener ──► SubscriberSet
//! Supervisor        ──┘
//! ```
//!
//! Publishing never waits. The channel keeps the last `capacity` events; a
//! receiver that falls behind skips ahead (`RecvError::Lagged`), and events
//! sent while nobody listens are gone.

use tokio::sync::broadcast;

use super::event::Event;

/// Cloneable handle to the event channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus keeping up to `capacity` undelivered events (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Sends `ev` to every current receiver.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Attaches a receiver; it sees events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
