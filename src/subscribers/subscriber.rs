//! # Observing the bar from the outside.
//!
//! [`Subscribe`] is how logging (and anything else that wants to watch section
//! updates, fallbacks and publishes) hooks into the runtime.
//!
//! Each registered subscriber is driven by its own worker with its own bounded
//! queue, sized by [`Subscribe::queue_capacity`]. Events arrive in bus order.
//! If the queue is full the event is dropped for that subscriber alone and a
//! `SubscriberOverflow` event is published. A panic inside `on_event` is caught
//! and reported as `SubscriberPanicked`; the worker keeps going.
//!
//! Section workers never wait on subscribers.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use async_trait::async_trait;
//! use rootbar::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct FallbackCounter(AtomicU64);
//!
//! #[async_trait]
//! impl Subscribe for FallbackCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::SourceFallback {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "fallback_counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Receives runtime events on a dedicated worker.
///
/// Implementations should not block the executor.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Name reported in overflow and panic events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Queue length for this subscriber. Values below 1 are raised to 1.
    fn queue_capacity(&self) -> usize {
        256
    }
}
