//! # Event subscribers for the rootbar runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the built-in [`LogWriter`] that turns runtime events into `tracing` output.
//!
//! ## Architecture
//! ```text
//! SectionActor ── publish(Event) ──► Bus ──► Supervisor listener ──► SubscriberSet::emit
//! Compositor   ──┘                                                   │
//!                                                      ┌─────────────┼─────────────┐
//!                                                      ▼             ▼             ▼
//!                                                  LogWriter      custom ...    custom ...
//! ```

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
