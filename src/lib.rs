//! # rootbar
//!
//! **rootbar** composes a one-line status bar out of independently refreshed
//! sections and publishes it as the X11 root window title, where window
//! managers such as dwm display it.
//!
//! Every section owns a [`Source`] and a refresh interval. Each section runs
//! in its own actor: it reads its source, stores the bounded result in its
//! slot and asks the compositor to republish the whole bar. A slow section
//! never delays a fast one.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ SectionSpec  │   │ SectionSpec  │   │ SectionSpec  │
//!     │ (player, 5s) │   │ (clock, 1s)  │   │(battery, 60s)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor (runtime orchestrator)                                │
//! │  - Bus (broadcast events)                                         │
//! │  - SlotStore (one slot per section, display order)                │
//! │  - Compositor (owns the display sink)                             │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │ SectionActor │   │ SectionActor │   │ SectionActor │   │
//!     │ (slot 0)     │   │ (slot 1)     │   │ (slot 2)     │   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │ read source      │                  │                 │
//!      │ write slot       │                  │                 │
//!      │ publish() ───────┴──────┬───────────┘                 │
//!      │                         ▼                             │
//!      │            ┌────────────────────────┐                 │
//!      │            │ Compositor ─► sink     │                 │
//!      │            │ (serialized publishes) │                 │
//!      │            └────────────────────────┘                 │
//!      ▼                                                       ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                (capacity: BarConfig::bus_capacity)                │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          subscriber_listener
//!                                   ▼
//!                             SubscriberSet
//!                        (per-subscriber queues)
//! ```
//!
//! ### Section lifecycle
//! ```text
//! loop {
//!   ├─► source.read(max_chars)
//!   │       ├─ Ok  ──► "[text]"        ─► SectionUpdated
//!   │       └─ Err ──► placeholder     ─► SourceFallback
//!   ├─► store.write(slot, text)
//!   ├─► compositor.publish()           (failure is reported, not fatal)
//!   └─► sleep(interval)                (cancellable)
//! }
//! ```
//!
//! ## Features
//! | Area            | Description                                             | Key types / traits                         |
//! |-----------------|---------------------------------------------------------|--------------------------------------------|
//! | **Sources**     | Player title, clock, volume and battery readers.        | [`Source`], [`Query`], [`Reading`]         |
//! | **Sinks**       | Where the composed bar goes.                            | [`DisplaySink`], [`MemorySink`]            |
//! | **Supervision** | Actors, shutdown on signals, grace period.              | [`Supervisor`]                             |
//! | **Subscribers** | Hook into runtime events (logging, metrics, ...).       | [`Subscribe`], [`LogWriter`]               |
//! | **Errors**      | Typed errors with stable labels.                        | [`RuntimeError`], [`SourceError`]          |
//! | **Config**      | Compiled-in reference bar, optional TOML override.      | [`BarConfig`], [`SectionConfig`]           |
//!
//! ## Optional features
//! - `x11` (default): exports [`XRootSink`], which writes the root window `WM_NAME`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use rootbar::{BarConfig, ClockSource, MemorySink, SectionSpec, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), rootbar::RuntimeError> {
//!     let (sink, handle) = MemorySink::new();
//!     let clock = SectionSpec::from_source(ClockSource::new(), Duration::from_secs(1));
//!
//!     let sup = Supervisor::builder(BarConfig::default())
//!         .with_sections(vec![clock])
//!         .build(Box::new(sink))?;
//!
//!     sup.run_until(tokio::time::sleep(Duration::from_millis(50))).await?;
//!     assert_eq!(handle.closes(), 1);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod section;
mod sinks;
mod sources;
mod subscribers;
mod text;

// ---- Public re-exports ----

pub use crate::core::{
    ActorExit, BarConfig, Compositor, MIN_SECTION_CHARS, SectionActor, SectionConfig, SlotStore,
    SourceKind, Supervisor, SupervisorBuilder, compose,
};
pub use error::{ConfigError, RuntimeError, SinkError, SourceError};
pub use events::{Bus, Event, EventKind};
pub use section::SectionSpec;
pub use sinks::{DisplaySink, MemorySink, MemorySinkHandle, StdoutSink};
pub use sources::{
    BATTERY_MARKER, BatterySource, ClockSource, CommandQuery, DEFAULT_BATTERY_DIR,
    DEFAULT_CLOCK_FORMAT, ERROR_MARKER, PlayerSource, Query, Reading, Source, SourceRef,
    VolumeSource,
};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use text::{DEFAULT_SECTION_MAX_CHARS, SectionText};

// Native root-window sink.
// Enable with: `--features x11` (on by default)
#[cfg(feature = "x11")]
pub use sinks::XRootSink;
