//! # Runtime events emitted by the supervisor, section actors and compositor.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Section events**: worker lifecycle and per-tick results
//! - **Bar events**: compositor publishes and sink lifecycle
//! - **Shutdown events**: termination flow of the supervisor
//! - **Subscriber events**: overflow and panic reports from subscriber workers
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! section name and slot, rendered text and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use rootbar::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::SourceFallback)
//!     .with_section("player")
//!     .with_slot(0)
//!     .with_reason("failed to launch `playerctl`");
//!
//! assert_eq!(ev.kind, EventKind::SourceFallback);
//! assert_eq!(ev.section.as_deref(), Some("player"));
//! assert_eq!(ev.slot, Some(0));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `section`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `section`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,

    // === Shutdown events ===
    /// Termination signal observed.
    ShutdownRequested,

    /// All section workers stopped within the grace period.
    AllStoppedWithin,

    /// Grace period exceeded; remaining workers were aborted.
    ///
    /// Sets:
    /// - `reason`: names of the aborted sections
    GraceExceeded,

    // === Section events ===
    /// Section worker spawned.
    ///
    /// Sets:
    /// - `section`, `slot`
    SectionStarted,

    /// Section slot overwritten with fresh text.
    ///
    /// Sets:
    /// - `section`, `slot`
    /// - `text`: rendered text
    SectionUpdated,

    /// Source read failed; the placeholder text was stored instead.
    ///
    /// Sets:
    /// - `section`, `slot`
    /// - `reason`: failure message
    /// - `text`: placeholder text
    SourceFallback,

    /// Section worker panicked; its slot keeps the last written text.
    ///
    /// Sets:
    /// - `section`, `slot`
    /// - `reason`: panic message
    SectionDead,

    /// Section worker exited after cancellation.
    ///
    /// Sets:
    /// - `section`, `slot`
    SectionStopped,

    // === Bar events ===
    /// Composed bar forwarded to the display sink.
    ///
    /// Sets:
    /// - `text`: composed bar
    BarPublished,

    /// Display sink rejected the composed bar.
    ///
    /// Sets:
    /// - `reason`: sink error
    PublishFailed,

    /// Display sink connection closed.
    SinkClosed,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Section (or subscriber) name, if applicable.
    pub section: Option<Arc<str>>,
    /// Slot index of the section.
    pub slot: Option<u32>,
    /// Rendered text (section text or composed bar).
    pub text: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            section: None,
            slot: None,
            text: None,
            reason: None,
        }
    }

    /// Attaches a section name.
    #[inline]
    pub fn with_section(mut self, section: impl Into<Arc<str>>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Attaches a slot index.
    #[inline]
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(u32::try_from(slot).unwrap_or(u32::MAX));
        self
    }

    /// Attaches rendered text.
    #[inline]
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_section(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_section(subscriber)
            .with_reason(info)
    }

    /// True for events produced by the subscriber machinery itself.
    #[inline]
    pub fn is_internal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
