//! # Supervisor: owns the section actors, the compositor and shutdown.
//!
//! The [`Supervisor`] builds the slot store, the compositor and the event
//! plumbing once, spawns one [`SectionActor`] per section and then blocks
//! until a termination signal arrives.
//!
//! ## High-level architecture
//! ```text
//! Preparation (build):
//!   BarConfig ──► SectionSpec[0..N]      (order = slot = display order)
//!   SlotStore::new(N), Compositor::new(store, sink, bus)
//!   SubscriberSet::new(subscribers, bus)
//!
//! run_until(shutdown):
//!   subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!   SectionSpec[i] ──► SectionActor::new(i, ..) ──► set.spawn(actor.run(child_token))
//!                                                        (panics caught → SectionDead)
//!   wait for `shutdown`, reporting actors that die on the way
//!
//! Shutdown path:
//!   Bus.publish(ShutdownRequested)
//!   runtime_token.cancel()       → every actor exits at its next safe point
//!   wait_all_with_grace(cfg.grace):
//!      ├─ all joined  → AllStoppedWithin
//!      └─ timeout     → GraceExceeded, abort stragglers
//!   compositor.close()           → display sink closed exactly once
//!   drain subscribers            → Ok(())
//! ```

use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::actor::SectionActor;
use crate::core::compositor::Compositor;
use crate::core::config::{BarConfig, MIN_SECTION_CHARS};
use crate::core::shutdown::ShutdownSignal;
use crate::core::store::SlotStore;
use crate::error::{ConfigError, RuntimeError};
use crate::events::{Bus, Event, EventKind};
use crate::section::SectionSpec;
use crate::sinks::DisplaySink;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Result of one supervised actor task: its slot and how it ended.
type Joined = (usize, Result<(), String>);

/// Coordinates section actors, the compositor and graceful shutdown.
pub struct Supervisor {
    cfg: BarConfig,
    sections: Arc<[SectionSpec]>,
    bus: Bus,
    subs: SubscriberSet,
    store: Arc<SlotStore>,
    compositor: Arc<Compositor>,
}

/// Builder for a [`Supervisor`].
pub struct SupervisorBuilder {
    cfg: BarConfig,
    sections: Option<Vec<SectionSpec>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SupervisorBuilder {
    pub fn new(cfg: BarConfig) -> Self {
        Self {
            cfg,
            sections: None,
            subscribers: Vec::new(),
        }
    }

    /// Uses explicit sections instead of the ones described by the config.
    pub fn with_sections(mut self, sections: Vec<SectionSpec>) -> Self {
        self.sections = Some(sections);
        self
    }

    /// Sets event subscribers (logging, metrics, ...).
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Validates the section set and wires the runtime around `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self, sink: Box<dyn DisplaySink>) -> Result<Supervisor, RuntimeError> {
        let sections = match self.sections {
            Some(sections) => {
                validate_sections(&sections, self.cfg.section_max_chars)?;
                sections
            }
            None => {
                self.cfg.validate()?;
                self.cfg.section_specs()
            }
        };

        let bus = Bus::new(self.cfg.bus_capacity);
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let store = Arc::new(SlotStore::new(sections.len()));
        let compositor = Arc::new(Compositor::new(Arc::clone(&store), sink, bus.clone()));

        Ok(Supervisor {
            cfg: self.cfg,
            sections: sections.into(),
            bus,
            subs,
            store,
            compositor,
        })
    }
}

fn validate_sections(sections: &[SectionSpec], max_chars: usize) -> Result<(), ConfigError> {
    if sections.is_empty() {
        return Err(ConfigError::NoSections);
    }
    if max_chars < MIN_SECTION_CHARS {
        return Err(ConfigError::WidthTooSmall(max_chars));
    }
    match sections.iter().position(|s| s.interval().is_zero()) {
        Some(index) => Err(ConfigError::ZeroInterval { index }),
        None => Ok(()),
    }
}

impl Supervisor {
    /// Starts building a supervisor.
    pub fn builder(cfg: BarConfig) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    /// Event bus shared with all actors.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Slot store read by the compositor.
    pub fn store(&self) -> &Arc<SlotStore> {
        &self.store
    }

    /// Section names in display order.
    pub fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name().to_string()).collect()
    }

    /// Runs until SIGINT, SIGTERM or SIGQUIT.
    ///
    /// Signal registration happens before any actor starts; failing it is fatal.
    pub async fn run(self) -> Result<(), RuntimeError> {
        let mut signal = ShutdownSignal::register().map_err(RuntimeError::Signal)?;
        self.run_until(async move { signal.recv().await }).await
    }

    /// Runs until `shutdown` completes, then stops every actor and closes the sink.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()>,
    {
        let Supervisor {
            cfg,
            sections,
            bus,
            subs,
            store,
            compositor,
        } = self;

        let subs = Arc::new(subs);
        let listener_token = CancellationToken::new();
        let listener = subscriber_listener(&bus, Arc::clone(&subs), listener_token.clone());

        let runtime_token = CancellationToken::new();
        let mut set = JoinSet::new();
        let mut running = BTreeMap::new();
        for (slot, spec) in sections.iter().enumerate() {
            let actor = SectionActor::new(
                slot,
                spec,
                cfg.section_max_chars,
                Arc::clone(&store),
                Arc::clone(&compositor),
                bus.clone(),
            );
            let child = runtime_token.child_token();
            set.spawn(async move {
                let res = AssertUnwindSafe(actor.run(child)).catch_unwind().await;
                (slot, res.map(|_| ()).map_err(panic_message))
            });
            running.insert(slot, spec.name().to_string());
        }
        info!(sections = ?running.values().collect::<Vec<_>>(), "bar started");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                Some(joined) = set.join_next() => {
                    report_exit(&bus, &mut running, joined);
                }
            }
        }

        bus.publish(Event::new(EventKind::ShutdownRequested));
        runtime_token.cancel();
        wait_all_with_grace(&cfg, &bus, &mut set, &mut running).await;

        compositor.close().await;
        drop(compositor);

        listener_token.cancel();
        let _ = listener.await;
        if let Ok(subs) = Arc::try_unwrap(subs) {
            subs.shutdown().await;
        }
        Ok(())
    }
}

/// Forwards bus events to the subscriber set until `stop` is cancelled.
///
/// Events already queued on the bus are delivered before stopping.
fn subscriber_listener(
    bus: &Bus,
    subs: Arc<SubscriberSet>,
    stop: CancellationToken,
) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = stop.cancelled() => break,
            }
        }
    })
}

/// Waits for all actors within the configured grace period, aborting the rest.
async fn wait_all_with_grace(
    cfg: &BarConfig,
    bus: &Bus,
    set: &mut JoinSet<Joined>,
    running: &mut BTreeMap<usize, String>,
) {
    let done = async {
        while let Some(joined) = set.join_next().await {
            report_exit(bus, running, joined);
        }
    };

    match tokio::time::timeout(cfg.grace, done).await {
        Ok(()) => bus.publish(Event::new(EventKind::AllStoppedWithin)),
        Err(_) => {
            let stuck: Vec<&str> = running.values().map(String::as_str).collect();
            bus.publish(
                Event::new(EventKind::GraceExceeded).with_reason(format!("{stuck:?}")),
            );
            set.abort_all();
            set.detach_all();
        }
    }
}

fn report_exit(
    bus: &Bus,
    running: &mut BTreeMap<usize, String>,
    joined: Result<Joined, tokio::task::JoinError>,
) {
    let Ok((slot, res)) = joined else {
        return;
    };
    let name = running.remove(&slot);
    if let Err(reason) = res {
        let mut ev = Event::new(EventKind::SectionDead)
            .with_slot(slot)
            .with_reason(reason);
        if let Some(name) = name {
            ev = ev.with_section(name);
        }
        bus.publish(ev);
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;
    use crate::sources::ClockSource;
    use std::time::Duration;

    #[tokio::test]
    async fn rejects_empty_section_list() {
        let (sink, _) = MemorySink::new();
        let err = Supervisor::builder(BarConfig::default())
            .with_sections(Vec::new())
            .build(Box::new(sink))
            .err()
            .unwrap();
        assert!(matches!(err, RuntimeError::Config(ConfigError::NoSections)));
    }

    #[tokio::test]
    async fn rejects_zero_interval_section() {
        let (sink, _) = MemorySink::new();
        let sections = vec![
            SectionSpec::from_source(ClockSource::new(), Duration::from_secs(1)),
            SectionSpec::from_source(ClockSource::new(), Duration::ZERO),
        ];
        let err = Supervisor::builder(BarConfig::default())
            .with_sections(sections)
            .build(Box::new(sink))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            RuntimeError::Config(ConfigError::ZeroInterval { index: 1 })
        ));
    }

    #[tokio::test]
    async fn default_config_builds_reference_sections() {
        let (sink, _) = MemorySink::new();
        let sup = Supervisor::builder(BarConfig::default())
            .build(Box::new(sink))
            .unwrap();
        assert_eq!(sup.section_names(), ["player", "clock", "volume", "battery"]);
        assert_eq!(sup.store().len(), 4);
    }

    #[test]
    fn panic_messages_are_extracted() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "bang");
        assert_eq!(panic_message(Box::new(7_u8)), "unknown panic");
    }
}
