//! Runtime core: sections, composition and lifecycle.
//!
//! Internal modules:
//! - [`config`]: bar configuration (compiled-in default, optional TOML);
//! - [`store`]: per-slot shared state of section texts;
//! - [`compositor`]: composes the slots and publishes them to the display sink;
//! - [`actor`]: runs one section on its interval;
//! - [`supervisor`]: spawns actors, waits for termination, shuts down;
//! - [`shutdown`]: OS termination signal handling.

mod actor;
mod compositor;
mod config;
mod shutdown;
mod store;
mod supervisor;

pub use actor::{ActorExit, SectionActor};
pub use compositor::{Compositor, compose};
pub use config::{BarConfig, MIN_SECTION_CHARS, SectionConfig, SourceKind};
pub use store::SlotStore;
pub use supervisor::{Supervisor, SupervisorBuilder};
