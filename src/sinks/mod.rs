//! # Display sinks.
//!
//! A [`DisplaySink`] shows the composed bar. The compositor is the only
//! caller: it calls [`set_title`](DisplaySink::set_title) followed by
//! [`flush`](DisplaySink::flush) once per publish, and
//! [`close`](DisplaySink::close) exactly once at shutdown.
//!
//! | Sink           | Output                                         |
//! |----------------|------------------------------------------------|
//! | [`XRootSink`]  | `WM_NAME` of the X11 root window (feature `x11`) |
//! | [`StdoutSink`] | one line per publish on standard output        |
//! | [`MemorySink`] | in-memory record, for tests and embedding      |

mod memory;
mod stdout;
#[cfg(feature = "x11")]
mod xroot;

use crate::error::SinkError;

pub use memory::{MemorySink, MemorySinkHandle};
pub use stdout::StdoutSink;
#[cfg(feature = "x11")]
pub use xroot::XRootSink;

/// Facility that shows the composed bar.
pub trait DisplaySink: Send + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Replaces the displayed title.
    fn set_title(&mut self, title: &str) -> Result<(), SinkError>;

    /// Pushes buffered output to the display.
    fn flush(&mut self) -> Result<(), SinkError>;

    /// Releases the connection. Called once; later calls must be no-ops.
    fn close(&mut self) {}
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn set_title(&mut self, title: &str) -> Result<(), SinkError> {
        (**self).set_title(title)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
