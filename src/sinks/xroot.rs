//! X11 root window title.
//!
//! Sets `WM_NAME` on the root window, which is what dwm-style window managers
//! draw in their status area (the same property `XStoreName` writes).

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, PropMode, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use super::DisplaySink;
use crate::error::SinkError;

/// Root window title sink over a pure-Rust X11 connection.
pub struct XRootSink {
    conn: Option<RustConnection>,
    root: Window,
}

impl XRootSink {
    /// Connects to `$DISPLAY` (or `display` if given) and resolves the root window.
    pub fn open(display: Option<&str>) -> Result<Self, SinkError> {
        let (conn, screen_num) =
            x11rb::connect(display).map_err(|e| SinkError::Connect(e.to_string()))?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| SinkError::Connect(format!("no screen {screen_num}")))?;
        Ok(Self {
            conn: Some(conn),
            root,
        })
    }
}

impl DisplaySink for XRootSink {
    fn name(&self) -> &'static str {
        "xroot"
    }

    fn set_title(&mut self, title: &str) -> Result<(), SinkError> {
        let conn = self.conn.as_ref().ok_or(SinkError::Closed)?;
        conn.change_property8(
            PropMode::REPLACE,
            self.root,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            title.as_bytes(),
        )
        .map_err(|e| SinkError::Write(e.to_string()))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let conn = self.conn.as_ref().ok_or(SinkError::Closed)?;
        conn.flush().map_err(|e| SinkError::Flush(e.to_string()))
    }

    fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.flush();
        }
    }
}
