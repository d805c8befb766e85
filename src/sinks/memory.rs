//! In-memory sink.

use std::sync::{Arc, Mutex, MutexGuard};

use super::DisplaySink;
use crate::error::SinkError;

#[derive(Debug, Default)]
struct Record {
    titles: Vec<String>,
    flushes: usize,
    closes: usize,
    fail_next: usize,
}

/// Sink that records every title it receives.
///
/// Keep a [`MemorySinkHandle`] to inspect the record after handing the sink
/// to the supervisor.
#[derive(Debug, Default)]
pub struct MemorySink {
    record: Arc<Mutex<Record>>,
}

/// Read side of a [`MemorySink`].
#[derive(Debug, Clone)]
pub struct MemorySinkHandle {
    record: Arc<Mutex<Record>>,
}

impl MemorySink {
    pub fn new() -> (Self, MemorySinkHandle) {
        let record = Arc::new(Mutex::new(Record::default()));
        let handle = MemorySinkHandle {
            record: Arc::clone(&record),
        };
        (Self { record }, handle)
    }

    fn record(&self) -> MutexGuard<'_, Record> {
        self.record.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl MemorySinkHandle {
    fn record(&self) -> MutexGuard<'_, Record> {
        self.record.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Every title set so far, oldest first.
    pub fn titles(&self) -> Vec<String> {
        self.record().titles.clone()
    }

    pub fn last_title(&self) -> Option<String> {
        self.record().titles.last().cloned()
    }

    pub fn flushes(&self) -> usize {
        self.record().flushes
    }

    /// How many times the sink was closed.
    pub fn closes(&self) -> usize {
        self.record().closes
    }

    /// Makes the next `n` calls to `set_title` fail.
    pub fn fail_next(&self, n: usize) {
        self.record().fail_next = n;
    }
}

impl DisplaySink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn set_title(&mut self, title: &str) -> Result<(), SinkError> {
        let mut rec = self.record();
        if rec.closes > 0 {
            return Err(SinkError::Closed);
        }
        if rec.fail_next > 0 {
            rec.fail_next -= 1;
            return Err(SinkError::Write("injected failure".into()));
        }
        rec.titles.push(title.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.record().flushes += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.record().closes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_titles_and_rejects_after_close() {
        let (mut sink, handle) = MemorySink::new();
        sink.set_title("[A]").unwrap();
        sink.flush().unwrap();
        sink.close();

        assert_eq!(handle.titles(), vec!["[A]".to_string()]);
        assert_eq!(handle.flushes(), 1);
        assert_eq!(handle.closes(), 1);
        assert!(matches!(sink.set_title("[B]"), Err(SinkError::Closed)));
    }

    #[test]
    fn injected_failures_are_consumed() {
        let (mut sink, handle) = MemorySink::new();
        handle.fail_next(1);
        assert!(sink.set_title("x").is_err());
        assert!(sink.set_title("y").is_ok());
        assert_eq!(handle.last_title().as_deref(), Some("y"));
    }
}
