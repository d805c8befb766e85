//! # Slot store: latest text of every section.
//!
//! One slot per section, each behind its own lock. A write replaces the whole
//! [`SectionText`] (an `Arc<str>` swap), so a concurrent reader sees either the
//! old or the new value, never a mix. Slots are independent: writing one never
//! waits on another.
//!
//! ```text
//!   actor 0 ──write(0)──► [RwLock slot 0] ─┐
//!   actor 1 ──write(1)──► [RwLock slot 1] ─┼──► read_all() ──► Compositor
//!   actor N ──write(N)──► [RwLock slot N] ─┘
//! ```
//!
//! ## Rules
//! - Each slot has exactly one writer (its own section actor).
//! - `read_all` is a per-slot snapshot, not a global transaction.
//! - Unwritten slots read as [`SectionText::empty`].

use tokio::sync::RwLock;
use tracing::warn;

use crate::text::SectionText;

/// Fixed-length set of per-section text slots.
#[derive(Debug)]
pub struct SlotStore {
    slots: Box<[RwLock<SectionText>]>,
}

impl SlotStore {
    /// Creates `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| RwLock::new(SectionText::empty())).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replaces the text of one slot. Out-of-range indices are ignored.
    pub async fn write(&self, index: usize, text: SectionText) {
        match self.slots.get(index) {
            Some(slot) => *slot.write().await = text,
            None => warn!(index, len = self.slots.len(), "write to unknown slot ignored"),
        }
    }

    /// Current text of one slot.
    pub async fn read(&self, index: usize) -> Option<SectionText> {
        match self.slots.get(index) {
            Some(slot) => Some(slot.read().await.clone()),
            None => None,
        }
    }

    /// Current text of every slot, in slot order.
    pub async fn read_all(&self) -> Vec<SectionText> {
        let mut out = Vec::with_capacity(self.slots.len());
        for slot in self.slots.iter() {
            out.push(slot.read().await.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn text(s: &str) -> SectionText {
        SectionText::new(s, 64)
    }

    #[tokio::test]
    async fn starts_empty_and_replaces_in_full() {
        let store = SlotStore::new(3);
        assert_eq!(store.len(), 3);
        assert!(store.read_all().await.iter().all(SectionText::is_empty));

        store.write(1, text("[long old value]")).await;
        store.write(1, text("[new]")).await;
        assert_eq!(store.read(1).await.unwrap().as_str(), "[new]");
        assert_eq!(store.read(0).await.unwrap().as_str(), "");
    }

    #[tokio::test]
    async fn out_of_range_is_ignored() {
        let store = SlotStore::new(1);
        store.write(5, text("[x]")).await;
        assert!(store.read(5).await.is_none());
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reads_never_observe_torn_values() {
        let store = Arc::new(SlotStore::new(2));
        let a = text(&format!("[{}]", "a".repeat(40)));
        let b = text("[b]");
        store.write(0, a.clone()).await;

        let writer = {
            let store = Arc::clone(&store);
            let (a, b) = (a.clone(), b.clone());
            tokio::spawn(async move {
                for i in 0..2_000 {
                    let next = if i % 2 == 0 { b.clone() } else { a.clone() };
                    store.write(0, next).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        for _ in 0..2_000 {
            let snapshot = store.read_all().await;
            assert!(snapshot[0] == a || snapshot[0] == b, "torn: {:?}", snapshot[0]);
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
    }
}
