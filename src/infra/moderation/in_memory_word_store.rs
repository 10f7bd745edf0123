// In-memory implementation of WordStore.
//
// Handy for tests and for running the bot without a database file.
// Nothing survives a restart.

use crate::core::moderation::{WordStore, WordStoreError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[allow(dead_code)]
pub struct InMemoryWordStore {
    /// Word -> insertion sequence number, so listing keeps insertion order.
    words: DashMap<String, u64>,
    next_seq: AtomicU64,
}

#[allow(dead_code)]
impl InMemoryWordStore {
    pub fn new() -> Self {
        Self {
            words: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WordStore for InMemoryWordStore {
    async fn list_words(&self) -> Result<Vec<String>, WordStoreError> {
        let mut entries: Vec<(u64, String)> = self
            .words
            .iter()
            .map(|e| (*e.value(), e.key().clone()))
            .collect();
        entries.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, word)| word).collect())
    }

    async fn add_word(&self, word: &str) -> Result<bool, WordStoreError> {
        match self.words.entry(word.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(self.next_seq.fetch_add(1, Ordering::Relaxed));
                Ok(true)
            }
        }
    }

    async fn remove_word(&self, word: &str) -> Result<u64, WordStoreError> {
        Ok(self.words.remove(word).map(|_| 1).unwrap_or(0))
    }
}
