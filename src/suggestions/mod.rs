//! Persisted search suggestions
//!
//! Past successful queries, kept most recent first in a key-value
//! preference store handed in by the caller.

mod list;
mod store;

pub use list::{SuggestionList, MAX_SUGGESTIONS};
pub use store::{FileStore, MemoryStore, PreferenceStore};

use crate::config::SuggestionSettings;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Suggestion list bound to a store handle and key
pub struct Suggestions {
    store: Arc<dyn PreferenceStore>,
    key: String,
    capacity: usize,
    // Serializes read-modify-write cycles in `record`
    update: Mutex<()>,
}

impl Suggestions {
    pub fn new(store: Arc<dyn PreferenceStore>, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            key: key.into(),
            capacity,
            update: Mutex::new(()),
        }
    }

    pub fn with_settings(store: Arc<dyn PreferenceStore>, settings: &SuggestionSettings) -> Self {
        Self::new(store, settings.key.clone(), settings.max_suggestions)
    }

    /// In-memory suggestions with the default key and capacity
    pub fn in_memory() -> Self {
        Self::with_settings(Arc::new(MemoryStore::new()), &SuggestionSettings::default())
    }

    /// Current suggestions, empty when none are persisted or the store fails
    pub fn options(&self) -> Vec<String> {
        match self.load() {
            Ok(list) => list.into_vec(),
            Err(e) => {
                warn!("Failed to read suggestions: {}", e);
                Vec::new()
            }
        }
    }

    /// Record a successful query and return the stored list
    pub fn record(&self, query: &str) -> Result<Vec<String>> {
        let _guard = self.update.lock().unwrap();
        let mut list = self.load()?;
        list.push(query);
        let entries = list.into_vec();
        self.store.set_list(&self.key, entries.clone())?;
        Ok(entries)
    }

    fn load(&self) -> Result<SuggestionList> {
        let entries = self.store.list(&self.key)?.unwrap_or_default();
        Ok(SuggestionList::from_entries(entries, self.capacity))
    }
}
