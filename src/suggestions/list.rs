//! Bounded most-recently-used list of query strings

use serde::{Deserialize, Serialize};

/// Default number of retained suggestions
pub const MAX_SUGGESTIONS: usize = 10;

/// Distinct query strings, most recent first, at most `capacity` long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionList {
    entries: Vec<String>,
    capacity: usize,
}

impl Default for SuggestionList {
    fn default() -> Self {
        Self::new(MAX_SUGGESTIONS)
    }
}

impl SuggestionList {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Wrap a persisted list, dropping duplicates and anything past `capacity`
    pub fn from_entries(entries: Vec<String>, capacity: usize) -> Self {
        let mut list = Self::new(capacity);
        for entry in entries {
            if list.entries.len() >= capacity {
                break;
            }
            if !list.contains(&entry) {
                list.entries.push(entry);
            }
        }
        list
    }

    /// Move `query` to the front, evicting the oldest entry past capacity
    pub fn push(&mut self, query: &str) {
        if let Some(index) = self.entries.iter().position(|e| e == query) {
            self.entries.remove(index);
        }
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.capacity);
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.iter().any(|e| e == query)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
