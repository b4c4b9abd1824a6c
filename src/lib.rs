//! MovieBook: debounced movie search with persisted suggestions
//!
//! A search coordinator drives the TMDB movie search endpoint, keeps the
//! latest results and remembers the last ten successful queries.

pub mod config;
pub mod error;
pub mod input;
pub mod network;
pub mod search;
pub mod suggestions;
pub mod tmdb;

pub use config::Settings;
pub use error::SearchError;
pub use input::Debouncer;
pub use search::{MovieSummary, SearchChange, SearchCoordinator, SearchState};
pub use suggestions::{FileStore, MemoryStore, PreferenceStore, Suggestions};
pub use tmdb::{MovieSearch, SearchClient};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
