//! Movie search data models

use serde::{Deserialize, Serialize};

/// A decoded movie shown in the result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Poster image path, relative to the image CDN
    pub poster_path: String,
    pub title: String,
    pub release_date: String,
    pub overview: String,
}

impl MovieSummary {
    pub fn new(
        poster_path: impl Into<String>,
        title: impl Into<String>,
        release_date: impl Into<String>,
        overview: impl Into<String>,
    ) -> Self {
        Self {
            poster_path: poster_path.into(),
            title: title.into(),
            release_date: release_date.into(),
            overview: overview.into(),
        }
    }

    /// `Title (release date)`, or just the title when the date is unknown
    pub fn headline(&self) -> String {
        if self.release_date.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.release_date)
        }
    }
}

/// State owned by the search coordinator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    /// Result of the last applied query
    pub movies: Vec<MovieSummary>,
    /// Last query that produced at least one movie
    pub most_recent_successful_query: Option<String>,
}

/// Outcome of one completed query attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchChange {
    /// The query found movies; read them from the coordinator state
    Succeeded,
    /// No results or some other failure, with a displayable message
    Failed(String),
}

impl SearchChange {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Failure message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed(message) => Some(message),
        }
    }
}
