//! Search client trait

use crate::error::SearchError;
use crate::search::MovieSummary;
use async_trait::async_trait;

/// A source of movie summaries for a free-text query
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Client name, used in logs
    fn name(&self) -> &str;

    /// Run one search. An empty `Ok` vector means the server matched nothing.
    async fn fetch(&self, query: &str) -> Result<Vec<MovieSummary>, SearchError>;
}
