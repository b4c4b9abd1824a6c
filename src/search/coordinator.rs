//! Search coordination
//!
//! [`SearchCoordinator`] drives a [`SearchClient`], owns the current
//! [`SearchState`], records successful queries as suggestions and publishes
//! one [`SearchChange`] per applied query.

use super::models::{SearchChange, SearchState};
use crate::config::SearchSettings;
use crate::error::SearchError;
use crate::suggestions::Suggestions;
use crate::tmdb::SearchClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Buffered change events per subscriber
const EVENT_CAPACITY: usize = 64;

/// View-model for the movie search screen
#[derive(Clone)]
pub struct SearchCoordinator {
    client: Arc<dyn SearchClient>,
    suggestions: Arc<Suggestions>,
    state: Arc<RwLock<SearchState>>,
    /// Generation of the most recently issued query
    generation: Arc<AtomicU64>,
    /// Held from the staleness check until the outcome is fully applied
    apply: Arc<Mutex<()>>,
    discard_stale: bool,
    events: broadcast::Sender<SearchChange>,
}

impl SearchCoordinator {
    /// Create a coordinator that discards responses to superseded queries
    pub fn new(client: Arc<dyn SearchClient>, suggestions: Suggestions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            suggestions: Arc::new(suggestions),
            state: Arc::new(RwLock::new(SearchState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            apply: Arc::new(Mutex::new(())),
            discard_stale: true,
            events,
        }
    }

    pub fn with_settings(
        client: Arc<dyn SearchClient>,
        suggestions: Suggestions,
        settings: &SearchSettings,
    ) -> Self {
        Self::new(client, suggestions).discard_stale_responses(settings.discard_stale_responses)
    }

    /// When false, whichever response is processed last wins
    pub fn discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.read().unwrap().clone()
    }

    /// Persisted suggestions, most recent first
    pub fn suggested_options(&self) -> Vec<String> {
        self.suggestions.options()
    }

    /// Observe change events
    pub fn subscribe(&self) -> broadcast::Receiver<SearchChange> {
        self.events.subscribe()
    }

    /// Search for `text` and apply the outcome.
    ///
    /// Blank text is ignored. Returns the published change, or `None` when
    /// nothing was published (blank text, or a response to a query that a
    /// newer one superseded).
    pub async fn query(&self, text: &str) -> Option<SearchChange> {
        if text.trim().is_empty() {
            debug!("Ignoring query: {}", SearchError::EmptyQuery);
            return None;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Executing search '{}' via {}", text, self.client.name());

        let result = self.client.fetch(text).await;

        let _apply = self.apply.lock().await;
        if self.discard_stale && self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale response for '{}'", text);
            return None;
        }

        let change = match result {
            Ok(movies) if movies.is_empty() => {
                self.state.write().unwrap().movies.clear();
                debug!("Search '{}' matched nothing", text);
                SearchChange::Failed(SearchError::EmptyResult.to_string())
            }
            Ok(movies) => {
                let count = movies.len();
                {
                    let mut state = self.state.write().unwrap();
                    state.movies = movies;
                    state.most_recent_successful_query = Some(text.to_string());
                }
                self.record_suggestion(text).await;
                debug!("Search '{}' returned {} movies", text, count);
                SearchChange::Succeeded
            }
            Err(e) => {
                warn!("Search '{}' failed: {}", text, e);
                SearchChange::Failed(e.to_string())
            }
        };

        // No subscribers is fine
        let _ = self.events.send(change.clone());
        Some(change)
    }

    /// Persist `text` as the newest suggestion off the async worker threads
    async fn record_suggestion(&self, text: &str) {
        let suggestions = self.suggestions.clone();
        let query = text.to_string();
        match tokio::task::spawn_blocking(move || suggestions.record(&query)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!("Failed to persist suggestion '{}': {}", text, e),
            Err(e) => warn!("Suggestion update for '{}' did not complete: {}", text, e),
        }
    }

    /// Run [`query`](Self::query) on a background task
    pub fn spawn_query(&self, text: impl Into<String>) -> JoinHandle<Option<SearchChange>> {
        let coordinator = self.clone();
        let text = text.into();
        tokio::spawn(async move { coordinator.query(&text).await })
    }

    /// Run every text from `queries` concurrently, handing each outcome to
    /// `report`. Returns once `queries` closes and all searches are done,
    /// with the number of searches that panicked.
    pub async fn serve<F>(&self, mut queries: mpsc::Receiver<String>, report: F) -> usize
    where
        F: Fn(&SearchCoordinator, Option<SearchChange>) + Clone + Send + 'static,
    {
        let mut inflight = JoinSet::new();
        let mut panicked = 0;

        loop {
            tokio::select! {
                next = queries.recv() => match next {
                    Some(text) => {
                        let coordinator = self.clone();
                        let report = report.clone();
                        inflight.spawn(async move {
                            let change = coordinator.query(&text).await;
                            report(&coordinator, change);
                        });
                    }
                    None => break,
                },
                Some(done) = inflight.join_next(), if !inflight.is_empty() => {
                    if let Err(e) = done {
                        warn!("Search task failed: {}", e);
                        panicked += 1;
                    }
                }
            }
        }

        while let Some(done) = inflight.join_next().await {
            if let Err(e) = done {
                warn!("Search task failed: {}", e);
                panicked += 1;
            }
        }
        panicked
    }

    /// Re-issue the most recent successful query, if there is one
    pub async fn refresh(&self) -> Option<SearchChange> {
        let last = self.state.read().unwrap().most_recent_successful_query.clone();
        match last {
            Some(query) => self.query(&query).await,
            None => None,
        }
    }
}
