//! Keystroke coalescing
//!
//! Turns a stream of raw search-box texts into query triggers: a text is
//! forwarded once no newer text has arrived for the quiet period, and only
//! if it is long enough to be worth searching.

use crate::config::InputSettings;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Buffered texts between the debouncer and its consumer
const CHANNEL_CAPACITY: usize = 32;

/// Quiet-period debouncer with a minimum length filter
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    min_len: usize,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::with_settings(&InputSettings::default())
    }
}

impl Debouncer {
    pub fn new(delay: Duration, min_len: usize) -> Self {
        Self { delay, min_len }
    }

    pub fn with_settings(settings: &InputSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.debounce_ms),
            settings.min_query_len,
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether `text` is long enough to trigger a query
    pub fn accepts(&self, text: &str) -> bool {
        text.chars().count() >= self.min_len
    }

    /// Run on a background task, returning the debounced output
    pub fn spawn(self, input: mpsc::Receiver<String>) -> mpsc::Receiver<String> {
        let (output, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(self.run(input, output));
        rx
    }

    /// Forward debounced texts from `input` to `output` until either side
    /// closes. Text still pending when `input` closes is flushed.
    pub async fn run(self, mut input: mpsc::Receiver<String>, output: mpsc::Sender<String>) {
        let mut pending: Option<String> = None;

        loop {
            match pending.take() {
                None => match input.recv().await {
                    Some(text) => pending = Some(text),
                    None => break,
                },
                Some(text) => {
                    tokio::select! {
                        next = input.recv() => match next {
                            Some(newer) => pending = Some(newer),
                            None => {
                                self.emit(&output, text).await;
                                break;
                            }
                        },
                        _ = tokio::time::sleep(self.delay) => {
                            if !self.emit(&output, text).await {
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Returns false once the consumer is gone
    async fn emit(&self, output: &mpsc::Sender<String>, text: String) -> bool {
        if !self.accepts(&text) {
            debug!("Skipping short query '{}'", text);
            return true;
        }
        debug!("Querying: {}", text);
        output.send(text).await.is_ok()
    }
}
