//! Paginated response envelope shared by TMDB list endpoints

use serde::{Deserialize, Deserializer, Serialize};

/// `{ page, total_pages, total_results, results: [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Decode a paginated envelope whose entries have the shape `T`
pub fn decode_page<T>(text: &str) -> serde_json::Result<Page<T>>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(text)
}

/// Error body TMDB sends alongside non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub status_code: Option<i64>,
    pub status_message: Option<String>,
    pub success: Option<bool>,
}

impl ErrorBody {
    /// Provider diagnostic from a raw body, if it carries one
    pub fn message_from(text: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(text)
            .ok()
            .and_then(|body| body.status_message)
            .filter(|message| !message.trim().is_empty())
    }
}

/// Accept any JSON value; keep it only when it is a string
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}
