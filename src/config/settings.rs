//! Settings structures for MovieBook configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub suggestions: SuggestionSettings,
    pub input: InputSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (MOVIEBOOK_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("MOVIEBOOK_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("MOVIEBOOK_API_KEY") {
            self.api.api_key = val;
        }
        if let Ok(val) = std::env::var("MOVIEBOOK_SEARCH_URL") {
            self.api.search_url = val;
        }
        if let Ok(val) = std::env::var("MOVIEBOOK_SUGGESTIONS_PATH") {
            self.suggestions.path = Some(PathBuf::from(val));
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Movie metadata API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Movie search endpoint
    pub search_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            search_url: "https://api.themoviedb.org/3/search/movie".to_string(),
            api_key: String::new(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy for all outgoing traffic
    pub proxy: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 10,
            verify_ssl: true,
            proxy: None,
        }
    }
}

/// Search coordination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Drop responses to queries that were superseded by a newer query
    pub discard_stale_responses: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            discard_stale_responses: true,
        }
    }
}

/// Persisted suggestion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    /// Preference key the suggestion list is stored under
    pub key: String,
    /// Maximum number of retained suggestions
    pub max_suggestions: usize,
    /// Preference file (none = platform data dir)
    pub path: Option<PathBuf>,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            key: "MovieSearchSuggestedOptionsKey".to_string(),
            max_suggestions: 10,
            path: None,
        }
    }
}

impl SuggestionSettings {
    /// Resolve the preference file location
    pub fn resolved_path(&self) -> PathBuf {
        match self.path {
            Some(ref path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("moviebook")
                .join("preferences.json"),
        }
    }
}

/// Keystroke coalescing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Quiet period before typed text is searched, in milliseconds
    pub debounce_ms: u64,
    /// Minimum number of characters a query must have
    pub min_query_len: usize,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            min_query_len: 2,
        }
    }
}
