//! Configuration module for MovieBook
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Candidate settings files, checked in order
pub fn settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("moviebook/settings.yml"));
    }
    paths
}

/// Settings file to load: `MOVIEBOOK_SETTINGS_PATH` if it exists, else the
/// first existing candidate
pub fn locate() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = std::env::var("MOVIEBOOK_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    settings_paths().into_iter().find(|path| path.exists())
}

/// Load settings from `path` or use defaults, then apply env overrides
pub fn load_from(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

/// Load settings from the located file or use defaults
pub fn load() -> Result<Settings> {
    load_from(locate().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const OVERRIDES: [&str; 5] = [
        "MOVIEBOOK_SETTINGS_PATH",
        "MOVIEBOOK_DEBUG",
        "MOVIEBOOK_API_KEY",
        "MOVIEBOOK_SEARCH_URL",
        "MOVIEBOOK_SUGGESTIONS_PATH",
    ];

    fn clear_env() {
        for var in OVERRIDES {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_merge_env_overrides() {
        clear_env();
        std::env::set_var("MOVIEBOOK_DEBUG", "true");
        std::env::set_var("MOVIEBOOK_API_KEY", "env-key");
        std::env::set_var("MOVIEBOOK_SEARCH_URL", "http://localhost:9000/search");
        std::env::set_var("MOVIEBOOK_SUGGESTIONS_PATH", "/tmp/moviebook-prefs.json");

        let mut settings = Settings::default();
        settings.merge_env();
        clear_env();

        assert!(settings.general.debug);
        assert_eq!(settings.api.api_key, "env-key");
        assert_eq!(settings.api.search_url, "http://localhost:9000/search");
        assert_eq!(
            settings.suggestions.resolved_path(),
            PathBuf::from("/tmp/moviebook-prefs.json")
        );
    }

    #[test]
    #[serial]
    fn test_unparsable_debug_flag_is_off() {
        clear_env();
        std::env::set_var("MOVIEBOOK_DEBUG", "yes please");

        let mut settings = Settings::default();
        settings.general.debug = true;
        settings.merge_env();
        clear_env();

        assert!(!settings.general.debug);
    }

    #[test]
    #[serial]
    fn test_load_from_env_path_then_env_overrides() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(
            &path,
            "api:\n  api_key: file-key\ninput:\n  debounce_ms: 250\n",
        )
        .unwrap();

        std::env::set_var("MOVIEBOOK_SETTINGS_PATH", &path);
        assert_eq!(locate(), Some(path.clone()));
        let from_file = load().unwrap();

        std::env::set_var("MOVIEBOOK_API_KEY", "env-key");
        let overridden = load().unwrap();
        clear_env();

        assert_eq!(from_file.api.api_key, "file-key");
        assert_eq!(from_file.input.debounce_ms, 250);
        assert_eq!(from_file.input.min_query_len, 2);
        assert_eq!(overridden.api.api_key, "env-key");
        assert_eq!(overridden.input.debounce_ms, 250);
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        clear_env();
        std::env::set_var("MOVIEBOOK_API_KEY", "env-key");

        let settings = load_from(None).unwrap();
        clear_env();

        assert_eq!(settings.api.api_key, "env-key");
        assert!(settings.search.discard_stale_responses);
        assert_eq!(settings.suggestions.max_suggestions, 10);
    }

    #[test]
    #[serial]
    fn test_malformed_settings_file_is_an_error() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "input:\n  debounce_ms: soon\n").unwrap();

        assert!(load_from(Some(path.as_path())).is_err());
    }
}
