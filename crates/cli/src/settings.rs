use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-user defaults read from `<config dir>/subcue/settings.json`.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub language_code: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub max_wait_secs: Option<u64>,
    pub max_cue_duration_secs: Option<f64>,
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("subcue").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or unreadable files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid settings file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_remaining_fields_with_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{"bucket": "captions", "max_wait_secs": 600}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.bucket.as_deref(), Some("captions"));
        assert_eq!(settings.max_wait_secs, Some(600));
        assert!(settings.region.is_none());
    }

    #[test]
    fn test_invalid_json_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_round_trips_through_json() {
        let settings = Settings {
            region: Some("eu-west-1".to_string()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
