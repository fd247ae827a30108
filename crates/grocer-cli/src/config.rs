//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use grocer_core::util::{is_http_url, normalize_text_option};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";

/// Origin of new lists when none is configured; the dev server's address.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    /// Origin used for fresh lists and share links
    #[serde(default)]
    pub origin: Option<String>,
    /// Gemini model override
    #[serde(default)]
    pub model: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("grocer").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Configured origin, or [`DEFAULT_ORIGIN`].
    pub fn origin(&self) -> String {
        normalize_text_option(self.origin.clone()).unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
    }

    pub fn set_origin(&mut self, origin: &str) -> Result<(), String> {
        let origin = origin.trim().trim_end_matches('/');
        if !is_http_url(origin) {
            return Err(format!(
                "origin must include http:// or https://, got '{origin}'"
            ));
        }
        self.origin = Some(origin.to_string());
        Ok(())
    }

    fn normalize(&mut self) {
        self.origin = normalize_text_option(self.origin.clone())
            .map(|origin| origin.trim_end_matches('/').to_string());
        self.model = normalize_text_option(self.model.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "grocer-cli-config-test-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |duration| duration.as_nanos())
        ))
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = CliConfig::load_from_path(&temp_config_path()).unwrap();
        assert_eq!(config.origin(), DEFAULT_ORIGIN);
        assert_eq!(config.model, None);
    }

    #[test]
    fn config_roundtrip_normalizes_values() {
        let path = temp_config_path();
        let config = CliConfig {
            version: 1,
            origin: Some(" https://grocer.example/ ".to_string()),
            model: Some("   ".to_string()),
        };

        config.save_to_path(&path).unwrap();
        let loaded = CliConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.origin.as_deref(), Some("https://grocer.example"));
        assert_eq!(loaded.model, None);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn set_origin_requires_http_scheme() {
        let mut config = CliConfig::default();
        assert!(config.set_origin("grocer.example").is_err());
        config.set_origin("https://grocer.example/").unwrap();
        assert_eq!(config.origin(), "https://grocer.example");
    }
}
