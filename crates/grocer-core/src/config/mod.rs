//! Price source configuration.
//!
//! Resolved from the environment the same way on every front-end; the CLI
//! may override the model from its own config file.

use crate::price_source::PriceSourceError;
use crate::util::{is_http_url, normalize_text_option};

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Older deployments exported the key under this generic name.
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings for the Gemini-backed price source
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, PriceSourceError> {
        Self::resolve(
            std::env::var(ENV_GEMINI_API_KEY)
                .ok()
                .or_else(|| std::env::var(ENV_API_KEY).ok()),
            std::env::var(ENV_GEMINI_MODEL).ok(),
            std::env::var(ENV_GEMINI_BASE_URL).ok(),
        )
    }

    /// Validate raw values, applying defaults for model and base URL.
    pub fn resolve(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, PriceSourceError> {
        let api_key = normalize_text_option(api_key).ok_or(PriceSourceError::NotConfigured)?;
        let model = normalize_text_option(model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = normalize_text_option(base_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !is_http_url(&base_url) {
            return Err(PriceSourceError::InvalidConfiguration(
                "GEMINI_BASE_URL must start with http:// or https://",
            ));
        }

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }

    /// Replace the model when `model` is a non-empty override.
    #[must_use]
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = normalize_text_option(model) {
            self.model = model;
        }
        self
    }
}
