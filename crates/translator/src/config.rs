//! Translator configuration loaded from the environment.

use std::env;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorConfig {
    /// `None` disables translation.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl TranslatorConfig {
    /// Reads `LLM_API_KEY`, `LLM_BASE_URL` and `LLM_MODEL`.
    ///
    /// A LiteLLM-style `openrouter/` model prefix is dropped since requests go straight to the
    /// configured base URL.
    pub fn from_env() -> Self {
        let api_key = env::var("LLM_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let base_url = env::var("LLM_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = env::var("LLM_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|m| normalize_model(&m))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            api_key,
            base_url,
            model,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

fn normalize_model(model: &str) -> String {
    model
        .trim()
        .strip_prefix("openrouter/")
        .unwrap_or(model.trim())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        env::remove_var("LLM_API_KEY");
        env::remove_var("LLM_BASE_URL");
        env::remove_var("LLM_MODEL");
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear();
        let config = TranslatorConfig::from_env();
        assert_eq!(config, TranslatorConfig::default());
        assert!(!config.is_enabled());
    }

    #[test]
    #[serial]
    fn test_reads_env_and_strips_litellm_prefix() {
        clear();
        env::set_var("LLM_API_KEY", "sk-test");
        env::set_var("LLM_MODEL", "openrouter/google/gemini-2.5-flash");
        env::set_var("LLM_BASE_URL", "http://localhost:4000/v1");
        let config = TranslatorConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "google/gemini-2.5-flash");
        assert_eq!(config.base_url, "http://localhost:4000/v1");
        clear();
    }

    #[test]
    #[serial]
    fn test_blank_key_disables() {
        clear();
        env::set_var("LLM_API_KEY", "   ");
        assert!(!TranslatorConfig::from_env().is_enabled());
        clear();
    }
}
