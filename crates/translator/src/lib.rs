//! # translator
//!
//! [`LlmTranslator`] translates release notes into Chinese with a glossary-constrained prompt;
//! [`DisabledTranslator`] stands in when no API key is configured. Both implement
//! [`tracker_core::Translator`], whose contract is "empty string on any failure".

pub mod config;
mod llm;
mod prompt;

use async_trait::async_trait;
use tracker_core::Translator;

pub use config::TranslatorConfig;
pub use llm::LlmTranslator;
pub use prompt::{build_translation_prompt, PRESERVED_TERMS};

/// Always returns an empty translation, so messages go out in the original language only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _text: &str) -> String {
        String::new()
    }
}

/// Picks the LLM translator when a key is configured, otherwise [`DisabledTranslator`].
pub fn translator_from_config(config: &TranslatorConfig) -> Box<dyn Translator> {
    match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Box::new(LlmTranslator::new(config)),
        _ => {
            tracing::warn!("LLM_API_KEY not set, translation disabled");
            Box::new(DisabledTranslator)
        }
    }
}
