//! LLM-backed [`Translator`].

use async_trait::async_trait;
use openai_client::{CompletionOptions, OpenAIClient};
use tracker_core::Translator;

use crate::config::TranslatorConfig;
use crate::prompt::build_translation_prompt;

/// Translates through an OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmTranslator {
    client: OpenAIClient,
    model: String,
    options: CompletionOptions,
}

impl LlmTranslator {
    /// Builds a translator from config. A missing key yields a client whose calls fail,
    /// which the [`Translator`] contract turns into empty translations.
    pub fn new(config: &TranslatorConfig) -> Self {
        let key = config.api_key.clone().unwrap_or_default();
        Self {
            client: OpenAIClient::with_base_url(key, config.base_url.clone()),
            model: config.model.clone(),
            options: CompletionOptions::default().with_temperature(config.temperature),
        }
    }

    async fn request(&self, text: &str) -> anyhow::Result<String> {
        let messages = OpenAIClient::system_and_user(
            "You are a professional technical translator.",
            &build_translation_prompt(text),
        )?;
        let reply = self
            .client
            .chat_completion(&self.model, messages, &self.options)
            .await?;
        Ok(reply.trim().to_string())
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        match self.request(text).await {
            Ok(translated) => {
                tracing::info!(chars = translated.chars().count(), "translation done");
                translated
            }
            Err(e) => {
                tracing::warn!(error = %e, model = %self.model, "translation failed");
                String::new()
            }
        }
    }
}
