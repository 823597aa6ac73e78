//! # OpenAI-compatible chat client
//!
//! Thin wrapper around [async-openai] for single-shot chat completion against OpenAI or any
//! compatible endpoint (OpenRouter, local gateways). Keys are only ever logged masked.

use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;

pub use async_openai::types::ChatCompletionRequestMessage;

/// Masks an API key for logging: first 7 chars + `***` + last 4 chars.
/// Keys of 11 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}

/// Sampling options for one completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Chat client bound to one endpoint and key.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    masked_key: String,
    base_url: Option<String>,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("api_key", &self.masked_key)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAIClient {
    /// Client against the default OpenAI API base.
    pub fn new(api_key: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            masked_key,
            base_url: None,
        }
    }

    /// Client against a compatible endpoint, e.g. `https://openrouter.ai/api/v1`.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            masked_key,
            base_url: Some(base_url),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Builds the two-message `[system, user]` conversation most one-shot tasks need.
    pub fn system_and_user(
        system: &str,
        user: &str,
    ) -> anyhow::Result<Vec<ChatCompletionRequestMessage>> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system)
            .build()?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user)
            .build()?;
        Ok(vec![system.into(), user.into()])
    }

    /// Sends a chat completion and returns the first choice's content.
    ///
    /// Errors when the request fails or the response carries no choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        options: &CompletionOptions,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key,
            "chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if let Some(t) = options.temperature {
            args.temperature(t);
        }
        if let Some(m) = options.max_tokens {
            args.max_tokens(m);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => anyhow::bail!("completion response has no choices"),
        }
    }
}
