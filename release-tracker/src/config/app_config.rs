//! AppConfig: BaseConfig + per-product Telegram channels + translator. Use load() for env-based loading.

use anyhow::{Context, Result};
use tracker_telegram::{TelegramConfig, TelegraphConfig};
use translator::TranslatorConfig;

use super::BaseConfig;
use crate::product::Product;

/// Full tracker config. Call validate() after load() to fail fast before any network call.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base: BaseConfig,
    /// CLAUDE_CODE_BOT_TOKEN / CLAUDE_CODE_CHAT_ID
    pub claude_code: Option<TelegramConfig>,
    /// CODEX_BOT_TOKEN / CODEX_CHAT_ID
    pub codex: Option<TelegramConfig>,
    pub translator: TranslatorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let base = BaseConfig::load()?;
        let claude_code = TelegramConfig::from_env_prefixed(Product::ClaudeCode.env_prefix())
            .context("Claude Code channel")?;
        let codex = TelegramConfig::from_env_prefixed(Product::Codex.env_prefix())
            .context("Codex channel")?;
        let translator = TranslatorConfig::from_env();
        Ok(Self {
            base,
            claude_code,
            codex,
            translator,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if self.translator.is_enabled() && reqwest::Url::parse(&self.translator.base_url).is_err() {
            anyhow::bail!("LLM_BASE_URL is not a valid URL: {}", self.translator.base_url);
        }
        Ok(())
    }

    /// Channel of one product; an unconfigured channel is an error for that product only.
    pub fn telegram(&self, product: Product) -> Result<&TelegramConfig> {
        let channel = match product {
            Product::ClaudeCode => self.claude_code.as_ref(),
            Product::Codex => self.codex.as_ref(),
        };
        channel.with_context(|| {
            let prefix = product.env_prefix();
            format!("{prefix}_BOT_TOKEN / {prefix}_CHAT_ID not set, cannot notify {product}")
        })
    }

    /// Telegraph account with the product's byline unless overridden.
    pub fn telegraph(&self, product: Product) -> TelegraphConfig {
        let (default_name, default_url) = product.default_author();
        TelegraphConfig::new(
            self.base.telegraph_access_token.clone(),
            self.base.telegraph_author_name.as_deref().unwrap_or(default_name),
            self.base.telegraph_author_url.as_deref().unwrap_or(default_url),
        )
    }

    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
}
