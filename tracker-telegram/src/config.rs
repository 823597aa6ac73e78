//! 单个频道的 Telegram 配置：token、目标 chat、可选 API URL。
//! 从环境变量 `{PREFIX}_BOT_TOKEN`、`{PREFIX}_CHAT_ID`、`TELEGRAM_API_URL` 加载。

use anyhow::Result;
use std::env;
use teloxide::types::{ChatId, Recipient};

/// Bot credentials and destination for one product channel.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub telegram_api_url: Option<String>,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}

impl TelegramConfig {
    /// Loads `{prefix}_BOT_TOKEN` and `{prefix}_CHAT_ID`; both must be non-empty.
    /// `Ok(None)` when neither is set, so a product channel can be left unconfigured.
    pub fn from_env_prefixed(prefix: &str) -> Result<Option<Self>> {
        let token_key = format!("{prefix}_BOT_TOKEN");
        let chat_key = format!("{prefix}_CHAT_ID");
        let bot_token = non_empty_var(&token_key);
        let chat_id = non_empty_var(&chat_key);
        let telegram_api_url = non_empty_var("TELEGRAM_API_URL");

        match (bot_token, chat_id) {
            (None, None) => Ok(None),
            (Some(bot_token), Some(chat_id)) => Ok(Some(Self {
                bot_token,
                chat_id,
                telegram_api_url,
            })),
            (None, Some(_)) => anyhow::bail!("{token_key} not set"),
            (Some(_), None) => anyhow::bail!("{chat_key} not set"),
        }
    }

    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            telegram_api_url: None,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_api_url = Some(url.into());
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Numeric ids (`-100…`) address a chat directly; anything else is a public `@channel`.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{chat_id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear(prefix: &str) {
        env::remove_var(format!("{prefix}_BOT_TOKEN"));
        env::remove_var(format!("{prefix}_CHAT_ID"));
        env::remove_var("TELEGRAM_API_URL");
    }

    #[test]
    #[serial]
    fn test_unconfigured_channel_is_none() {
        clear("TEST_CHAN");
        assert!(TelegramConfig::from_env_prefixed("TEST_CHAN").unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_full_channel() {
        clear("TEST_CHAN");
        env::set_var("TEST_CHAN_BOT_TOKEN", "123:abc");
        env::set_var("TEST_CHAN_CHAT_ID", "@my_channel");
        env::set_var("TELEGRAM_API_URL", "http://localhost:8081");
        let config = TelegramConfig::from_env_prefixed("TEST_CHAN").unwrap().unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.chat_id, "@my_channel");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://localhost:8081"));
        assert!(!format!("{config:?}").contains("123:abc"));
        clear("TEST_CHAN");
    }

    #[test]
    #[serial]
    fn test_half_configured_channel_errors() {
        clear("TEST_CHAN");
        env::set_var("TEST_CHAN_BOT_TOKEN", "123:abc");
        let err = TelegramConfig::from_env_prefixed("TEST_CHAN").unwrap_err();
        assert!(err.to_string().contains("TEST_CHAN_CHAT_ID"));
        clear("TEST_CHAN");
    }

    #[test]
    fn test_parse_recipient() {
        assert_eq!(
            parse_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        );
        assert_eq!(
            parse_recipient("@claude_code_push"),
            Recipient::ChannelUsername("@claude_code_push".to_string())
        );
        assert_eq!(
            parse_recipient("codex_push"),
            Recipient::ChannelUsername("@codex_push".to_string())
        );
    }
}
