//! [`Notifier`] over teloxide.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, MessageId as TgMessageId, ParseMode, Recipient};
use tracing::{info, warn};
use tracker_core::{MessageId, Notifier, Result, RetryPolicy, TrackerError};

use crate::config::{parse_recipient, TelegramConfig};
use crate::errors::{classify_request_error, extract_retry_after_seconds, is_message_not_modified_error};

/// Sends MarkdownV2 messages with link previews disabled to one chat.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
    retry: RetryPolicy,
}

fn no_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

impl TelegramNotifier {
    /// Builds the bot from config, pointing it at a custom Bot API server when one is set.
    pub fn from_config(config: &TelegramConfig, retry: RetryPolicy) -> Result<Self> {
        let mut bot = Bot::new(config.bot_token.clone());
        if let Some(url) = config.telegram_api_url.as_deref() {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| TrackerError::Config(format!("invalid TELEGRAM_API_URL {url}: {e}")))?;
            bot = bot.set_api_url(parsed);
            info!(api_url = %url, "Using custom Telegram API URL");
        }
        Ok(Self::new(bot, parse_recipient(&config.chat_id), retry))
    }

    pub fn new(bot: Bot, recipient: Recipient, retry: RetryPolicy) -> Self {
        Self {
            bot,
            recipient,
            retry,
        }
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    fn log_failure(action: &str, error: &TrackerError) {
        let text = error.to_string();
        match extract_retry_after_seconds(&text) {
            Some(secs) => warn!(action, retry_after = secs, error = %text, "Telegram rate limit"),
            None => warn!(action, error = %text, "Telegram request failed"),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<MessageId> {
        let (bot, recipient) = (&self.bot, &self.recipient);
        let id = self
            .retry
            .run("telegram.send", || async move {
                bot.send_message(recipient.clone(), text)
                    .parse_mode(ParseMode::MarkdownV2)
                    .link_preview_options(no_link_preview())
                    .await
                    .map(|message| message.id.0)
                    .map_err(|e| {
                        let err = classify_request_error(&e);
                        Self::log_failure("send", &err);
                        err
                    })
            })
            .await?;
        info!(message_id = id, "Telegram message sent");
        Ok(id)
    }

    async fn edit(&self, message_id: MessageId, text: &str) -> Result<()> {
        let (bot, recipient) = (&self.bot, &self.recipient);
        self.retry
            .run("telegram.edit", || async move {
                let outcome = bot
                    .edit_message_text(recipient.clone(), TgMessageId(message_id), text)
                    .parse_mode(ParseMode::MarkdownV2)
                    .link_preview_options(no_link_preview())
                    .await;
                match outcome {
                    Ok(_) => Ok(()),
                    Err(e) if is_message_not_modified_error(&e.to_string()) => {
                        info!(message_id, "Telegram message not modified, treating as success");
                        Ok(())
                    }
                    Err(e) => {
                        let err = classify_request_error(&e);
                        Self::log_failure("edit", &err);
                        Err(err)
                    }
                }
            })
            .await?;
        info!(message_id, "Telegram message edited");
        Ok(())
    }
}
