//! Dispatch policy: send or edit one release as a combined message, a split pair, or a short
//! link to a Telegraph page.

use changelog_text::{markdown_to_html, strip_changelog_section};
use tracing::{info, instrument, warn};
use tracker_core::{
    DispatchDecision, MessageId, Notifier, PublishedPage, Publisher, ReleaseContent, Result,
    TrackerError,
};

use crate::messages::BilingualMessages;

/// Sends and edits release notifications for one product channel.
pub struct Dispatcher<'a> {
    notifier: &'a dyn Notifier,
    publisher: &'a dyn Publisher,
    product_title: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        notifier: &'a dyn Notifier,
        publisher: &'a dyn Publisher,
        product_title: &'a str,
    ) -> Self {
        Self {
            notifier,
            publisher,
            product_title,
        }
    }

    pub fn product_title(&self) -> &str {
        self.product_title
    }

    /// Sends a new notification and returns the ids of the messages it produced.
    #[instrument(skip(self, release), fields(product = %self.product_title, version = %release.version))]
    pub async fn dispatch(&self, release: &ReleaseContent) -> Result<Vec<MessageId>> {
        let msgs = BilingualMessages::build(self.product_title, release);
        match msgs.decision() {
            DispatchDecision::Combined => {
                info!(length = msgs.combined_len(), "sending combined message");
                let id = self.notifier.send(&msgs.combined_rendered).await?;
                Ok(vec![id])
            }
            DispatchDecision::SplitBilingual => {
                info!(
                    combined = msgs.combined_len(),
                    en = msgs.en_len(),
                    cn = msgs.cn_len(),
                    "combined message too long, sending English and Chinese separately"
                );
                let en = self.notifier.send(&msgs.en_rendered).await?;
                let cn = self.notifier.send(&msgs.cn_rendered).await.map_err(|e| {
                    warn!(sent = en, error = %e, "Chinese message failed after English was sent");
                    e
                })?;
                Ok(vec![en, cn])
            }
            DispatchDecision::ExternalFallback => {
                info!(
                    en = msgs.en_len(),
                    cn = msgs.cn_len(),
                    "single message too long, publishing to Telegraph"
                );
                let page = self.publish(release).await?;
                let id = self.notifier.send(&msgs.short_en(&page.url)).await?;
                Ok(vec![id])
            }
        }
    }

    /// Rewrites previously sent messages in place and returns the ids now tracked.
    ///
    /// One id and content that outgrew a single message: the first message becomes the
    /// English half and the Chinese half is sent as a new message.
    #[instrument(skip(self, release), fields(product = %self.product_title, version = %release.version))]
    pub async fn edit(
        &self,
        message_ids: &[MessageId],
        release: &ReleaseContent,
    ) -> Result<Vec<MessageId>> {
        let Some(&first) = message_ids.first() else {
            return Err(TrackerError::EditTargetGone(
                "no tracked message ids".to_string(),
            ));
        };
        let msgs = BilingualMessages::build(self.product_title, release);
        let decision = msgs.decision();

        if decision == DispatchDecision::ExternalFallback {
            info!(
                en = msgs.en_len(),
                cn = msgs.cn_len(),
                "edited content too long, publishing to Telegraph"
            );
            let page = self.publish(release).await?;
            let short_en = msgs.short_en(&page.url);
            let short_cn = msgs.short_cn(&page.url);
            for (idx, &id) in message_ids.iter().enumerate() {
                let text = if idx == 0 { &short_en } else { &short_cn };
                self.notifier.edit(id, text).await?;
            }
            return Ok(message_ids.to_vec());
        }

        if message_ids.len() == 1 {
            if decision == DispatchDecision::Combined {
                self.notifier.edit(first, &msgs.combined_rendered).await?;
                return Ok(vec![first]);
            }
            info!(
                combined = msgs.combined_len(),
                "edited content too long for one message, splitting"
            );
            self.notifier.edit(first, &msgs.en_rendered).await?;
            let cn = self.notifier.send(&msgs.cn_rendered).await?;
            return Ok(vec![first, cn]);
        }

        self.notifier.edit(first, &msgs.en_rendered).await?;
        self.notifier.edit(message_ids[1], &msgs.cn_rendered).await?;
        Ok(message_ids.to_vec())
    }

    /// Publishes both languages; on a size rejection retries once without the Changelog section.
    async fn publish(&self, release: &ReleaseContent) -> Result<PublishedPage> {
        let title = format!("{} {} Release Notes", self.product_title, release.version);
        let html = page_html(&release.original_text, &release.translated_text);
        match self.publisher.publish(&title, &html).await {
            Err(TrackerError::ContentTooLarge) => {
                warn!(title = %title, "Telegraph page too large, retrying without Changelog section");
                let html = page_html(
                    &strip_changelog_section(&release.original_text),
                    &strip_changelog_section(&release.translated_text),
                );
                self.publisher.publish(&title, &html).await
            }
            other => other,
        }
    }
}

fn page_html(original: &str, translated: &str) -> String {
    let mut parts = vec![markdown_to_html(original)];
    if !translated.trim().is_empty() {
        parts.push("<hr>".to_string());
        parts.push(markdown_to_html(translated));
    }
    parts.join("\n")
}
