//! Per-product check flow: compare the upstream release with the saved version, then record,
//! edit or notify.

use tracing::{info, instrument, warn};
use tracker_core::{content_hash, MessageId, ReleaseContent, Result, Translator};

use crate::dispatch::Dispatcher;
use crate::product::Product;
use crate::sources::codex::EMPTY_BODY_PLACEHOLDER;
use crate::sources::LatestRelease;
use crate::state::StateStore;
use crate::tracker::{EditOutcome, EditTracker};

/// What a check did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No saved version: the current one was recorded without notifying.
    FirstRun { version: String },
    /// Same version and nothing to edit.
    UpToDate { version: String },
    /// Same version, changed content: sent messages were rewritten.
    Edited { version: String, message_ids: Vec<MessageId> },
    /// Same version, changed content, but the tracked messages were gone; state cleared.
    EditTargetGone { version: String },
    /// A new version was announced.
    Notified {
        previous: String,
        version: String,
        message_ids: Vec<MessageId>,
    },
    /// The source had no stable release.
    NoRelease,
}

pub struct ReleaseChecker<'a> {
    product: Product,
    state: &'a StateStore,
    translator: &'a dyn Translator,
    dispatcher: Dispatcher<'a>,
}

impl<'a> ReleaseChecker<'a> {
    pub fn new(
        product: Product,
        state: &'a StateStore,
        translator: &'a dyn Translator,
        dispatcher: Dispatcher<'a>,
    ) -> Self {
        Self {
            product,
            state,
            translator,
            dispatcher,
        }
    }

    pub fn product(&self) -> Product {
        self.product
    }

    /// Translates the body and assembles the content to dispatch. An empty body is shown as a
    /// placeholder and not translated; an empty translation means original language only.
    pub async fn prepare(&self, release: &LatestRelease) -> ReleaseContent {
        let (original, translated) = if release.body.trim().is_empty() {
            (EMPTY_BODY_PLACEHOLDER.to_string(), String::new())
        } else {
            let translated = self.translator.translate(&release.body).await;
            if translated.trim().is_empty() {
                warn!(product = %self.product, version = %release.display_version, "translation unavailable, sending original only");
            }
            (release.body.clone(), translated)
        };
        ReleaseContent::new(release.display_version.clone(), original)
            .with_translation(translated)
            .with_source_url(release.source_url.clone())
    }

    /// Runs the check against `saved`, the already-resolved last-seen version.
    #[instrument(skip(self, release, saved), fields(product = %self.product, version = %release.key))]
    pub async fn process(&self, release: &LatestRelease, saved: Option<&str>) -> Result<CheckOutcome> {
        let Some(saved) = saved else {
            self.state.save_version(self.product, &release.key).await?;
            info!("first run, recorded version without notifying");
            return Ok(CheckOutcome::FirstRun {
                version: release.key.clone(),
            });
        };

        let hash = content_hash(&release.body);
        let tracker = EditTracker::new(self.state, self.product);

        if saved == release.key {
            let Some(tracked) = tracker.pending_edit(&release.key, &hash).await? else {
                info!("already up to date");
                return Ok(CheckOutcome::UpToDate {
                    version: release.key.clone(),
                });
            };
            let content = self.prepare(release).await;
            return match tracker
                .apply_edit(&tracked, &content, &hash, &self.dispatcher)
                .await?
            {
                EditOutcome::Edited(message_ids) => Ok(CheckOutcome::Edited {
                    version: release.key.clone(),
                    message_ids,
                }),
                EditOutcome::TargetGone => Ok(CheckOutcome::EditTargetGone {
                    version: release.key.clone(),
                }),
            };
        }

        info!(previous = saved, "new version found");
        // Recorded before sending so a failed save cannot cause a duplicate announcement.
        self.state.save_version(self.product, &release.key).await?;

        let content = self.prepare(release).await;
        let message_ids = self.dispatcher.dispatch(&content).await?;
        tracker.record(&release.key, message_ids.clone(), &hash).await;

        Ok(CheckOutcome::Notified {
            previous: saved.to_string(),
            version: release.key.clone(),
            message_ids,
        })
    }

    /// Sends a release without comparing or touching any record.
    #[instrument(skip(self, release), fields(product = %self.product, version = %release.key))]
    pub async fn force_push(&self, release: &LatestRelease) -> Result<Vec<MessageId>> {
        let content = self.prepare(release).await;
        let ids = self.dispatcher.dispatch(&content).await?;
        info!(message_ids = ?ids, "force push done, records unchanged");
        Ok(ids)
    }
}
