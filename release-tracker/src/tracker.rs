//! Edit/state tracker: decides whether already-sent messages need rewriting and keeps the
//! tracked `{version, message_ids, content_hash}` record in step with what was dispatched.

use tracing::{info, warn};
use tracker_core::{MessageId, MessageState, ReleaseContent, Result, TrackerError};

use crate::dispatch::Dispatcher;
use crate::product::Product;
use crate::state::StateStore;

/// Result of [`EditTracker::apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Edited(Vec<MessageId>),
    /// The messages no longer exist; tracked state was cleared.
    TargetGone,
}

pub struct EditTracker<'a> {
    state: &'a StateStore,
    product: Product,
}

impl<'a> EditTracker<'a> {
    pub fn new(state: &'a StateStore, product: Product) -> Self {
        Self { state, product }
    }

    /// Tracked state that needs an edit: same version, different hash, at least one message id.
    /// `None` means nothing to do (no state, other version, or identical content).
    pub async fn pending_edit(&self, version_key: &str, content_hash: &str) -> Result<Option<MessageState>> {
        let Some(tracked) = self.state.message_state(self.product).await? else {
            return Ok(None);
        };
        if tracked.version != version_key {
            return Ok(None);
        }
        if tracked.content_hash == content_hash {
            info!(product = %self.product, version = version_key, "content unchanged");
            return Ok(None);
        }
        if tracked.message_ids.is_empty() {
            warn!(product = %self.product, version = version_key, "content changed but no message ids tracked");
            return Ok(None);
        }
        Ok(Some(tracked))
    }

    /// Edits the tracked messages and persists the new state. `EditTargetGone` clears the
    /// tracked state instead of failing; other errors are returned with the state untouched.
    pub async fn apply_edit(
        &self,
        tracked: &MessageState,
        release: &ReleaseContent,
        content_hash: &str,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<EditOutcome> {
        info!(
            product = %self.product,
            version = %tracked.version,
            message_ids = ?tracked.message_ids,
            "upstream content changed, editing sent messages"
        );
        match dispatcher.edit(&tracked.message_ids, release).await {
            Ok(ids) => {
                self.record(&tracked.version, ids.clone(), content_hash).await;
                Ok(EditOutcome::Edited(ids))
            }
            Err(TrackerError::EditTargetGone(reason)) => {
                warn!(
                    product = %self.product,
                    reason = %reason,
                    "tracked message is gone, clearing message state"
                );
                self.state.clear_message_state(self.product).await?;
                Ok(EditOutcome::TargetGone)
            }
            Err(e) => Err(e),
        }
    }

    /// Persists state after a successful dispatch. Failure is logged only: the notification
    /// already went out and the version record prevents a resend.
    pub async fn record(&self, version_key: &str, message_ids: Vec<MessageId>, content_hash: &str) {
        if message_ids.is_empty() {
            return;
        }
        let state = MessageState::new(version_key, message_ids, content_hash.to_string());
        match self.state.save_message_state(self.product, &state).await {
            Ok(()) => info!(product = %self.product, message_ids = ?state.message_ids, "message state saved"),
            Err(e) => warn!(product = %self.product, error = %e, "failed to save message state"),
        }
    }
}
