//! Persisted per-product records over a [`KvStore`]: last-seen version, message state, and
//! the pushed-versions list used by history push.

use std::collections::BTreeSet;
use std::sync::Arc;

use storage::{get_json, put_json, KvStore, StorageError};
use tracing::warn;
use tracker_core::{MessageState, Result, TrackerError};

use crate::product::Product;

fn storage_err(e: StorageError) -> TrackerError {
    TrackerError::Storage(e.to_string())
}

#[derive(Clone)]
pub struct StateStore {
    kv: Arc<dyn KvStore>,
}

impl StateStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Last-seen version, trimmed; an empty record counts as absent.
    pub async fn saved_version(&self, product: Product) -> Result<Option<String>> {
        let value = self
            .kv
            .get(&product.version_key())
            .await
            .map_err(storage_err)?;
        Ok(value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    pub async fn save_version(&self, product: Product, version: &str) -> Result<()> {
        self.kv
            .put(&product.version_key(), version)
            .await
            .map_err(storage_err)
    }

    /// Tracked message state. An unreadable record is logged and treated as absent.
    pub async fn message_state(&self, product: Product) -> Result<Option<MessageState>> {
        match get_json::<MessageState>(self.kv.as_ref(), &product.message_state_key()).await {
            Ok(state) => Ok(state),
            Err(StorageError::Serialization(e)) => {
                warn!(product = %product, error = %e, "ignoring unreadable message state");
                Ok(None)
            }
            Err(e) => Err(storage_err(e)),
        }
    }

    pub async fn save_message_state(&self, product: Product, state: &MessageState) -> Result<()> {
        put_json(self.kv.as_ref(), &product.message_state_key(), state)
            .await
            .map_err(storage_err)
    }

    /// Returns whether a record existed.
    pub async fn clear_message_state(&self, product: Product) -> Result<bool> {
        self.kv
            .delete(&product.message_state_key())
            .await
            .map_err(storage_err)
    }

    pub async fn pushed_versions(&self, product: Product) -> Result<BTreeSet<String>> {
        let value = self
            .kv
            .get(&product.pushed_versions_key())
            .await
            .map_err(storage_err)?;
        Ok(value
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Appends one version line, keeping earlier lines in order.
    pub async fn append_pushed_version(&self, product: Product, version: &str) -> Result<()> {
        let key = product.pushed_versions_key();
        let mut content = self.kv.get(&key).await.map_err(storage_err)?.unwrap_or_default();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(version);
        content.push('\n');
        self.kv.put(&key, &content).await.map_err(storage_err)
    }
}
