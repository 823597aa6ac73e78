//! Component factory: builds the state store and each product's collaborators from config.
//! Keeps assembly out of the check and history flows, which only see trait objects.

use std::sync::Arc;

use anyhow::{Context, Result};
use storage::{FileKvStore, InMemoryKvStore, KvStore, SqliteKvStore};
use tracing::{info, instrument, warn};
use tracker_core::{Notifier, Publisher, RetryPolicy, Translator};
use tracker_telegram::{TelegramNotifier, TelegraphPublisher};
use translator::translator_from_config;

use crate::checker::ReleaseChecker;
use crate::config::{AppConfig, StateBackend, StateConfig};
use crate::dispatch::Dispatcher;
use crate::product::Product;
use crate::state::StateStore;

/// Everything one product's checks and pushes talk to.
pub struct ProductComponents {
    pub product: Product,
    pub notifier: Box<dyn Notifier>,
    pub publisher: Box<dyn Publisher>,
    pub translator: Box<dyn Translator>,
    pub state: StateStore,
    /// Used around whole dispatches (history push) and as the pause between them.
    pub retry: RetryPolicy,
}

impl ProductComponents {
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(
            self.notifier.as_ref(),
            self.publisher.as_ref(),
            self.product.title(),
        )
    }

    pub fn checker(&self) -> ReleaseChecker<'_> {
        ReleaseChecker::new(
            self.product,
            &self.state,
            self.translator.as_ref(),
            self.dispatcher(),
        )
    }
}

/// Opens the configured key-value backend.
#[instrument(skip(config), fields(backend = ?config.backend))]
pub async fn create_kv_store(config: &StateConfig) -> Result<Arc<dyn KvStore>> {
    let store: Arc<dyn KvStore> = match config.backend {
        StateBackend::File => {
            info!(dir = %config.dir.display(), "Using file state store");
            Arc::new(FileKvStore::new(config.dir.clone()))
        }
        StateBackend::Sqlite => {
            if !config.database_url.starts_with("sqlite:") {
                if let Some(parent) = std::path::Path::new(&config.database_url).parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).with_context(|| {
                            format!("Failed to create state directory {}", parent.display())
                        })?;
                    }
                }
            }
            info!(database_url = %config.database_url, "Using SQLite state store");
            Arc::new(
                SqliteKvStore::new(&config.database_url)
                    .await
                    .context("Failed to initialize SQLite state store")?,
            )
        }
        StateBackend::Memory => {
            warn!("Using in-memory state store, nothing will be persisted");
            Arc::new(InMemoryKvStore::new())
        }
    };
    Ok(store)
}

/// Builds the notifier, publisher and translator of one product over a shared store.
pub fn build_product_components(
    config: &AppConfig,
    product: Product,
    kv: Arc<dyn KvStore>,
) -> Result<ProductComponents> {
    let retry = config.base.retry;
    let telegram = config.telegram(product)?;
    let notifier = TelegramNotifier::from_config(telegram, retry)
        .with_context(|| format!("Failed to create Telegram notifier for {product}"))?;

    let telegraph = config.telegraph(product);
    if telegraph.access_token.is_none() {
        warn!(product = %product, "TELEGRAPH_ACCESS_TOKEN not set, oversized releases cannot be published");
    }
    let publisher = TelegraphPublisher::new(telegraph, retry)
        .with_context(|| format!("Failed to create Telegraph publisher for {product}"))?;

    Ok(ProductComponents {
        product,
        notifier: Box::new(notifier),
        publisher: Box::new(publisher),
        translator: translator_from_config(&config.translator),
        state: StateStore::new(kv),
        retry,
    })
}
