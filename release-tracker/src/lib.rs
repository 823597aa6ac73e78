//! # release-tracker
//!
//! Polls the Claude Code changelog and the OpenAI Codex releases feed and announces new
//! versions on Telegram in English and Chinese.
//!
//! ## Modules
//!
//! - [`sources`] – upstream release fetching and parsing
//! - [`messages`] – bilingual message construction and length measurement
//! - [`dispatch`] – combined / split / Telegraph-fallback sending and editing
//! - [`tracker`] – edit tracking against the persisted message state
//! - [`checker`] – per-product check flow
//! - [`runner`] – product runs (saved-version resolution, forced push)
//! - [`history`] – pushing versions that were never announced
//! - [`config`], [`components`], [`cli`] – wiring for the binary

pub mod checker;
pub mod cli;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod messages;
pub mod product;
pub mod runner;
pub mod sources;
pub mod state;
pub mod tracker;

pub use checker::{CheckOutcome, ReleaseChecker};
pub use cli::{CheckTarget, Cli, Commands};
pub use components::{build_product_components, create_kv_store, ProductComponents};
pub use config::AppConfig;
pub use dispatch::Dispatcher;
pub use history::{push_history, HistoryLimit, HistoryReport};
pub use messages::BilingualMessages;
pub use product::Product;
pub use sources::LatestRelease;
pub use state::StateStore;
pub use tracker::{EditOutcome, EditTracker};
