//! # tracker-telegram
//!
//! Telegram-side collaborators of the release tracker:
//!
//! - [`TelegramNotifier`] – [`tracker_core::Notifier`] over teloxide, MarkdownV2, link previews off
//! - [`TelegraphPublisher`] – [`tracker_core::Publisher`] over the Telegraph `createPage` API
//! - [`errors`] – maps Bot API failures onto [`tracker_core::TrackerError`]

pub mod config;
pub mod errors;
pub mod notifier;
pub mod telegraph;

pub use config::{parse_recipient, TelegramConfig};
pub use errors::{classify_api_error, is_edit_target_gone_error, is_message_not_modified_error};
pub use notifier::TelegramNotifier;
pub use telegraph::{TelegraphConfig, TelegraphPublisher, TELEGRAPH_API};
