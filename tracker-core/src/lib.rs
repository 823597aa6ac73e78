//! # tracker-core
//!
//! Core types and traits for the release tracker: [`Notifier`], [`Translator`], [`Publisher`],
//! release/message-state records, the error taxonomy, retry policy and tracing initialization.
//! Transport-agnostic; used by tracker-telegram, translator and release-tracker.

pub mod error;
pub mod logger;
pub mod notifier;
pub mod retry;
pub mod types;

pub use error::{Result, TrackerError};
pub use logger::init_tracing;
pub use notifier::{Notifier, PublishedPage, Publisher, Translator};
pub use retry::RetryPolicy;
pub use types::{
    content_hash, utf16_len, DispatchDecision, MessageId, MessageState, ReleaseContent,
    MAX_MESSAGE_LENGTH,
};
