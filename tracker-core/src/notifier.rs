//! Collaborator abstractions: messaging transport, translation service, long-form publisher.
//!
//! [`Notifier`] is transport-agnostic; tracker-telegram implements it via teloxide.

use crate::error::Result;
use crate::types::MessageId;
use async_trait::async_trait;

/// Sends and edits messages in one channel. Text is already in the platform's markup dialect.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a message and returns its id (for later `edit`).
    async fn send(&self, text: &str) -> Result<MessageId>;
    /// Replaces the text of an already-sent message.
    async fn edit(&self, message_id: MessageId, text: &str) -> Result<()>;
}

/// Text-to-text translation. Returns an empty string when no translation is available;
/// callers treat that as "original language only", not as an error.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> String;
}

/// A page created on the long-form host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPage {
    pub url: String,
    pub path: String,
}

/// Publishes oversized content externally. Returns [`crate::TrackerError::ContentTooLarge`]
/// when the host rejects the page size.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, title: &str, html: &str) -> Result<PublishedPage>;
}
