//! Core types: release content, persisted message state, dispatch decision.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hard per-message ceiling of the messaging platform, in UTF-16 code units.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Platform message identifier (Telegram numeric id).
pub type MessageId = i32;

/// One fetched release. Immutable once built by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContent {
    /// Version shown to readers (e.g. `2.1.49` or a release title).
    pub version: String,
    pub original_text: String,
    /// Empty when no translation is available.
    pub translated_text: String,
    /// Link used in message titles.
    pub source_url: Option<String>,
}

impl ReleaseContent {
    pub fn new(version: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            original_text: original_text.into(),
            translated_text: String::new(),
            source_url: None,
        }
    }

    pub fn with_translation(mut self, translated: impl Into<String>) -> Self {
        self.translated_text = translated.into();
        self
    }

    pub fn with_source_url(mut self, url: Option<String>) -> Self {
        self.source_url = url;
        self
    }

    pub fn has_translation(&self) -> bool {
        !self.translated_text.trim().is_empty()
    }
}

/// Tracked notification for one product line. Overwritten on each successful send/edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageState {
    pub version: String,
    pub message_ids: Vec<MessageId>,
    /// Hash of the upstream body the messages were rendered from.
    #[serde(alias = "body_hash")]
    pub content_hash: String,
}

impl MessageState {
    pub fn new(version: impl Into<String>, message_ids: Vec<MessageId>, content_hash: String) -> Self {
        Self {
            version: version.into(),
            message_ids,
            content_hash,
        }
    }
}

/// How a bilingual release is delivered; derived from rendered lengths, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchDecision {
    /// Both languages in one message.
    Combined,
    /// English message then Chinese message.
    SplitBilingual,
    /// Published externally; a short message links to it.
    ExternalFallback,
}

/// SHA-256 hex digest of a release body. Empty body hashes to the empty string.
pub fn content_hash(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    format!("{:x}", Sha256::digest(body.as_bytes()))
}

/// Length as the messaging platform counts it.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_stable_and_distinct() {
        let a = content_hash("- Fixed a bug");
        assert_eq!(a, content_hash("- Fixed a bug"));
        assert_ne!(a, content_hash("- Fixed two bugs"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_content_hash_empty_body() {
        assert_eq!(content_hash(""), "");
    }

    #[test]
    fn test_utf16_len_counts_units() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("发布"), 2);
        assert_eq!(utf16_len("🚀"), 2);
    }

    #[test]
    fn test_message_state_reads_legacy_field_name() {
        let json = r#"{"version":"2.0.1","message_ids":[10,11],"body_hash":"abc"}"#;
        let state: MessageState = serde_json::from_str(json).unwrap();
        assert_eq!(state.message_ids, vec![10, 11]);
        assert_eq!(state.content_hash, "abc");
    }

    #[test]
    fn test_release_content_translation_flag() {
        let release = ReleaseContent::new("1.0.0", "body");
        assert!(!release.has_translation());
        assert!(release.with_translation("  ").translated_text.trim().is_empty());
        let release = ReleaseContent::new("1.0.0", "body").with_translation("正文");
        assert!(release.has_translation());
    }
}
