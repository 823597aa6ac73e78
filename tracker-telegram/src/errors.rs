//! Bot API error classification.
//!
//! - **[`is_message_not_modified_error`]** – edit with identical content; callers treat it as success
//! - **[`is_edit_target_gone_error`]** – the message to edit no longer exists or cannot be edited
//! - **[`classify_api_error`]** – maps a failure description onto [`TrackerError`]

use teloxide::RequestError;
use tracker_core::TrackerError;

pub fn is_message_not_modified_error(error: &str) -> bool {
    error.contains("message is not modified") || error.contains("exactly the same")
}

pub fn is_edit_target_gone_error(error: &str) -> bool {
    let lower = error.to_lowercase();
    lower.contains("message to edit not found")
        || lower.contains("message not found")
        || lower.contains("message can't be edited")
        || lower.contains("message_id_invalid")
        || lower.contains("message identifier is not specified")
}

fn is_network_error(error: &str) -> bool {
    let lower = error.to_lowercase();
    lower.contains("too many requests")
        || lower.contains("retry after")
        || lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connection")
        || lower.contains("network")
}

/// Parses "Retry after Ns" from a Bot API error string.
pub fn extract_retry_after_seconds(error: &str) -> Option<u64> {
    let lower = error.to_lowercase();
    let start = lower.find("retry after ")? + "retry after ".len();
    let digits: String = lower[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Classifies an error description. "Not modified" is not handled here; edit paths check it first.
pub fn classify_api_error(error: &str) -> TrackerError {
    if is_edit_target_gone_error(error) {
        TrackerError::EditTargetGone(error.to_string())
    } else if is_network_error(error) {
        TrackerError::Network(error.to_string())
    } else {
        TrackerError::Api(error.to_string())
    }
}

/// Maps a teloxide request failure; transport-level variants are always transient.
pub fn classify_request_error(error: &RequestError) -> TrackerError {
    match error {
        RequestError::Network(_) | RequestError::Io(_) | RequestError::RetryAfter(_) => {
            TrackerError::Network(error.to_string())
        }
        _ => classify_api_error(&error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_modified() {
        assert!(is_message_not_modified_error(
            "Bad Request: message is not modified: specified new message content and reply markup are exactly the same"
        ));
        assert!(!is_message_not_modified_error("Bad Request: chat not found"));
    }

    #[test]
    fn test_edit_target_gone() {
        for msg in [
            "Bad Request: message to edit not found",
            "Bad Request: MESSAGE_ID_INVALID",
            "Bad Request: message can't be edited",
        ] {
            assert!(matches!(classify_api_error(msg), TrackerError::EditTargetGone(_)), "{msg}");
        }
    }

    #[test]
    fn test_network_and_rate_limit_are_transient() {
        assert!(classify_api_error("Too Many Requests: retry after 5").is_transient());
        assert!(classify_api_error("operation timed out").is_transient());
        assert!(!classify_api_error("Bad Request: can't parse entities").is_transient());
        assert!(matches!(
            classify_api_error("Bad Request: can't parse entities"),
            TrackerError::Api(_)
        ));
    }

    #[test]
    fn test_extract_retry_after() {
        assert_eq!(extract_retry_after_seconds("Too Many Requests: retry after 17"), Some(17));
        assert_eq!(extract_retry_after_seconds("Retry after 3s"), Some(3));
        assert_eq!(extract_retry_after_seconds("Bad Request"), None);
    }
}
