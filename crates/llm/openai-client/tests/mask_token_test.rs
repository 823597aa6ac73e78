//! Tests for [`openai_client::mask_token`]: keys must never reach logs in full.

use openai_client::mask_token;

/// **Test: Short or empty keys are fully masked.**
///
/// **Expected:** Length ≤ 11 returns `"***"`.
#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("sk-12345"), "***");
    assert_eq!(mask_token("sk-or-v1-ab"), "***");
}

/// **Test: OpenRouter-style key keeps head and tail only.**
///
/// **Expected:** `head(7) + "***" + tail(4)`, length 14.
#[test]
fn mask_token_openrouter_key() {
    let masked = mask_token("sk-or-v1-1234567890abcdefghijklmnopqrstuvwxyz");
    assert_eq!(masked, "sk-or-v***wxyz");
    assert_eq!(masked.len(), 14);
}

/// **Test: Non-ASCII input does not split a character.**
///
/// **Expected:** Masking counts chars, not bytes.
#[test]
fn mask_token_counts_chars() {
    assert_eq!(mask_token("密钥密钥密钥密钥密钥密钥"), "密钥密钥密钥密***密钥密钥");
}
