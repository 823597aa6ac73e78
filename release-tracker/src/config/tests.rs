//! Config tests.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;

use super::{AppConfig, StateBackend};
use crate::product::Product;

const VARS: &[&str] = &[
    "CLAUDE_CODE_BOT_TOKEN",
    "CLAUDE_CODE_CHAT_ID",
    "CODEX_BOT_TOKEN",
    "CODEX_CHAT_ID",
    "TELEGRAM_API_URL",
    "LLM_API_KEY",
    "LLM_BASE_URL",
    "LLM_MODEL",
    "TELEGRAPH_ACCESS_TOKEN",
    "TELEGRAPH_AUTHOR_NAME",
    "TELEGRAPH_AUTHOR_URL",
    "STATE_BACKEND",
    "STATE_DIR",
    "STATE_DATABASE_URL",
    "GH_TOKEN",
    "SEND_MAX_ATTEMPTS",
    "SEND_RETRY_DELAY_SECS",
    "LOG_FILE",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();

    let config = AppConfig::load().unwrap();
    config.validate().unwrap();

    assert!(config.claude_code.is_none());
    assert!(config.codex.is_none());
    assert!(!config.translator.is_enabled());
    assert_eq!(config.log_file(), "logs/release-tracker.log");
    assert_eq!(config.base.state.backend, StateBackend::File);
    assert_eq!(config.base.state.dir, PathBuf::from("./output"));
    assert!(config.base.state.database_url.ends_with("state.db"));
    assert_eq!(config.base.retry.max_attempts, 3);
    assert_eq!(config.base.retry.delay, Duration::from_secs(3));
    assert!(config.base.github_token.is_none());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("CLAUDE_CODE_BOT_TOKEN", " 123:abc ");
    env::set_var("CLAUDE_CODE_CHAT_ID", "@claude_code_push");
    env::set_var("STATE_BACKEND", "SQLite");
    env::set_var("STATE_DIR", "/tmp/tracker");
    env::set_var("SEND_MAX_ATTEMPTS", "5");
    env::set_var("SEND_RETRY_DELAY_SECS", "0");
    env::set_var("GH_TOKEN", "ghp_x");
    env::set_var("LOG_FILE", "/tmp/tracker.log");

    let config = AppConfig::load().unwrap();

    let channel = config.telegram(Product::ClaudeCode).unwrap();
    assert_eq!(channel.bot_token, "123:abc");
    assert_eq!(channel.chat_id, "@claude_code_push");
    assert!(config.telegram(Product::Codex).is_err());
    assert_eq!(config.base.state.backend, StateBackend::Sqlite);
    assert_eq!(config.base.state.database_url, "/tmp/tracker/state.db");
    assert_eq!(config.base.retry.max_attempts, 5);
    assert_eq!(config.base.retry.delay, Duration::ZERO);
    assert_eq!(config.base.github_token.as_deref(), Some("ghp_x"));
    assert_eq!(config.log_file(), "/tmp/tracker.log");

    clear_env();
}

#[test]
#[serial]
fn test_half_configured_channel_fails() {
    clear_env();
    env::set_var("CODEX_BOT_TOKEN", "123:abc");

    assert!(AppConfig::load().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_unknown_state_backend_fails() {
    clear_env();
    env::set_var("STATE_BACKEND", "redis");

    assert!(AppConfig::load().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_invalid_retry_number_fails() {
    clear_env();
    env::set_var("SEND_MAX_ATTEMPTS", "three");

    assert!(AppConfig::load().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_telegram_url() {
    clear_env();
    env::set_var("TELEGRAM_API_URL", "not a url");

    let config = AppConfig::load().unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_telegraph_author_defaults_and_override() {
    clear_env();
    env::set_var("TELEGRAPH_ACCESS_TOKEN", "tg-token");

    let config = AppConfig::load().unwrap();
    let codex = config.telegraph(Product::Codex);
    assert_eq!(codex.access_token.as_deref(), Some("tg-token"));
    assert_eq!(codex.author_name, "Codex Changelog");
    assert_eq!(codex.author_url, "https://t.me/codex_push");

    env::set_var("TELEGRAPH_AUTHOR_NAME", "Release Bot");
    let config = AppConfig::load().unwrap();
    let claude = config.telegraph(Product::ClaudeCode);
    assert_eq!(claude.author_name, "Release Bot");
    assert_eq!(claude.author_url, "https://t.me/claude_code_push");

    clear_env();
}
