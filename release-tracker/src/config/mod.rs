//! Tracker configuration: BaseConfig (state, retry, logging, Telegraph, GitHub) plus the
//! per-product Telegram channels and the translator settings.

mod app_config;
mod base;

#[cfg(test)]
mod tests;

pub use app_config::AppConfig;
pub use base::{BaseConfig, StateBackend, StateConfig};
