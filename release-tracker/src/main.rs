//! release-tracker binary: check products for new releases, force-push a Claude Code version,
//! or push Claude Code history. Config from env (`.env` loaded first).

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use release_tracker::history::{push_history, HistoryLimit};
use release_tracker::runner::{check_claude_code, check_codex, force_push_claude_code};
use release_tracker::sources::claude_code::ClaudeCodeSource;
use release_tracker::sources::codex::{CodexSource, REPO};
use release_tracker::sources::github::GithubClient;
use release_tracker::{
    build_product_components, create_kv_store, AppConfig, CheckOutcome, CheckTarget, Cli,
    Commands, Product,
};
use storage::KvStore;
use tracing::{error, info};
use tracker_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(config.log_file())?;

    match cli.command {
        Commands::Check {
            target,
            force,
            target_version,
        } => {
            if force {
                if target != CheckTarget::ClaudeCode {
                    anyhow::bail!("--force is only supported for claude-code");
                }
                handle_force_push(&config, target_version.as_deref()).await
            } else {
                handle_check(&config, target).await
            }
        }
        Commands::PushHistory { count, all } => {
            let limit = if all {
                HistoryLimit::All
            } else {
                HistoryLimit::Count(count)
            };
            handle_push_history(&config, limit).await
        }
    }
}

/// Runs each product check in turn; one product failing does not stop the others.
async fn handle_check(config: &AppConfig, target: CheckTarget) -> Result<()> {
    let kv = create_kv_store(&config.base.state).await?;
    let products = target.products();
    let mut succeeded = 0;

    for &product in &products {
        match check_product(config, product, kv.clone()).await {
            Ok(outcome) => {
                log_outcome(product, &outcome);
                succeeded += 1;
            }
            Err(e) => error!(product = %product, error = %format!("{e:#}"), "check failed"),
        }
    }

    info!("{}/{} checks succeeded", succeeded, products.len());
    if succeeded < products.len() {
        anyhow::bail!("{}/{} checks succeeded", succeeded, products.len());
    }
    Ok(())
}

async fn check_product(
    config: &AppConfig,
    product: Product,
    kv: Arc<dyn KvStore>,
) -> Result<CheckOutcome> {
    let components = build_product_components(config, product, kv)?;
    let outcome = match product {
        Product::ClaudeCode => {
            let source = ClaudeCodeSource::new()?;
            check_claude_code(&components, &source).await?
        }
        Product::Codex => {
            let github = GithubClient::new(REPO, config.base.github_token.clone())?;
            if !github.has_token() {
                info!("GH_TOKEN not set, GitHub API calls are unauthenticated");
            }
            let source = CodexSource::new(github)?;
            check_codex(&components, &source).await?
        }
    };
    Ok(outcome)
}

fn log_outcome(product: Product, outcome: &CheckOutcome) {
    match outcome {
        CheckOutcome::FirstRun { version } => {
            info!(product = %product, version = %version, "first run, version recorded")
        }
        CheckOutcome::UpToDate { version } => {
            info!(product = %product, version = %version, "no new version")
        }
        CheckOutcome::Edited {
            version,
            message_ids,
        } => info!(product = %product, version = %version, message_ids = ?message_ids, "messages updated"),
        CheckOutcome::EditTargetGone { version } => {
            info!(product = %product, version = %version, "tracked messages gone, state cleared")
        }
        CheckOutcome::Notified {
            previous,
            version,
            message_ids,
        } => info!(
            product = %product,
            previous = %previous,
            version = %version,
            message_ids = ?message_ids,
            "new version announced"
        ),
        CheckOutcome::NoRelease => info!(product = %product, "no stable release found"),
    }
}

async fn handle_force_push(config: &AppConfig, version: Option<&str>) -> Result<()> {
    let kv = create_kv_store(&config.base.state).await?;
    let components = build_product_components(config, Product::ClaudeCode, kv)?;
    let source = ClaudeCodeSource::new()?;
    let ids = force_push_claude_code(&components, &source, version)
        .await
        .context("force push failed")?;
    info!(message_ids = ?ids, "force push succeeded");
    Ok(())
}

async fn handle_push_history(config: &AppConfig, limit: HistoryLimit) -> Result<()> {
    let kv = create_kv_store(&config.base.state).await?;
    let components = build_product_components(config, Product::ClaudeCode, kv)?;
    let source = ClaudeCodeSource::new()?;
    let changelog = source.fetch_changelog().await?;

    let report = push_history(&components, &changelog, limit).await?;
    info!(
        pending = report.pending,
        pushed = report.pushed.len(),
        "history push summary"
    );
    if let Some((version, err)) = report.failed {
        anyhow::bail!("history push stopped at {version}: {err}");
    }
    Ok(())
}
