//! CLI parser.

use clap::{Parser, Subcommand, ValueEnum};

use crate::product::Product;

#[derive(Parser, Debug)]
#[command(name = "release-tracker")]
#[command(about = "Watch Claude Code and OpenAI Codex releases and announce them on Telegram", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check for new releases and notify (config from env).
    Check {
        #[arg(value_enum, default_value_t = CheckTarget::All)]
        target: CheckTarget,
        /// Push without comparing versions or touching records (claude-code only).
        #[arg(short, long)]
        force: bool,
        /// Version to force push, x.y.z; defaults to the latest.
        #[arg(short = 'V', long = "target-version", requires = "force")]
        target_version: Option<String>,
    },
    /// Push Claude Code versions that were never announced, oldest first.
    PushHistory {
        #[arg(short, long, default_value = "3")]
        count: usize,
        /// Ignore --count and push everything pending.
        #[arg(long)]
        all: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckTarget {
    ClaudeCode,
    Codex,
    All,
}

impl CheckTarget {
    pub fn products(self) -> Vec<Product> {
        match self {
            CheckTarget::ClaudeCode => vec![Product::ClaudeCode],
            CheckTarget::Codex => vec![Product::Codex],
            CheckTarget::All => Product::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("release-tracker").chain(args.iter().copied()))
    }

    #[test]
    fn test_check_defaults_to_all() {
        let cli = parse(&["check"]).unwrap();
        match cli.command {
            Commands::Check {
                target,
                force,
                target_version,
            } => {
                assert_eq!(target, CheckTarget::All);
                assert!(!force);
                assert!(target_version.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_force_with_version() {
        let cli = parse(&["check", "claude-code", "--force", "-V", "2.0.14"]).unwrap();
        match cli.command {
            Commands::Check {
                target,
                force,
                target_version,
            } => {
                assert_eq!(target, CheckTarget::ClaudeCode);
                assert!(force);
                assert_eq!(target_version.as_deref(), Some("2.0.14"));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_version_requires_force() {
        assert!(parse(&["check", "claude-code", "-V", "2.0.14"]).is_err());
    }

    #[test]
    fn test_push_history_flags() {
        let cli = parse(&["push-history", "--all"]).unwrap();
        match cli.command {
            Commands::PushHistory { count, all } => {
                assert_eq!(count, 3);
                assert!(all);
            }
            _ => panic!("expected push-history"),
        }
    }

    #[test]
    fn test_target_products() {
        assert_eq!(CheckTarget::All.products(), vec![Product::ClaudeCode, Product::Codex]);
        assert_eq!(CheckTarget::Codex.products(), vec![Product::Codex]);
    }
}
