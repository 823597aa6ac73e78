//! The tracked products and their fixed per-product settings.

use std::fmt;

/// A product line with its own channel, state records and release source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    ClaudeCode,
    Codex,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::ClaudeCode, Product::Codex];

    /// Name used in message titles and Telegraph page titles.
    pub fn title(self) -> &'static str {
        match self {
            Product::ClaudeCode => "Claude Code",
            Product::Codex => "OpenAI Codex",
        }
    }

    /// Prefix of the state keys.
    pub fn slug(self) -> &'static str {
        match self {
            Product::ClaudeCode => "claude_code",
            Product::Codex => "codex",
        }
    }

    /// Prefix of `{PREFIX}_BOT_TOKEN` / `{PREFIX}_CHAT_ID`.
    pub fn env_prefix(self) -> &'static str {
        match self {
            Product::ClaudeCode => "CLAUDE_CODE",
            Product::Codex => "CODEX",
        }
    }

    /// Default Telegraph byline: (author name, author url).
    pub fn default_author(self) -> (&'static str, &'static str) {
        match self {
            Product::ClaudeCode => ("Claude Code Changelog", "https://t.me/claude_code_push"),
            Product::Codex => ("Codex Changelog", "https://t.me/codex_push"),
        }
    }

    pub fn version_key(self) -> String {
        format!("{}_latest_version.txt", self.slug())
    }

    pub fn message_state_key(self) -> String {
        format!("{}_message_state.json", self.slug())
    }

    pub fn pushed_versions_key(self) -> String {
        format!("{}_pushed_versions.txt", self.slug())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
