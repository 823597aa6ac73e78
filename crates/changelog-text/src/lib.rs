//! # changelog-text
//!
//! Pure text transforms for release notes:
//!
//! - [`clean`] – strips PR lists, back-references and boilerplate from GitHub release bodies
//! - [`telegram`] – pre-cleaning and MarkdownV2 escaping for Telegram messages
//! - [`html`] – entity decoding and tag stripping for Atom feed content
//! - [`telegraph`] – Markdown → Telegraph HTML → Telegraph node conversion

pub mod clean;
pub mod html;
pub mod telegram;
pub mod telegraph;

mod rules;

pub use clean::clean_release_body;
pub use html::{decode_entities, release_html_to_text};
pub use telegram::{clean_for_telegram, escape_markdown_v2, to_markdown_v2};
pub use telegraph::{html_to_nodes, markdown_to_html, strip_changelog_section, Node};
