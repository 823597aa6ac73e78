//! Atom feed `content` is HTML-escaped HTML; these helpers flatten it to plain list text.

use std::sync::OnceLock;

use regex::Regex;

use crate::rules::compile;

/// Decodes the handful of entities GitHub emits. `&amp;` is decoded repeatedly because feed
/// content is frequently double-escaped (`&amp;lt;`).
pub fn decode_entities(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = current.replace("&amp;", "&");
        if next == current {
            break;
        }
        current = next;
    }
    current
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
}

/// Converts release HTML to text: `<li>` starts a `- ` bullet, every other tag is dropped.
pub fn release_html_to_text(html: &str) -> String {
    static LI: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    let li = LI.get_or_init(|| compile(r"(?i)<li[^>]*>"));
    let tag = TAG.get_or_init(|| compile(r"<[^>]+>"));

    let decoded = decode_entities(html);
    let bulleted = li.replace_all(&decoded, "\n- ");
    tag.replace_all(&bulleted, "").trim().to_string()
}
