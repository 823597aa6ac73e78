//! Telegram text preparation.
//!
//! [`clean_for_telegram`] flattens Markdown headings and bullets, and [`to_markdown_v2`]
//! produces text that Telegram's MarkdownV2 parser accepts: link and code spans are kept,
//! `*bold*` / `**bold**` pairs become bold, every other special character is escaped.

use std::sync::OnceLock;

use regex::Regex;

use crate::rules::{apply_all, compile, Rule};

/// Characters MarkdownV2 requires to be escaped outside entities.
const SPECIAL_CHARS: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

const LINK_MARK: char = '\u{0}';
const CODE_MARK: char = '\u{1}';

/// Removes heading markers, optionally a bare `x.y.z` version line, turns `- ` bullets into
/// `• ` and collapses runs of blank lines.
pub fn clean_for_telegram(text: &str, remove_version: bool) -> String {
    static BASE: OnceLock<Vec<Rule>> = OnceLock::new();
    static VERSION_LINE: OnceLock<Rule> = OnceLock::new();
    static TAIL: OnceLock<Vec<Rule>> = OnceLock::new();

    let base = BASE.get_or_init(|| vec![Rule::new(r"(?m)^#{1,6}\s*", "")]);
    let tail = TAIL.get_or_init(|| {
        vec![
            Rule::new(r"(?m)^- ", "• "),
            Rule::new(r"\n{3,}", "\n\n"),
        ]
    });

    let mut out = apply_all(base, text);
    if remove_version {
        let rule = VERSION_LINE.get_or_init(|| Rule::new(r"(?m)^\d+\.\d+\.\d+\s*$", ""));
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }
    apply_all(tail, &out).trim().to_string()
}

/// Escapes every MarkdownV2 special character with a backslash.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Inside a link target only `)` and `\` need escaping.
fn escape_link_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c == ')' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Inside a code span only `` ` `` and `\` need escaping.
fn escape_code(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for c in code.chars() {
        if c == '`' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"\[([^\]]+)\]\(([^)\s]+)\)"))
}

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"`([^`]+)`"))
}

fn bold_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"\*\*([^*]+)\*\*|\*([^*]+)\*"))
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"[\x00\x01](\d+)[\x00\x01]"))
}

/// Formats text for `parse_mode = MarkdownV2`.
///
/// Code spans are taken out first, then `[text](url)` links; both are replaced with
/// placeholders so the escaping pass leaves them intact. Bold pairs are rewritten to single
/// `*` delimiters with escaped content; stray `*` is escaped like any other special char.
pub fn to_markdown_v2(text: &str) -> String {
    let mut codes: Vec<String> = Vec::new();
    let without_code = code_regex().replace_all(text, |caps: &regex::Captures<'_>| {
        codes.push(caps[1].to_string());
        format!("{CODE_MARK}{}{CODE_MARK}", codes.len() - 1)
    });

    let mut links: Vec<(String, String)> = Vec::new();
    let without_links = link_regex().replace_all(&without_code, |caps: &regex::Captures<'_>| {
        links.push((caps[1].to_string(), caps[2].to_string()));
        format!("{LINK_MARK}{}{LINK_MARK}", links.len() - 1)
    });

    let mut body = String::with_capacity(without_links.len() * 2);
    let mut last = 0;
    for caps in bold_regex().captures_iter(&without_links) {
        let Some(whole) = caps.get(0) else { continue };
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        body.push_str(&escape_markdown_v2(&without_links[last..whole.start()]));
        body.push('*');
        body.push_str(&escape_markdown_v2(inner));
        body.push('*');
        last = whole.end();
    }
    body.push_str(&escape_markdown_v2(&without_links[last..]));

    restore_placeholders(&body, &links, &codes)
}

/// Links are restored before code so a code span nested in link text resolves too.
fn restore_placeholders(body: &str, links: &[(String, String)], codes: &[String]) -> String {
    let re = placeholder_regex();
    let with_links = re.replace_all(body, |caps: &regex::Captures<'_>| {
        let whole = &caps[0];
        match (whole.starts_with(LINK_MARK), caps[1].parse::<usize>().ok()) {
            (true, Some(i)) if i < links.len() => {
                let (label, url) = &links[i];
                format!("[{}]({})", escape_markdown_v2(label), escape_link_url(url))
            }
            _ => whole.to_string(),
        }
    });
    re.replace_all(&with_links, |caps: &regex::Captures<'_>| {
        let whole = &caps[0];
        match (whole.starts_with(CODE_MARK), caps[1].parse::<usize>().ok()) {
            (true, Some(i)) if i < codes.len() => format!("`{}`", escape_code(&codes[i])),
            _ => whole.to_string(),
        }
    })
    .into_owned()
}
