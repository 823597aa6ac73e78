//! Telegraph page content.
//!
//! Telegraph's `createPage` takes a JSON array of nodes, where a node is either a text string
//! or `{"tag": .., "attrs": {..}, "children": [..]}`. Release Markdown is first converted to a
//! small HTML subset by [`markdown_to_html`], then parsed into nodes by [`html_to_nodes`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rules::{apply_all, compile, Rule};

/// A Telegraph content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        children: Option<Vec<Node>>,
    },
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn element(tag: &str, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            children: Some(children),
        }
    }

    fn void(tag: &str) -> Self {
        Node::Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            children: None,
        }
    }
}

fn inline_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"(?m)^## (.+)$", "<h3>${1}</h3>"),
            Rule::new(r"(?m)^### (.+)$", "<h4>${1}</h4>"),
            Rule::new(r"(?m)^# (.+)$", "<h3>${1}</h3>"),
            Rule::new(r"(?s)```\w*\n(.*?)\n```", "<pre>${1}</pre>"),
            Rule::new(r"`([^`\n]+)`", "<code>${1}</code>"),
            Rule::new(r"\*\*(.+?)\*\*", "<b>${1}</b>"),
            Rule::new(r"__(.+?)__", "<b>${1}</b>"),
            Rule::new(r"\*([^*\n]+)\*", "<i>${1}</i>"),
            // `_x_` only at word edges so snake_case identifiers stay intact
            Rule::new(r"(^|[^\w])_([^_\n]+)_([^\w]|$)", "${1}<i>${2}</i>${3}"),
            Rule::new(r#"\[([^\]]+)\]\(([^)]+)\)"#, r#"<a href="${2}">${1}</a>"#),
        ]
    })
}

/// Converts release Markdown to the HTML subset Telegraph renders.
///
/// Headings map to `h3`/`h4`, fenced blocks to `pre`, and `-`/`•` bullet runs are grouped into
/// a single `ul`. Non-empty lines that are not already block HTML are wrapped in `p`.
pub fn markdown_to_html(markdown: &str) -> String {
    let html = apply_all(inline_rules(), markdown);

    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;
    let mut pre: Option<Vec<&str>> = None;
    for line in html.lines() {
        if let Some(block) = pre.as_mut() {
            block.push(line);
            if line.contains("</pre>") {
                out.push(block.join("\n"));
                pre = None;
            }
            continue;
        }
        let trimmed = line.trim();
        let item = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('•'))
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(str::trim)
            .filter(|rest| !rest.is_empty());

        if let Some(item) = item {
            if !in_list {
                out.push("<ul>".to_string());
                in_list = true;
            }
            out.push(format!("<li>{item}</li>"));
            continue;
        }
        if in_list {
            out.push("</ul>".to_string());
            in_list = false;
        }
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("<pre>") && !trimmed.contains("</pre>") {
            pre = Some(vec![trimmed]);
            continue;
        }
        if trimmed.starts_with('<') {
            out.push(trimmed.to_string());
        } else {
            out.push(format!("<p>{trimmed}</p>"));
        }
    }
    if in_list {
        out.push("</ul>".to_string());
    }
    if let Some(block) = pre {
        out.push(block.join("\n"));
    }
    out.join("")
}

const ELEMENT_TAGS: &str = "h3|h4|p|ul|li|pre|code|b|i|a";

fn open_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(&format!(r"^<({ELEMENT_TAGS})(\s[^>]*)?>")))
}

fn void_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"^<(hr|br)\s*/?>"))
}

fn href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r#"href=["']([^"']+)["']"#))
}

fn list_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?s)<li>(.*?)</li>"))
}

/// Parses the HTML produced by [`markdown_to_html`] into Telegraph nodes.
///
/// Element content runs to the first matching close tag. Text between elements becomes a
/// trimmed text node; a `<` that does not start a known element is dropped.
pub fn html_to_nodes(html: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut rest = html;
    while !rest.is_empty() {
        if rest.starts_with('<') {
            if let Some((node, consumed)) = parse_element(rest) {
                nodes.push(node);
                rest = &rest[consumed..];
            } else {
                rest = &rest[1..];
            }
            continue;
        }
        let end = rest.find('<').unwrap_or(rest.len());
        let text = rest[..end].trim();
        if !text.is_empty() {
            nodes.push(Node::text(text));
        }
        rest = &rest[end..];
    }
    nodes
}

fn parse_element(s: &str) -> Option<(Node, usize)> {
    if let Some(m) = void_tag_regex().captures(s) {
        let whole = m.get(0)?;
        return Some((Node::void(&m[1]), whole.end()));
    }

    let caps = open_tag_regex().captures(s)?;
    let open_end = caps.get(0)?.end();
    let tag = caps.get(1)?.as_str();
    let attrs_src = caps.get(2).map_or("", |m| m.as_str());

    let close = format!("</{tag}>");
    let inner_len = s[open_end..].find(&close)?;
    let inner = &s[open_end..open_end + inner_len];

    let mut attrs = BTreeMap::new();
    if tag == "a" {
        if let Some(href) = href_regex().captures(attrs_src) {
            attrs.insert("href".to_string(), href[1].to_string());
        }
    }

    let children = if tag == "ul" {
        list_item_regex()
            .captures_iter(inner)
            .map(|li| Node::element("li", inline_children(&li[1])))
            .collect()
    } else {
        inline_children(inner)
    };

    let node = Node::Element {
        tag: tag.to_string(),
        attrs,
        children: Some(children),
    };
    Some((node, open_end + inner_len + close.len()))
}

fn inline_children(inner: &str) -> Vec<Node> {
    if inner.contains('<') {
        html_to_nodes(inner)
    } else if inner.trim().is_empty() {
        Vec::new()
    } else {
        vec![Node::text(inner.trim())]
    }
}

/// Drops a trailing "Changelog" section (heading line and everything after it).
///
/// Used to shrink a page Telegraph rejected as too large.
pub fn strip_changelog_section(markdown: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| compile(r"(?ims)^\*{0,2}#{0,4}[ \t]*Changelog[ \t]*\*{0,2}[ \t]*\n.*"));
    re.replace(markdown, "").trim_end().to_string()
}
