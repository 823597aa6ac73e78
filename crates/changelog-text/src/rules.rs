//! Ordered regex substitution tables, compiled once.

use regex::Regex;

/// One `pattern → replacement` step.
pub(crate) struct Rule {
    pub regex: Regex,
    pub replacement: &'static str,
}

impl Rule {
    /// Patterns are literals exercised by the unit tests; a bad one is a programming error.
    pub fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("substitution pattern must compile"),
            replacement,
        }
    }
}

pub(crate) fn apply_all(rules: &[Rule], text: &str) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| {
        rule.regex.replace_all(&acc, rule.replacement).into_owned()
    })
}

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern must compile")
}
