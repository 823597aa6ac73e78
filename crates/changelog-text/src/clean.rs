//! Release-body cleaning: removes contributor/PR noise so only user-facing changes remain.

use std::sync::OnceLock;

use crate::rules::{apply_all, Rule};

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // Trailing merged-PR sections drop everything after their heading.
            Rule::new(r"(?is)\n[-#]*\s*Full list of merged PRs.*", ""),
            Rule::new(r"(?is)\n[-#]*\s*Merged PRs.*", ""),
            Rule::new(r"(?is)\n[-#]*\s*All merged PRs.*", ""),
            Rule::new(r"(?is)\n[-#]*\s*List of merged PRs.*", ""),
            Rule::new(r"(?is)\n[-#]*\s*PRs Merged.*", ""),
            Rule::new(r"(?is)\n#+\s*PRs\s*\n.*", ""),
            // "Full Changelog: <compare url>"
            Rule::new(r"(?i)\*?\*?Full Changelog\*?\*?:?.*", ""),
            // PR list items
            Rule::new(r"(?m)^[-*]\s+.*(?:by @|— @).*(?:in #\d+|#\d+).*$", ""),
            Rule::new(r"(?m)^[-*]\s+.*\(#\d+\)\s*—\s*@.*$", ""),
            Rule::new(r"(?m)^#\d+\s+[–—-]\s+.*$", ""),
            Rule::new(r"(?m)^[-*]\s+PR\s*$", ""),
            // Inline references
            Rule::new(r"\s*\(#\d+(?:\s+#\d+)*\)", ""),
            Rule::new(r"#\d+(?:\s+#\d+)*", ""),
            Rule::new(
                r"https://github\.com/[\w.-]+/[\w.-]+/(?:pull|issues)/\d+",
                "",
            ),
            // Sentence fragments left behind by removed references
            Rule::new(r"See\s+for details\.?", ""),
            Rule::new(r"As of\s*,\s*", ""),
            Rule::new(r"\s+in\s+so\s+", " so "),
            Rule::new(r"\s+in\s*,", ","),
            Rule::new(r"\s+in\s*\)", ")"),
            Rule::new(r"\s+in\s+because", " because"),
            Rule::new(r"(?m)\s+in\s*$", ""),
            Rule::new(r"(?mi)thanks to\s*$", ""),
            Rule::new(r"(?m)fixing\s*\.?\s*$", ""),
            Rule::new(r"\s*\(was the relevant GitHub issue\)\s*", " "),
            Rule::new(r"gracefully\s+- ", "gracefully\n- "),
            Rule::new(r"though from the additional details on\s*,", "though"),
            Rule::new(r"Though\s+should", "Though it should"),
            Rule::new(r"reverted\s*,\s*fixing", "reverted the previous change, fixing"),
            Rule::new(r"(?m)^-\s+\s+", "- "),
            Rule::new(r"(?m)^\*\s+\s+", "* "),
            // Mentions become profile links
            Rule::new(r"@(\w[\w-]*)", "[@${1}](https://github.com/${1})"),
            // Punctuation and whitespace
            Rule::new(r"(?m)\s*:\s*\.?\s*$", ""),
            Rule::new(r"\s+\)", ")"),
            Rule::new(r"\(\s+", "("),
            Rule::new(r"\([\s,]*\)", ""),
            Rule::new(r"\s+:", ":"),
            Rule::new(r"(?m),\s*$", ""),
            Rule::new(r"[^\S\n]{2,}", " "),
            Rule::new(r"\n{3,}", "\n\n"),
            Rule::new(r"\.{2,}", "."),
            Rule::new(r"(?m)^\s*\.\s*$", ""),
            Rule::new(r"(?m)^[*]\s+", "- "),
            Rule::new(r"\n\n+- ", "\n- "),
            // Section keywords on their own line are bolded
            Rule::new(r"(?mi)^(Highlights?)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(What'?s New)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(Breaking Changes?)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(New Features?)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(Bug Fixes?)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(Improvements?)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(Changes?)(\s*:?\s*)$", "**${1}**\n"),
            Rule::new(r"(?mi)^(Notes?)(\s*:?\s*)$", "**${1}**\n"),
        ]
    })
}

/// Cleans a GitHub release body.
///
/// Removes merged-PR sections, "Full Changelog" lines, PR list items, `#123` references and
/// PR/issue URLs, repairs the fragments those removals leave, turns `@user` into a profile
/// link and bolds section keywords. Returns the trimmed result; empty input yields `""`.
pub fn clean_release_body(body: &str) -> String {
    if body.trim().is_empty() {
        return String::new();
    }
    apply_all(rules(), body).trim().to_string()
}
