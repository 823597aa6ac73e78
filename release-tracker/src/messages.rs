//! Bilingual message construction and the length-based dispatch classification.

use changelog_text::{clean_for_telegram, to_markdown_v2};
use tracker_core::{utf16_len, DispatchDecision, ReleaseContent, MAX_MESSAGE_LENGTH};

/// Shown in the Chinese message when no translation is available.
pub const NO_TRANSLATION: &str = "（无翻译）";

/// The three candidate renderings of one release, in source Markdown and escaped MarkdownV2.
#[derive(Debug, Clone, PartialEq)]
pub struct BilingualMessages {
    pub en_title: String,
    pub cn_title: String,
    pub en_message: String,
    pub cn_message: String,
    pub combined_message: String,
    /// MarkdownV2 renderings, ready for the transport.
    pub en_rendered: String,
    pub cn_rendered: String,
    pub combined_rendered: String,
}

impl BilingualMessages {
    pub fn build(product_title: &str, release: &ReleaseContent) -> Self {
        let original = clean_for_telegram(&release.original_text, true).replace("链接:", "Source:");
        let translated = if release.has_translation() {
            clean_for_telegram(&release.translated_text, true)
        } else {
            String::new()
        };

        let (en_title, cn_title) = match release.source_url.as_deref() {
            Some(url) => (
                format!("*{product_title} [{}]({url}) Released*", release.version),
                format!("*{product_title} [{}]({url}) 发布*", release.version),
            ),
            None => (
                format!("*{product_title} {} Released*", release.version),
                format!("*{product_title} {} 发布*", release.version),
            ),
        };

        let en_message = format!("{en_title}\n\n{original}");
        let cn_body = if translated.is_empty() {
            NO_TRANSLATION
        } else {
            translated.as_str()
        };
        let cn_message = format!("{cn_title}\n\n{cn_body}");
        let combined_message = if translated.is_empty() {
            en_message.clone()
        } else {
            format!("{en_message}\n\n{translated}")
        };

        Self {
            en_rendered: to_markdown_v2(&en_message),
            cn_rendered: to_markdown_v2(&cn_message),
            combined_rendered: to_markdown_v2(&combined_message),
            en_title,
            cn_title,
            en_message,
            cn_message,
            combined_message,
        }
    }

    pub fn combined_len(&self) -> usize {
        utf16_len(&self.combined_rendered)
    }

    pub fn en_len(&self) -> usize {
        utf16_len(&self.en_rendered)
    }

    pub fn cn_len(&self) -> usize {
        utf16_len(&self.cn_rendered)
    }

    /// Combined first, then split, then fallback.
    pub fn decision(&self) -> DispatchDecision {
        if self.combined_len() <= MAX_MESSAGE_LENGTH {
            DispatchDecision::Combined
        } else if self.en_len() <= MAX_MESSAGE_LENGTH && self.cn_len() <= MAX_MESSAGE_LENGTH {
            DispatchDecision::SplitBilingual
        } else {
            DispatchDecision::ExternalFallback
        }
    }

    /// Short message pointing at the published page.
    pub fn short_en(&self, page_url: &str) -> String {
        to_markdown_v2(&format!(
            "{}\n\n[View Full Changelog | 查看完整更新日志]({page_url})",
            self.en_title
        ))
    }

    /// Second short message used when a split pair is edited into fallback form.
    pub fn short_cn(&self, page_url: &str) -> String {
        to_markdown_v2(&format!("{}\n\n[查看完整更新日志]({page_url})", self.cn_title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(original: &str, translated: &str) -> ReleaseContent {
        ReleaseContent::new("2.0.1", original).with_translation(translated)
    }

    #[test]
    fn test_titles_with_and_without_url() {
        let plain = BilingualMessages::build("Claude Code", &release("## 2.0.1\n- Fix", ""));
        assert_eq!(plain.en_title, "*Claude Code 2.0.1 Released*");
        assert_eq!(plain.cn_title, "*Claude Code 2.0.1 发布*");

        let linked = BilingualMessages::build(
            "OpenAI Codex",
            &ReleaseContent::new("0.5.0", "- Fix")
                .with_source_url(Some("https://github.com/openai/codex/releases/tag/rust-v0.5.0".into())),
        );
        assert_eq!(
            linked.en_title,
            "*OpenAI Codex [0.5.0](https://github.com/openai/codex/releases/tag/rust-v0.5.0) Released*"
        );
    }

    #[test]
    fn test_message_bodies() {
        let msgs = BilingualMessages::build("Claude Code", &release("## 2.0.1\n\n- Fix", "## 2.0.1\n\n- 修复"));
        assert_eq!(msgs.en_message, "*Claude Code 2.0.1 Released*\n\n• Fix");
        assert_eq!(msgs.cn_message, "*Claude Code 2.0.1 发布*\n\n• 修复");
        assert_eq!(
            msgs.combined_message,
            "*Claude Code 2.0.1 Released*\n\n• Fix\n\n• 修复"
        );
    }

    #[test]
    fn test_missing_translation() {
        let msgs = BilingualMessages::build("Claude Code", &release("- Fix", "  "));
        assert_eq!(msgs.cn_message, "*Claude Code 2.0.1 发布*\n\n（无翻译）");
        assert_eq!(msgs.combined_message, msgs.en_message);
    }

    #[test]
    fn test_source_label_is_translated() {
        let msgs = BilingualMessages::build("OpenAI Codex", &release("链接: https://x.io", ""));
        assert!(msgs.en_message.ends_with("Source: https://x.io"));
    }

    #[test]
    fn test_decision_order() {
        let small = BilingualMessages::build("Claude Code", &release("- a", "- 甲"));
        assert_eq!(small.decision(), DispatchDecision::Combined);

        let half = "x".repeat(2500);
        let split = BilingualMessages::build("Claude Code", &release(&half, &half));
        assert_eq!(split.decision(), DispatchDecision::SplitBilingual);

        let huge = "x".repeat(5000);
        let fallback = BilingualMessages::build("Claude Code", &release(&huge, "- 甲"));
        assert_eq!(fallback.decision(), DispatchDecision::ExternalFallback);
    }

    #[test]
    fn test_lengths_count_escapes_and_utf16() {
        // 4090 dots escape to 8180 units even though the source is short enough.
        let dots = ".".repeat(4090);
        let msgs = BilingualMessages::build("Claude Code", &release(&dots, ""));
        assert!(msgs.en_len() > MAX_MESSAGE_LENGTH);
        assert_eq!(msgs.decision(), DispatchDecision::ExternalFallback);
    }

    /// `units` UTF-16 units once escaped: `.` escapes to two, `甲` is one.
    fn padding(units: usize) -> String {
        let mut out = ".".repeat(units / 2);
        if units % 2 == 1 {
            out.push('甲');
        }
        out
    }

    /// Content whose combined rendering is exactly `target` units, padding split evenly.
    fn with_combined_len(target: usize) -> BilingualMessages {
        let base = BilingualMessages::build("Claude Code", &release("a", "甲")).combined_len();
        let pad = target - base;
        let en = format!("a{}", padding(pad / 2));
        let cn = format!("甲{}", padding(pad - pad / 2));
        let msgs = BilingualMessages::build("Claude Code", &release(&en, &cn));
        assert_eq!(msgs.combined_len(), target);
        msgs
    }

    /// Content whose English rendering is exactly `target` units, with a short translation.
    fn with_en_len(target: usize) -> BilingualMessages {
        let base = BilingualMessages::build("Claude Code", &release("a", "甲")).en_len();
        let en = format!("a{}", padding(target - base));
        let msgs = BilingualMessages::build("Claude Code", &release(&en, "甲"));
        assert_eq!(msgs.en_len(), target);
        msgs
    }

    #[test]
    fn test_combined_at_limit_is_single_message() {
        let msgs = with_combined_len(MAX_MESSAGE_LENGTH);
        assert_eq!(msgs.decision(), DispatchDecision::Combined);
    }

    #[test]
    fn test_combined_one_over_limit_splits() {
        let msgs = with_combined_len(MAX_MESSAGE_LENGTH + 1);
        assert!(msgs.en_len() <= MAX_MESSAGE_LENGTH && msgs.cn_len() <= MAX_MESSAGE_LENGTH);
        assert_eq!(msgs.decision(), DispatchDecision::SplitBilingual);
    }

    #[test]
    fn test_single_message_at_limit_still_splits() {
        let msgs = with_en_len(MAX_MESSAGE_LENGTH);
        assert!(msgs.combined_len() > MAX_MESSAGE_LENGTH);
        assert_eq!(msgs.decision(), DispatchDecision::SplitBilingual);
    }

    #[test]
    fn test_single_message_one_over_limit_falls_back() {
        let msgs = with_en_len(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(msgs.decision(), DispatchDecision::ExternalFallback);
    }

    #[test]
    fn test_short_messages_contain_link() {
        let msgs = BilingualMessages::build("Claude Code", &release("- a", ""));
        let en = msgs.short_en("https://telegra.ph/x");
        assert!(en.contains("(https://telegra.ph/x)"));
        assert!(en.starts_with("*Claude Code 2\\.0\\.1 Released*"));
        assert!(msgs.short_cn("https://telegra.ph/x").contains("[查看完整更新日志](https://telegra.ph/x)"));
    }
}
