//! 翻译提示词：保留专有名词英文原文。

/// Terms that must stay in English, grouped by kind.
pub const PRESERVED_TERMS: &[(&str, &str)] = &[
    (
        "通用术语",
        "API, SDK, CLI, Token, Context Window, OAuth, WebSocket, Streaming, LLM, Prompt",
    ),
    (
        "功能名称",
        "Agent, Subagent, Sub-agent, Skill, Hook, Plugin, Plan Mode, Compact Mode, Background Task, Memory, TUI, Sandbox, Transcript Mode",
    ),
    (
        "命令",
        "/compact, /context, /permissions, /mcp, /model, /resume, /export, /stats, /init, /prompts, /approvals",
    ),
    (
        "工具与概念",
        "MCP, Model Context Protocol, Tool Use, Tool Call, Bash Tool, Permission, Thinking Block, Frontmatter, exec_command, apply_patch, prompt cache, reasoning effort",
    ),
    (
        "配置文件",
        "settings.json, CLAUDE.md, config.toml, AGENTS.md, .mcp.json",
    ),
];

/// Builds the user prompt for translating `content` into Chinese.
pub fn build_translation_prompt(content: &str) -> String {
    let glossary: String = PRESERVED_TERMS
        .iter()
        .map(|(kind, terms)| format!("   - {kind}：{terms}\n"))
        .collect();
    format!(
        "请将以下软件更新日志翻译成中文，直接输出翻译结果，不要输出任何解释或前缀。\n\n\
         翻译要求：\n\
         1. 保持 Markdown 格式不变（标题、列表、代码块等）\n\
         2. 版本号、代码片段、命令保持原样\n\
         3. 以下术语必须保留英文原文，不要翻译：\n\
         {glossary}\
         4. 语言流畅自然，符合中文技术文档习惯\n\
         5. 对于不确定的专有名词，保留英文\n\n\
         待翻译内容：\n{content}"
    )
}
