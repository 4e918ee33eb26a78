//! LLM Output Cleanup
//!
//! Normalizes raw stage output into well-formed Markdown before validation:
//! strips an outer code fence if the model wrapped the whole article,
//! promotes bold-only lines to headings outside code blocks, and collapses
//! excessive blank lines.

use std::sync::LazyLock;

use regex::Regex;

static OUTER_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?si)^```(?:markdown)?\s*(.*?)\s*```$").expect("outer fence pattern is valid")
});

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("code fence pattern is valid"));

static BOLD_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\*\*(.*?)\*\*\s*$").expect("bold line pattern is valid"));

static INTRO_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^Introduction\s*$").expect("intro pattern is valid"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("blank run pattern is valid"));

/// Clean raw LLM output into proper Markdown.
///
/// Code blocks are preserved verbatim; only prose between them is touched.
pub fn clean_llm_output(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace('\u{feff}', "");
    let mut text = text.trim().to_string();

    // Unwrap an article the model fenced whole. An inner fence means the
    // outer pair is two real code blocks, not a wrapper.
    if let Some(captures) = OUTER_FENCE_RE.captures(&text)
        && let Some(inner) = captures.get(1)
        && !inner.as_str().contains("```")
    {
        text = inner.as_str().to_string();
    }

    // Clean prose chunks, keep code blocks as-is.
    let mut cleaned = String::with_capacity(text.len());
    let mut last_pos = 0;
    for fence in CODE_FENCE_RE.find_iter(&text) {
        cleaned.push_str(&clean_prose(&text[last_pos..fence.start()]));
        cleaned.push_str(fence.as_str());
        last_pos = fence.end();
    }
    cleaned.push_str(&clean_prose(&text[last_pos..]));

    cleaned.trim().to_string() + "\n"
}

/// Normalize spacing: collapse 4+ consecutive newlines, ensure a trailing
/// newline
pub fn clean_content(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    let body = BLANK_RUN_RE.replace_all(body, "\n\n\n");
    body.trim().to_string() + "\n"
}

fn clean_prose(prose: &str) -> String {
    let prose = BOLD_LINE_RE.replace_all(prose, "## $1");
    INTRO_LINE_RE.replace_all(&prose, "## Introduction").to_string()
}
