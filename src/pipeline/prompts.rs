//! Stage Prompts
//!
//! Prompt builders for the generation-bearing stages. Each returns the user
//! prompt; the role hint travels separately on the request.

use crate::types::Topic;

pub const OUTLINE_ROLE: &str = "technical content planner";
pub const WRITER_ROLE: &str = "senior technical writer";
pub const FIXER_ROLE: &str = "technical reviewer fixing reported issues";
pub const EDITOR_ROLE: &str = "technical copy editor";
pub const PUBLISHER_ROLE: &str = "metadata publisher";

/// Research/Outline stage: structure the article before writing
pub fn outline(topic: &Topic, context: Option<&str>) -> String {
    let mut prompt = format!(
        "Create a detailed outline for a long-form technical article about: {}\n\
         \n\
         Topic type: {}\n\
         Summary: {}\n",
        topic.title,
        topic.kind,
        topic.summary.as_deref().unwrap_or("(none)"),
    );
    if let Some(url) = &topic.url {
        prompt.push_str(&format!("Canonical URL: {}\n", url));
    }
    if let Some(context) = context {
        prompt.push_str(&format!(
            "\nREFERENCE MATERIAL (sanitized, use only facts found here):\n{}\n",
            context
        ));
    }
    prompt.push_str(
        "\nProduce a section-by-section outline:\n\
         1. Introduction (what it is, why it matters, what readers will learn)\n\
         2. Overview (key features, use cases)\n\
         3. Getting Started (installation, quick example)\n\
         4. Core Concepts\n\
         5. Practical Examples\n\
         6. Best Practices\n\
         7. Conclusion\n\
         \n\
         For each section, list the specific points to cover. \
         Do not invent libraries, versions, or APIs not present in the reference material.",
    );
    prompt
}

/// Draft stage: write the full article from the outline
pub fn draft(topic: &Topic, context: Option<&str>, outline: &str) -> String {
    let mut prompt = format!(
        "Write a Markdown article about: {}\n\
         \n\
         Use ONLY the information from the reference material and outline below.\n\
         Do NOT invent new libraries, versions, datasets, or APIs.\n\
         \n\
         OUTLINE:\n{}\n",
        topic.title, outline,
    );
    if let Some(context) = context {
        prompt.push_str(&format!("\nREFERENCE MATERIAL:\n{}\n", context));
    }
    prompt.push_str(
        "\nFormatting:\n\
         - Begin the article with a ## heading.\n\
         - Use headings with ## and ### only.\n\
         - Do NOT use ===, --- or bold-only headings.\n\
         - Do NOT wrap the whole article in a single ``` code block.\n\
         - Use ```python only around Python code examples.\n\
         \n\
         Code:\n\
         - Each code block must be complete and runnable.\n\
         - Put all imports at the top of the code block.\n\
         - Define all variables before use.\n\
         - No placeholders like TODO, ..., your_X.\n\
         \n\
         Target 800-1500 words with at least 2 end-to-end code examples \
         where the topic calls for them.",
    );
    prompt
}

/// Fix stage: address exactly the reported issues, nothing else
pub fn fix(body: &str, issues: &[String]) -> String {
    format!(
        "Fix the issues listed below in the article that follows.\n\
         \n\
         REPORTED ISSUES:\n{}\n\
         \n\
         CRITICAL RULES:\n\
         1) Fix ONLY the reported problems.\n\
         2) Keep all other content, structure, and narrative unchanged.\n\
         3) Never switch to a different framework or library.\n\
         4) Return the complete corrected article, nothing else.\n\
         \n\
         ARTICLE:\n{}",
        issues
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n"),
        body,
    )
}

/// Polish stage: minimal formatting pass only
pub fn polish(body: &str) -> String {
    format!(
        "Apply minimal Markdown formatting cleanup to the article below:\n\
         - Normalize heading levels (## and ### only).\n\
         - Fix broken lists and spacing.\n\
         - Do NOT rewrite sentences, restructure sections, or add content.\n\
         - Return the complete article, nothing else.\n\
         \n\
         ARTICLE:\n{}",
        body,
    )
}

/// Package stage: publish metadata as JSON
pub fn package(topic: &Topic, body: &str) -> String {
    let preview: String = body.chars().take(1500).collect();
    format!(
        "Produce publish metadata for the article below as a single JSON object:\n\
         {{\"title\": \"...\", \"excerpt\": \"...\", \"tags\": [\"...\"]}}\n\
         \n\
         - title: an engaging, accurate title for \"{}\" (under 70 characters)\n\
         - excerpt: one-sentence summary (under 160 characters)\n\
         - tags: 3-8 lowercase tags\n\
         \n\
         Respond with the JSON object only.\n\
         \n\
         ARTICLE (beginning):\n{}",
        topic.title, preview,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TopicKind;

    fn topic() -> Topic {
        Topic {
            kind: TopicKind::Package,
            id: "httpx".into(),
            title: "Httpx".into(),
            url: Some("https://pypi.org/project/httpx".into()),
            summary: Some("Python package: httpx".into()),
            tags: vec![],
            version: 1,
        }
    }

    #[test]
    fn test_outline_includes_context_when_present() {
        let with = outline(&topic(), Some("README text"));
        assert!(with.contains("README text"));
        let without = outline(&topic(), None);
        assert!(!without.contains("REFERENCE MATERIAL"));
    }

    #[test]
    fn test_fix_lists_issues() {
        let prompt = fix("## Body", &["word count 40 below minimum 100".into()]);
        assert!(prompt.contains("- word count 40 below minimum 100"));
        assert!(prompt.contains("## Body"));
    }

    #[test]
    fn test_package_bounds_preview() {
        let body = "x".repeat(10_000);
        let prompt = package(&topic(), &body);
        assert!(prompt.chars().count() < 3000);
    }
}
