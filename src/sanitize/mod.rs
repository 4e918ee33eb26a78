//! Reference-Text Sanitizer
//!
//! Bounds and cleans arbitrary reference material (typically a fetched
//! README) before it is forwarded to a generation stage. Unbounded or
//! pathological input can stall a bounded-latency LLM call; sanitization
//! enforces a hard upper bound on input size and strips content with no
//! semantic value for generation.
//!
//! Rules, applied in order:
//! 1. Inline base64 image payloads are replaced with a short placeholder so
//!    the structural context ("image here") survives.
//! 2. Lines over the long-line threshold are dropped; they are almost always
//!    minified or encoded payloads, not prose.
//! 3. Remaining lines carrying a base64 marker over a secondary threshold
//!    are dropped even when under the long-line cutoff.
//! 4. The result is truncated to the character budget, with a marker when
//!    cut.
//!
//! `sanitize` is pure and idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
//! Malformed input degrades to a smaller or marked output; it never errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SanitizerConfig;
use crate::constants::sanitize as consts;

/// Inline image payloads inside markup or link syntax. The minimum payload
/// length keeps short, legitimate data URIs (and our own placeholder) intact.
static INLINE_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"data:image/[^;\s)]+;base64,[A-Za-z0-9+/=]{{{},}}",
        consts::MIN_BASE64_PAYLOAD
    ))
    .expect("inline image pattern is valid")
});

/// Reference-text sanitizer with configurable thresholds
#[derive(Debug, Clone)]
pub struct Sanitizer {
    long_line_threshold: usize,
    blob_line_threshold: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            long_line_threshold: consts::LONG_LINE_THRESHOLD,
            blob_line_threshold: consts::BLOB_LINE_THRESHOLD,
        }
    }
}

impl Sanitizer {
    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self {
            long_line_threshold: config.long_line_threshold,
            blob_line_threshold: config.blob_line_threshold,
        }
    }

    /// Sanitize `text` down to at most `max_chars` characters
    pub fn sanitize(&self, text: &str, max_chars: usize) -> String {
        if text.is_empty() || max_chars == 0 {
            return String::new();
        }

        // Rule 1: strip inline image payloads, keep a structural placeholder.
        let stripped = INLINE_IMAGE_RE.replace_all(text, consts::IMAGE_PLACEHOLDER);

        // Rules 2 and 3: drop payload-bearing lines.
        let kept: Vec<&str> = stripped
            .lines()
            .filter(|line| {
                let len = line.chars().count();
                if len > self.long_line_threshold {
                    return false;
                }
                if len > self.blob_line_threshold && line.contains("base64,") {
                    return false;
                }
                true
            })
            .collect();
        let bounded = kept.join("\n");

        // Rule 4: enforce the character budget.
        truncate_chars(&bounded, max_chars)
    }
}

/// Sanitize with the default thresholds
pub fn sanitize(text: &str, max_chars: usize) -> String {
    Sanitizer::default().sanitize(text, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    let marker_len = consts::TRUNCATION_MARKER.chars().count() + 1;
    if max_chars <= marker_len {
        // Budget too small for the marker; hard cut.
        return text.chars().take(max_chars).collect();
    }

    let keep = max_chars - marker_len;
    let mut out: String = text.chars().take(keep).collect();
    out.push('\n');
    out.push_str(consts::TRUNCATION_MARKER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base64_payload(len: usize) -> String {
        "QUJDRa+/0189".chars().cycle().take(len).collect()
    }

    #[test]
    fn test_inline_image_replaced_with_placeholder() {
        let readme = format!(
            "# Lib\n\n[![badge](https://img.shields.io/x.svg?logo=data:image/svg+xml;base64,{})](https://x)\n\npip install lib\n",
            base64_payload(3000)
        );
        let out = sanitize(&readme, 20_000);

        assert!(out.contains(consts::IMAGE_PLACEHOLDER));
        assert!(out.contains("pip install lib"));
        assert!(!out.contains(&base64_payload(3000)));
        assert!(out.chars().count() < readme.chars().count());
    }

    #[test]
    fn test_payload_length_threshold_boundary() {
        let under = format!(
            "![x](data:image/png;base64,{})",
            base64_payload(consts::MIN_BASE64_PAYLOAD - 1)
        );
        assert_eq!(sanitize(&under, 20_000), under);

        let at = format!(
            "![x](data:image/png;base64,{})",
            base64_payload(consts::MIN_BASE64_PAYLOAD)
        );
        assert!(sanitize(&at, 20_000).contains(consts::IMAGE_PLACEHOLDER));
    }

    #[test]
    fn test_short_data_uri_survives() {
        let text = "icon: data:image/png;base64,QUJD\n";
        let out = sanitize(text, 20_000);
        assert!(out.contains("data:image/png;base64,QUJD"));
    }

    #[test]
    fn test_long_line_dropped() {
        let text = format!("# Title\n\n{}\n\nNormal content here.", "A".repeat(7000));
        let out = sanitize(&text, 20_000);
        assert!(out.contains("Normal content here."));
        assert!(!out.contains(&"A".repeat(7000)));
    }

    #[test]
    fn test_base64_line_under_long_cutoff_dropped() {
        // 2000 chars: under the 6000 long-line cutoff but over the secondary
        // blob threshold, and carrying the marker.
        let blob_line = format!("src=\"base64,{}\"", base64_payload(2000));
        let text = format!("keep me\n{}\nand me", blob_line);
        let out = sanitize(&text, 20_000);
        assert_eq!(out, "keep me\nand me");
    }

    #[test]
    fn test_truncation_marker_on_cut() {
        let text = "Normal paragraph. ".repeat(2000);
        let out = sanitize(&text, 20_000);
        assert!(out.chars().count() <= 20_000);
        assert!(out.ends_with(consts::TRUNCATION_MARKER));
    }

    #[test]
    fn test_no_marker_when_under_budget() {
        let out = sanitize("short text", 20_000);
        assert_eq!(out, "short text");
    }

    #[test]
    fn test_tiny_budget_hard_cut() {
        let out = sanitize("abcdefghij", 4);
        assert_eq!(out, "abcd");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize("", 100), "");
        assert_eq!(sanitize("anything", 0), "");
    }

    #[test]
    fn test_sanitize_is_idempotent_on_blob_heavy_input() {
        let readme = format!(
            "# Lib\n\n![x](data:image/svg+xml;base64,{})\n\n{}\n\nbody text\n",
            base64_payload(3000),
            "B".repeat(8000)
        );
        let once = sanitize(&readme, 500);
        let twice = sanitize(&once, 500);
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn prop_output_never_exceeds_budget(
            text in "[ -~\\n]{0,4000}",
            max_chars in 1usize..600,
        ) {
            let out = sanitize(&text, max_chars);
            prop_assert!(out.chars().count() <= max_chars);
        }

        #[test]
        fn prop_sanitize_is_idempotent(
            text in "[ -~\\n]{0,4000}",
            max_chars in 1usize..600,
        ) {
            let once = sanitize(&text, max_chars);
            let twice = sanitize(&once, max_chars);
            prop_assert_eq!(once, twice);
        }
    }
}
