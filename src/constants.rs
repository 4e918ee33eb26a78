//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Reference-text sanitizer constants
pub mod sanitize {
    /// Default character budget for sanitized generation input
    pub const DEFAULT_MAX_CHARS: usize = 20_000;

    /// Lines longer than this are dropped outright; they are almost always
    /// minified or encoded payloads, not prose
    pub const LONG_LINE_THRESHOLD: usize = 6_000;

    /// Lines carrying a base64 marker longer than this are dropped even when
    /// under the long-line cutoff
    pub const BLOB_LINE_THRESHOLD: usize = 1_000;

    /// Minimum payload length for the inline base64 image pattern
    pub const MIN_BASE64_PAYLOAD: usize = 100;

    /// Placeholder left in place of a stripped inline image
    pub const IMAGE_PLACEHOLDER: &str = "data:image/<stripped>;base64,<stripped>";

    /// Marker appended when output is cut to the character budget
    pub const TRUNCATION_MARKER: &str = "[...truncated for LLM safety...]";
}

/// Generation retry constants
pub mod retry {
    /// Attempts per generation call (1 initial + 2 retries)
    pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 500;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECS: u64 = 30;

    /// Backoff multiplier
    pub const BACKOFF_FACTOR: f32 = 2.0;
}

/// Quality gate constants
pub mod gate {
    /// Drafts below this word count are rejected as degenerate
    pub const MIN_WORD_COUNT: usize = 100;

    /// Target word count; falling short is recorded as a soft issue
    pub const TARGET_WORD_COUNT: usize = 500;

    /// A draft body must open with this structural delimiter
    pub const BODY_DELIMITER: &str = "## ";

    /// Generic filler phrases flagged as soft issues
    pub const FILLER_PHRASES: [&str; 5] = [
        "in today's fast-paced world",
        "in this blog post, we will",
        "without further ado",
        "the world of technology",
        "unlock the power of",
    ];
}

/// Network constants
pub mod network {
    /// Default timeout for a single generation call (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}

/// Document output constants
pub mod document {
    /// Fixed publication hour in the front-matter date, kept for the
    /// downstream site renderer
    pub const DATE_FORMAT: &str = "%Y-%m-%dT09:00:00+00:00";

    /// Maximum tags carried into the front matter
    pub const MAX_TAGS: usize = 8;
}
