//! Code extraction from model responses
//!
//! The model is asked to answer with a Markdown fenced block. Whatever comes
//! back, [`extract_code`] returns the body of the first complete fence, or the
//! whole response when there is none.

use regex::Regex;
use std::sync::LazyLock;

/// Opening fence with an optional ASCII language tag, then the shortest body up
/// to the next closing fence.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"```(?:[A-Za-z0-9_]+)?\n?((?s:.*?))```").expect("fence pattern is valid")
});

/// Return the trimmed contents of the first fenced code block in `response`,
/// or the trimmed response if it has no complete fence.
pub fn extract_code(response: &str) -> String {
    match FENCE.captures(response).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => response.trim().to_string(),
    }
}

/// Whether `response` contains at least one complete fenced block
pub fn has_fence(response: &str) -> bool {
    FENCE.is_match(response)
}
