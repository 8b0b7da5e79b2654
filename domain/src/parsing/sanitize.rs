//! Input sanitization.
//!
//! Removes markup a downstream renderer could interpret as executable —
//! `<script>` blocks go away wholesale, contents included. Everything else,
//! whitespace and punctuation included, passes through verbatim.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script pattern")
});

// An opener with no matching close tag: strip to end of input so the
// payload never reaches a renderer half-escaped.
static SCRIPT_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*$").expect("valid open pattern"));

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSanitizer;

impl InputSanitizer {
    pub fn new() -> Self {
        Self
    }

    pub fn sanitize(&self, text: &str) -> String {
        let stripped = SCRIPT_BLOCK_RE.replace_all(text, "");
        SCRIPT_OPEN_RE.replace_all(&stripped, "").into_owned()
    }
}
