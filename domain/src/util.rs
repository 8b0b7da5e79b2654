//! Small shared helpers.

/// Truncate a string to `max_chars`, appending an ellipsis when cut.
///
/// Used for log lines so long problem statements don't flood the output.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
