//! String utilities for safe text handling

/// Maximum preview length for text in logs
pub const MAX_PREVIEW_LEN: usize = 100;

/// Creates a safe UTF-8 preview of a string, respecting character boundaries.
///
/// Unlike byte slicing (`&s[..n]`), this function will never panic on
/// multi-byte UTF-8 characters. Used to keep prompt and response bodies out
/// of the logs while still leaving a usable trace.
pub fn safe_preview(text: &str, max_chars: usize) -> String {
    let preview: String = text.chars().take(max_chars).collect();
    if text.chars().nth(max_chars).is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(safe_preview("hello", 10), "hello");
    }

    #[test]
    fn test_long_text_truncated() {
        assert_eq!(safe_preview("hello world", 5), "hello...");
    }

    #[test]
    fn test_multibyte_boundary() {
        let text = "\u{e9}\u{e9}\u{e9}\u{e9}";
        assert_eq!(safe_preview(text, 2), "\u{e9}\u{e9}...");
    }
}
