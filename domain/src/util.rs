//! Shared utility functions.

/// Single-line preview of generated text for log messages.
///
/// Newlines are collapsed to spaces and the result is cut at `max_bytes`
/// on a UTF-8 character boundary, with `...` appended when cut.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_bytes {
        return flat;
    }
    let mut end = max_bytes;
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}
