//! Length limiting for rendered changelogs
//!
//! Lengths are counted in `char`s, so a cut never lands inside a multi-byte
//! character.

/// Appended to text that was cut short
pub const ELLIPSIS: &str = "...";

/// Limit `text` to `max_length` characters, ending with [ELLIPSIS] when cut
///
/// Text that already fits is returned unchanged. When `max_length` is shorter
/// than the marker itself the text is cut without one.
pub fn ellipsize_at(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let marker_len = ELLIPSIS.chars().count();
    if max_length < marker_len {
        return text.chars().take(max_length).collect();
    }

    let mut truncated: String = text.chars().take(max_length - marker_len).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Like [ellipsize_at], but drops a trailing partial line when the kept part
/// contains a line break, putting the marker on its own line
pub fn ellipsize_at_line(text: &str, max_length: usize) -> String {
    let marker_len = ELLIPSIS.chars().count();
    if text.chars().count() <= max_length || max_length < marker_len {
        return ellipsize_at(text, max_length);
    }

    let kept: String = text.chars().take(max_length - marker_len).collect();
    match kept.rfind('\n') {
        Some(idx) if idx > 0 => format!("{}\n{}", kept[..idx].trim_end(), ELLIPSIS),
        _ => ellipsize_at(text, max_length),
    }
}
