/// Strips decoder artifacts (NUL, BOM, zero-width space) and turns
/// non-breaking spaces into plain ones so label separators match.
pub(crate) fn normalize_text(value: &str) -> String {
    value
        .replace(['\u{0}', '\u{feff}', '\u{200b}'], "")
        .replace('\u{a0}', " ")
}

/// Cuts `value` down to at most `max_chars` characters.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => &value[..byte_offset],
        None => value,
    }
}
