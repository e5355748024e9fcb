//! Filename-safe component sanitization.

/// True for characters kept verbatim in a mirror filename.
fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '.'
}

/// Replaces every character that is not alphanumeric, `-`, `_` or `.` with `_`.
///
/// One input character maps to exactly one output character, so two inputs
/// with different alphanumeric content never sanitize to the same string.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if is_kept(c) { c } else { '_' })
        .collect()
}
