//! General helpers shared by the parser and the lint rules.

/// Check if a byte is CSS whitespace
#[inline]
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Check if a line contains only whitespace
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(is_whitespace)
}

/// Leading indentation of a line (spaces and tabs)
#[inline]
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .bytes()
        .position(|b| b != b' ' && b != b'\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Check if a byte can appear inside a class or placeholder name
#[inline]
pub fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c >= 0x80
}

/// Pluralize a noun for summary lines
#[inline]
pub fn plural(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}
