/// Inline math delimiter
pub const DELIMITER: char = '$';

/// Canonicalize extracted equation text to `$...$`.
///
/// Doubled delimiters collapse to one, existing outer delimiters are stripped
/// together with surrounding whitespace, and the remainder is wrapped once.
/// Blank input yields `"$$"`.
pub fn normalize_equation(input: &str) -> String {
    let mut collapsed = input.trim().to_string();
    while collapsed.contains("$$") {
        collapsed = collapsed.replace("$$", "$");
    }

    let inner = collapsed.trim_matches(|c: char| c == DELIMITER || c.is_whitespace());
    format!("{DELIMITER}{inner}{DELIMITER}")
}

/// True for a normalized equation with nothing between its delimiters
pub fn is_blank_equation(normalized: &str) -> bool {
    normalized
        .strip_prefix(DELIMITER)
        .and_then(|s| s.strip_suffix(DELIMITER))
        .map_or(true, |inner| inner.trim().is_empty())
}

/// The equation without its outer delimiters
pub fn strip_delimiters(normalized: &str) -> &str {
    normalized.trim().trim_matches(DELIMITER).trim()
}
