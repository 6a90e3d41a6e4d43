//! Title to filename token conversion.

/// Maximum length of a sanitized token, in characters.
pub const MAX_TOKEN_LEN: usize = 50;

/// Token returned when nothing survives sanitization.
pub const FALLBACK_TOKEN: &str = "page";

/// Convert a human title into a stable path fragment.
///
/// Whitespace and `- . : / \` become `_`, anything else outside
/// `[A-Za-z0-9_]` is dropped, the result is lowercased and cut to
/// [`MAX_TOKEN_LEN`] characters. An empty result yields [`FALLBACK_TOKEN`].
///
/// ```
/// use folio_common::sanitize;
///
/// assert_eq!(sanitize("Revenue Report!!"), "revenue_report");
/// assert_eq!(sanitize("   "), "___");
/// assert_eq!(sanitize("!!"), "page");
/// ```
pub fn sanitize(title: &str) -> String {
    let token: String = title
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            '-' | '.' | ':' | '/' | '\\' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .take(MAX_TOKEN_LEN)
        .collect();

    if token.is_empty() {
        FALLBACK_TOKEN.to_string()
    } else {
        token
    }
}
