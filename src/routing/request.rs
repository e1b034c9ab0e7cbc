//! Request path normalization.
//!
//! Raw request URIs are turned into the path the matcher sees:
//! URL-decode, drop the query string, trim whitespace, strip the base prefix.

use std::borrow::Cow;

/// A normalized request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    path: String,
}

impl RequestPath {
    /// Normalize a raw request URI. `base_prefix` is removed once from the
    /// start of the path when present.
    pub fn parse(raw_uri: &str, base_prefix: Option<&str>) -> Self {
        let decoded = decode(raw_uri);
        let without_query = match decoded.find('?') {
            Some(pos) => &decoded[..pos],
            None => &decoded[..],
        };
        let trimmed = without_query.trim();

        let path = match base_prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => trimmed.strip_prefix(prefix).unwrap_or(trimmed),
            None => trimmed,
        };

        Self {
            path: path.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// True for the site root (`/`).
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

/// Form-style decoding: `+` is a space, `%XX` is a byte. Malformed UTF-8
/// after decoding is replaced rather than rejected.
fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}
