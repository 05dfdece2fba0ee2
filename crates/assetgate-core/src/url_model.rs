//! Request URL handling: path extraction and path-level rewrites.
//!
//! The web view hands over absolute URLs (`https://app.local/index.html`),
//! while extensions and tests often work with path-only references
//! (`/index.html?v=2`). Both forms are accepted.

use percent_encoding::percent_decode_str;
use url::Url;

/// Base used to resolve path-only references. Only the path survives.
const PLACEHOLDER_BASE: &str = "http://assetgate.invalid/";

fn parse(url: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(PLACEHOLDER_BASE).ok()?.join(url).ok()
        }
        Err(_) => None,
    }
}

/// Extracts the percent-decoded path of `url`, without query or fragment.
///
/// Returns `None` if the URL cannot be parsed or has no hierarchical path
/// (`about:blank`, `data:` URLs).
pub fn request_path(url: &str) -> Option<String> {
    let parsed = parse(url)?;
    if parsed.cannot_be_a_base() {
        return None;
    }
    let decoded = percent_decode_str(parsed.path()).decode_utf8().ok()?;
    Some(decoded.into_owned())
}

/// Replaces a leading `from` in the path of `url` with `to`.
///
/// Path-only references are edited as text so they stay path-only; absolute
/// URLs have only their path component changed. Returns `None` when the path
/// does not start with `from`.
pub fn replace_path_prefix(url: &str, from: &str, to: &str) -> Option<String> {
    if url.starts_with('/') {
        let rest = url.strip_prefix(from)?;
        return Some(format!("{to}{rest}"));
    }
    let mut parsed = Url::parse(url).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }
    let rest = parsed.path().strip_prefix(from)?.to_string();
    parsed.set_path(&format!("{to}{rest}"));
    Some(parsed.to_string())
}
