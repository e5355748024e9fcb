//! URL modeling and mirror filename derivation.
//!
//! Derives a flat, deterministic `.json` filename from a source URL's path
//! (and query, so paginated URLs stay distinct).

mod path;
mod sanitize;

pub use path::path_and_query;
pub use sanitize::sanitize_component;

use sha2::{Digest, Sha256};

/// Suffix of every mirrored file.
pub const MIRROR_SUFFIX: &str = ".json";

/// Stem used when the URL has no path and no query.
const DEFAULT_STEM: &str = "index";

/// Longest stem kept before the name is shortened and tagged with a URL hash.
const MAX_STEM_BYTES: usize = 200;

/// Derives the mirror filename for `url`.
///
/// The path (without surrounding `/`) is sanitized; a query string is appended
/// after `_`. Returns `None` for unparseable URLs.
///
/// # Examples
///
/// - `https://api.example.com/v1/series/42` → `"v1_series_42.json"`
/// - `https://api.example.com/feed?page=2` → `"feed_page_2.json"`
/// - `https://api.example.com/` → `"index.json"`
pub fn mirror_file_name(url: &str) -> Option<String> {
    let (path, query) = path_and_query(url)?;
    let mut stem = sanitize_component(&path);
    if let Some(q) = query {
        if !stem.is_empty() {
            stem.push('_');
        }
        stem.push_str(&sanitize_component(&q));
    }
    if stem.is_empty() {
        stem = DEFAULT_STEM.to_string();
    }
    if stem.len() > MAX_STEM_BYTES {
        let mut take = MAX_STEM_BYTES;
        while take > 0 && !stem.is_char_boundary(take) {
            take -= 1;
        }
        stem.truncate(take);
        stem.push('-');
        stem.push_str(&url_tag(url));
    }
    Some(format!("{stem}{MIRROR_SUFFIX}"))
}

/// Inserts the URL tag before the suffix: `feed.json` → `feed-1a2b3c4d.json`.
/// Used when a different URL already owns `file_name`.
pub fn disambiguate(file_name: &str, url: &str) -> String {
    let stem = file_name.strip_suffix(MIRROR_SUFFIX).unwrap_or(file_name);
    format!("{stem}-{}{MIRROR_SUFFIX}", url_tag(url))
}

/// First 8 hex chars of SHA-256(url).
fn url_tag(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    hex::encode(&digest[..4])
}
