//! Path and query extraction from a source URL.

/// Returns the URL path without surrounding `/` and the raw query string, if any.
///
/// Returns `None` if the URL cannot be parsed.
pub fn path_and_query(url: &str) -> Option<(String, Option<String>)> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path().trim_matches('/').to_string();
    let query = parsed
        .query()
        .filter(|q| !q.is_empty())
        .map(str::to_string);
    Some((path, query))
}
