//! Listing pagination: mirror `base?page=1..=N` before the crawl.

use serde_json::Value;

use crate::fetch::Fetcher;
use crate::pipeline::{MirrorOutcome, Mirrorer};

/// Number of listing pages advertised by the root document at
/// `load_more.pageInfo.last_page`; 1 when absent or not a number.
pub fn page_count(root: &Value) -> u64 {
    let last_page = root
        .get("load_more")
        .and_then(|lm| lm.get("pageInfo"))
        .and_then(|pi| pi.get("last_page"));
    match last_page {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(1),
        _ => 1,
    }
}

/// `base?page=n`, or `base&page=n` when `base` already has a query.
pub fn page_url(base_url: &str, page: u64) -> String {
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}page={page}")
}

/// Mirrors pages `1..=total_pages` of `base_url`. Pages already in the store
/// are skipped; failed pages are logged by the mirrorer and left out.
/// Returns the number of pages mirrored in this call.
pub fn paginate<F: Fetcher + ?Sized>(
    base_url: &str,
    total_pages: u64,
    mirrorer: &mut Mirrorer<'_, F>,
) -> usize {
    let mut mirrored = 0;
    for page in 1..=total_pages {
        let url = page_url(base_url, page);
        if let MirrorOutcome::Mirrored(_) = mirrorer.mirror(&url) {
            mirrored += 1;
        }
    }
    tracing::debug!("paginated {}: {} of {} pages mirrored", base_url, mirrored, total_pages);
    mirrored
}
