//! Per-run counters.

use std::fmt;

/// Outcome counts of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Resources fetched and written during this run.
    pub mirrored: usize,
    /// URLs skipped because they were already in the store.
    pub skipped: usize,
    /// URLs that failed to fetch, validate or persist.
    pub failed: usize,
    /// Listing pages mirrored by the paginator.
    pub pages: usize,
    /// URL occurrences replaced in the root document.
    pub rewritten: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mirrored {} (pages {}), skipped {}, failed {}, rewrote {} urls",
            self.mirrored, self.pages, self.skipped, self.failed, self.rewritten
        )
    }
}
