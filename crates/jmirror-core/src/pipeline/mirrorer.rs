//! Fetch → validate → sanitize → persist → record, for one URL at a time.

use std::collections::HashSet;
use std::path::PathBuf;

use super::error::MirrorFailure;
use super::report::RunReport;
use crate::fetch::Fetcher;
use crate::mirror_store::MirrorStore;
use crate::storage::{self, OutputLayout};
use crate::tree::{self, ResourceSink};
use crate::url_model;
use crate::validate;

/// Result of offering one URL to the mirrorer.
#[derive(Debug)]
pub enum MirrorOutcome {
    /// Already in the store (from an earlier run or earlier in this one).
    Skipped,
    /// Fetched and written; carries the new mirror URL.
    Mirrored(String),
    /// Not mirrored; nothing was recorded.
    Failed(MirrorFailure),
}

/// A resource written during this run.
#[derive(Debug, Clone)]
pub struct MirroredFile {
    pub url: String,
    pub path: PathBuf,
}

/// Mirrors URLs into `layout` and records them in `store`.
///
/// Each URL gets a single attempt per run: one that already failed is not
/// fetched again when it shows up a second time.
pub struct Mirrorer<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    layout: &'a OutputLayout,
    store: &'a mut MirrorStore,
    failed: HashSet<String>,
    written: Vec<MirroredFile>,
    report: RunReport,
}

impl<'a, F: Fetcher + ?Sized> Mirrorer<'a, F> {
    pub fn new(fetcher: &'a F, layout: &'a OutputLayout, store: &'a mut MirrorStore) -> Self {
        Self {
            fetcher,
            layout,
            store,
            failed: HashSet::new(),
            written: Vec::new(),
            report: RunReport::default(),
        }
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Mirrors `url` unless it is already in the store.
    pub fn mirror(&mut self, url: &str) -> MirrorOutcome {
        if self.store.contains(url) || self.failed.contains(url) {
            tracing::debug!("skip {}", url);
            self.report.skipped += 1;
            return MirrorOutcome::Skipped;
        }
        match self.try_mirror(url) {
            Ok(mirror_url) => {
                tracing::info!("mirrored {} -> {}", url, mirror_url);
                self.report.mirrored += 1;
                MirrorOutcome::Mirrored(mirror_url)
            }
            Err(failure) => {
                match &failure {
                    MirrorFailure::Fetch(e) if e.is_timeout() => {
                        tracing::warn!("not mirrored {}: timed out", url)
                    }
                    _ => tracing::warn!("not mirrored {}: {}", url, failure),
                }
                self.failed.insert(url.to_string());
                self.report.failed += 1;
                MirrorOutcome::Failed(failure)
            }
        }
    }

    fn try_mirror(&mut self, url: &str) -> Result<String, MirrorFailure> {
        let candidate = url_model::mirror_file_name(url).ok_or(MirrorFailure::UnmappableUrl)?;
        let body = self.fetcher.fetch(url)?;
        let doc = validate::parse_json(&body).ok_or(MirrorFailure::InvalidContent)?;
        let doc = tree::sanitize(&doc);

        let file_name = self.store.resolve_file_name(url, candidate);
        let path = self.layout.local_path(&file_name);
        storage::write_json_atomic(&path, &doc).map_err(MirrorFailure::Persist)?;
        self.store.claim_file_name(&file_name, url);

        let mirror_url = self.layout.mirror_url(&file_name);
        self.store.record(url, mirror_url.clone());
        self.written.push(MirroredFile {
            url: url.to_string(),
            path,
        });
        Ok(mirror_url)
    }

    /// Hands back the run counters and the files written during the run.
    pub fn finish(self) -> (RunReport, Vec<MirroredFile>) {
        (self.report, self.written)
    }
}

impl<F: Fetcher + ?Sized> ResourceSink for Mirrorer<'_, F> {
    fn on_resource(&mut self, url: &str) {
        let _ = self.mirror(url);
    }
}
