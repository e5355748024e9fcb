//! One full mirroring run.
//!
//! 1. Fetch and parse the root document (fatal on failure; nothing written).
//! 2. Load the URL map, sanitize the root and write it under the root filename.
//! 3. Mirror the listing pages, then every resource the root references.
//! 4. Optionally rewrite the resources written in this run.
//! 5. Rewrite the root with the final map, write it again, save the map.

mod error;
mod mirrorer;
mod report;

pub use error::{MirrorFailure, RootError};
pub use mirrorer::{MirrorOutcome, MirroredFile, Mirrorer};
pub use report::RunReport;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::MirrorConfig;
use crate::fetch::Fetcher;
use crate::mirror_store::MirrorStore;
use crate::paginate;
use crate::storage;
use crate::tree;
use crate::validate;

/// Runs the whole pipeline once against `fetcher`.
pub fn run<F: Fetcher + ?Sized>(cfg: &MirrorConfig, fetcher: &F) -> Result<RunReport> {
    let root_url = cfg.root_url.as_str();
    let root = fetch_root(root_url, fetcher)?;
    let root = tree::sanitize(&root);

    let layout = cfg.layout();
    let cache_path = cfg.cache_path();
    let mut store = MirrorStore::load_from_path(&cache_path);
    store.adopt_layout(&layout);

    let root_path = layout.local_path(&cfg.root_filename);
    storage::write_json_atomic(&root_path, &root)
        .with_context(|| format!("write root document {}", root_path.display()))?;
    store.reserve_file_name(&cfg.root_filename, root_url);
    if cache_path.parent() == Some(layout.dir()) {
        if let Some(name) = cache_path.file_name() {
            store.reserve_file_name(&name.to_string_lossy(), "");
        }
    }
    let root_mirror = layout.mirror_url(&cfg.root_filename);
    for stale in store.remove_entries_for_mirror(&root_mirror, root_url) {
        tracing::info!("dropping {} from url map: {} now holds {}", stale, root_mirror, root_url);
    }
    store.record(root_url, root_mirror);

    let mut mirrorer = Mirrorer::new(fetcher, &layout, &mut store);
    let pages = paginate::page_count(&root);
    let mirrored_pages = paginate::paginate(root_url, pages, &mut mirrorer);
    tree::crawl(&root, &mut mirrorer);
    let (mut report, written) = mirrorer.finish();
    report.pages = mirrored_pages;

    if cfg.rewrite_resources {
        rewrite_mirrored(&written, &store);
    }

    let mut root = root;
    report.rewritten = tree::rewrite(&mut root, &store);
    storage::write_json_atomic(&root_path, &root)
        .with_context(|| format!("write root document {}", root_path.display()))?;
    store
        .save_to_path(&cache_path)
        .with_context(|| format!("save url map {}", cache_path.display()))?;

    tracing::info!("run complete for {}: {}", root_url, report);
    Ok(report)
}

fn fetch_root<F: Fetcher + ?Sized>(url: &str, fetcher: &F) -> Result<Value, RootError> {
    let body = fetcher.fetch(url).map_err(|source| RootError::Fetch {
        url: url.to_string(),
        source,
    })?;
    validate::parse_json(&body).ok_or_else(|| RootError::InvalidJson {
        url: url.to_string(),
    })
}

/// Re-reads each file written this run and rewrites its URLs with `store`.
/// Failures are logged; the file keeps its unrewritten content.
fn rewrite_mirrored(files: &[MirroredFile], store: &MirrorStore) {
    for file in files {
        let result = std::fs::read_to_string(&file.path)
            .with_context(|| format!("read {}", file.path.display()))
            .and_then(|text| {
                let mut doc: Value = serde_json::from_str(&text)
                    .with_context(|| format!("parse {}", file.path.display()))?;
                if tree::rewrite(&mut doc, store) > 0 {
                    storage::write_json_atomic(&file.path, &doc)?;
                }
                Ok(())
            });
        if let Err(e) = result {
            tracing::warn!("rewrite of {} skipped: {:#}", file.url, e);
        }
    }
}
