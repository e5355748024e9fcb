//! Persist the mirror map to disk (pretty JSON, sorted by source URL) so runs are incremental.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use super::MirrorStore;
use crate::storage;

impl MirrorStore {
    /// Load the map from `path`. A missing file yields an empty store; an
    /// unreadable or malformed file is logged and also yields an empty store.
    pub fn load_from_path(path: &Path) -> MirrorStore {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no url map at {}, starting empty", path.display());
                return MirrorStore::new();
            }
            Err(e) => {
                tracing::warn!("read url map {}: {}; starting empty", path.display(), e);
                return MirrorStore::new();
            }
        };
        match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
            Ok(entries) => {
                tracing::info!("loaded {} url map entries from {}", entries.len(), path.display());
                MirrorStore::from_entries(entries)
            }
            Err(e) => {
                tracing::warn!("parse url map {}: {}; starting empty", path.display(), e);
                MirrorStore::new()
            }
        }
    }

    /// Save the full map to `path` (creates parent dirs if needed).
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        storage::write_json_atomic(path, self.entries())?;
        tracing::debug!("saved {} url map entries to {}", self.len(), path.display());
        Ok(())
    }
}
