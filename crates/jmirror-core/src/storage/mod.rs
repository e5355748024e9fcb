//! Disk I/O and file lifecycle for mirrored documents.
//!
//! Every JSON file is written to a `.part` temp file and atomically renamed
//! into place, so a crash never leaves a half-written document under its
//! final name.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.json` → `a.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Pretty JSON with 2-space indent; non-ASCII is written as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut s = serde_json::to_string_pretty(value).context("serialize json")?;
    s.push('\n');
    Ok(s)
}

/// Serializes `value` and writes it to `path` via temp file + rename.
/// Creates parent directories as needed. On failure the temp file is removed.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = to_pretty_json(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let tmp = temp_path(path);
    let result = fs::write(&tmp, text.as_bytes())
        .with_context(|| format!("write {}", tmp.display()))
        .and_then(|()| {
            fs::rename(&tmp, path)
                .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))
        });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Where mirrored files live on disk and under which address they are published.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    dir: PathBuf,
    publish_prefix: String,
}

impl OutputLayout {
    /// `publish_prefix` is the address of `dir` itself, without a trailing `/`.
    pub fn new(dir: impl Into<PathBuf>, publish_prefix: impl Into<String>) -> Self {
        let publish_prefix = publish_prefix.into().trim_end_matches('/').to_string();
        Self {
            dir: dir.into(),
            publish_prefix,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn mirror_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.publish_prefix, file_name)
    }

    /// Inverse of [`OutputLayout::mirror_url`]: the file name a mirror URL points at,
    /// if it was published under this layout.
    pub fn file_name_of<'a>(&self, mirror_url: &'a str) -> Option<&'a str> {
        mirror_url
            .strip_prefix(self.publish_prefix.as_str())?
            .strip_prefix('/')
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
    }
}
