use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::OutputLayout;

/// HTTP client parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Overall timeout in seconds for a single GET.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Optional User-Agent header; libcurl's default is used when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 10,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/jmirror/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// URL of the root JSON document.
    pub root_url: String,
    /// Directory that receives the root document and every mirrored resource.
    pub output_dir: PathBuf,
    /// Published-content base address; mirror URLs are `publish_base/output_dir/file`.
    pub publish_base: String,
    /// File name of the root document inside `output_dir`.
    #[serde(default = "default_root_filename")]
    pub root_filename: String,
    /// Persisted URL map; defaults to `output_dir/url_map.json`.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,
    /// Also rewrite URLs inside resources mirrored during the run (off by default).
    #[serde(default)]
    pub rewrite_resources: bool,
    /// Optional HTTP section; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

fn default_root_filename() -> String {
    "main.json".to_string()
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            root_url: "https://truyenx.link/truyensextv".to_string(),
            output_dir: PathBuf::from("downloaded_content"),
            publish_base: "https://raw.githubusercontent.com/YOUR_USERNAME/YOUR_REPO/main"
                .to_string(),
            root_filename: default_root_filename(),
            cache_file: None,
            rewrite_resources: false,
            http: None,
        }
    }
}

impl MirrorConfig {
    /// Path of the persisted URL map.
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| self.output_dir.join("url_map.json"))
    }

    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }

    /// Published address of `output_dir`. A relative `output_dir` is appended to
    /// `publish_base` as-is; an absolute one contributes only its last component.
    pub fn publish_prefix(&self) -> String {
        let rel = if self.output_dir.is_absolute() {
            self.output_dir
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default()
        } else {
            self.output_dir.clone()
        };
        let rel: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let base = self.publish_base.trim_end_matches('/');
        if rel.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, rel.join("/"))
        }
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(self.output_dir.clone(), self.publish_prefix())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jmirror")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MirrorConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MirrorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit path. A missing or invalid file is an error.
pub fn load_from_path(path: &Path) -> Result<MirrorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: MirrorConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
