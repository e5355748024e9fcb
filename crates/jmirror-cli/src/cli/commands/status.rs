//! `jmirror status` – show the persisted URL map.

use anyhow::Result;
use jmirror_core::config::MirrorConfig;
use jmirror_core::mirror_store::MirrorStore;

pub fn run_status(cfg: &MirrorConfig) -> Result<()> {
    let path = cfg.cache_path();
    let store = MirrorStore::load_from_path(&path);
    println!("URL map: {} ({} entries)", path.display(), store.len());
    for (source, mirror) in store.iter() {
        println!("{source} -> {mirror}");
    }
    Ok(())
}
