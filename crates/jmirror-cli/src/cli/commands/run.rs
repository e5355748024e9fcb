//! `jmirror run` – one full mirroring pass.

use anyhow::Result;
use jmirror_core::config::MirrorConfig;
use jmirror_core::fetch::CurlFetcher;
use jmirror_core::pipeline;

pub fn run_mirror(cfg: &MirrorConfig) -> Result<()> {
    let fetcher = CurlFetcher::new(&cfg.http());
    let report = pipeline::run(cfg, &fetcher)?;
    println!(
        "Mirrored {} into {}: {}",
        cfg.root_url,
        cfg.output_dir.display(),
        report
    );
    Ok(())
}
