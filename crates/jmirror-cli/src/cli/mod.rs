//! CLI for the jmirror JSON content mirror.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jmirror_core::config::{self, MirrorConfig};
use std::path::PathBuf;

use commands::{run_mirror, run_status};

/// Top-level CLI for jmirror.
#[derive(Debug, Parser)]
#[command(name = "jmirror")]
#[command(about = "jmirror: mirror a JSON content API as static files", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/jmirror/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the root document, mirror everything it references and rewrite it.
    Run {
        /// Override the root document URL from the config.
        #[arg(long, value_name = "URL")]
        root_url: Option<String>,
        /// Override the output directory from the config.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Show the persisted URL map.
    Status,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                root_url,
                output_dir,
            } => {
                let cfg = apply_overrides(cfg, root_url, output_dir);
                run_mirror(&cfg)?;
            }
            CliCommand::Status => run_status(&cfg)?,
        }

        Ok(())
    }

    fn load_config(&self) -> Result<MirrorConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_init(),
        }
    }
}

fn apply_overrides(
    mut cfg: MirrorConfig,
    root_url: Option<String>,
    output_dir: Option<PathBuf>,
) -> MirrorConfig {
    if let Some(url) = root_url {
        cfg.root_url = url;
    }
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    cfg
}

#[cfg(test)]
mod tests;
