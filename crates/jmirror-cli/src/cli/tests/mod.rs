//! CLI parse tests.

use super::{apply_overrides, Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}


#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["jmirror"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["jmirror", "add", "https://x"]).is_err());
}

#[test]
fn overrides_replace_config_values() {
    let cfg = jmirror_core::config::MirrorConfig::default();
    let cfg = apply_overrides(
        cfg,
        Some("https://api.example.com/feed".to_string()),
        Some(std::path::PathBuf::from("mirror")),
    );
    assert_eq!(cfg.root_url, "https://api.example.com/feed");
    assert_eq!(cfg.output_dir, std::path::PathBuf::from("mirror"));
}

#[test]
fn no_overrides_keep_config() {
    let cfg = jmirror_core::config::MirrorConfig::default();
    let expected = cfg.root_url.clone();
    let cfg = apply_overrides(cfg, None, None);
    assert_eq!(cfg.root_url, expected);
    assert!(matches!(
        parse(&["jmirror", "status"]).command,
        CliCommand::Status
    ));
}
