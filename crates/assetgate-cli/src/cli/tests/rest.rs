//! Tests for transforms, config-path, completions and the global --config flag.

use super::parse;
use crate::cli::CliCommand;
use clap_complete::Shell;
use std::path::Path;

#[test]
fn cli_parse_transforms() {
    match parse(&["assetgate", "transforms"]).command {
        CliCommand::Transforms => {}
        _ => panic!("expected Transforms"),
    }
}

#[test]
fn cli_parse_config_path() {
    match parse(&["assetgate", "config-path"]).command {
        CliCommand::ConfigPath => {}
        _ => panic!("expected ConfigPath"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["assetgate", "completions", "bash"]).command {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = parse(&["assetgate", "transforms", "--config", "/etc/assetgate.toml"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/assetgate.toml")));
}

#[test]
fn cli_parse_no_config_by_default() {
    let cli = parse(&["assetgate", "config-path"]);
    assert!(cli.config.is_none());
}
