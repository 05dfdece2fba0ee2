//! Tests for `resolve`.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_resolve_minimal() {
    match parse(&["assetgate", "resolve", "/index.html"]).command {
        CliCommand::Resolve {
            url,
            assets,
            out,
            json,
        } => {
            assert_eq!(url, "/index.html");
            assert!(assets.is_none());
            assert!(out.is_none());
            assert!(!json);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_all_flags() {
    let cli = parse(&[
        "assetgate",
        "resolve",
        "https://app.local/app.js",
        "--assets",
        "/srv/bundle",
        "--out",
        "app.js",
        "--json",
    ]);
    match cli.command {
        CliCommand::Resolve {
            url,
            assets,
            out,
            json,
        } => {
            assert_eq!(url, "https://app.local/app.js");
            assert_eq!(assets.as_deref(), Some(Path::new("/srv/bundle")));
            assert_eq!(out.as_deref(), Some(Path::new("app.js")));
            assert!(json);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_requires_url() {
    assert!(Cli::try_parse_from(["assetgate", "resolve"]).is_err());
}
