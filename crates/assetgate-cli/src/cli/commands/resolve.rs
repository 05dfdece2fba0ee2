//! `assetgate resolve <url>` – run one request through the pipeline.

use anyhow::{Context, Result};
use assetgate_core::config::GateConfig;
use assetgate_core::resolver::{DirAssetResolver, GuessMimeResolver};
use assetgate_core::{InterceptHost, InterceptionPipeline, PriorityRegistry};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub url: String,
    pub assets: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub json: bool,
}

/// Metadata printed for a resolved request.
#[derive(Debug, Serialize)]
struct ResponseSummary<'a> {
    url: &'a str,
    effective_url: &'a str,
    mime_type: Option<&'a str>,
    encoding: Option<&'a str>,
    bytes: u64,
}

/// Wire the directory-backed asset store, the configured settings and the
/// configured transforms into a host.
pub fn build_host(cfg: &GateConfig, asset_root: &Path) -> Result<InterceptHost> {
    let pipeline = InterceptionPipeline::new(
        Arc::new(PriorityRegistry::new()),
        Arc::new(DirAssetResolver::new(asset_root)),
        Arc::new(GuessMimeResolver),
    )
    .with_settings(cfg.pipeline.clone());
    cfg.install_transforms(pipeline.registry())?;
    Ok(InterceptHost::new(pipeline))
}

fn asset_root(cfg: &GateConfig, args: &ResolveArgs) -> Result<PathBuf> {
    match args.assets.as_ref().or(cfg.asset_root.as_ref()) {
        Some(root) => Ok(root.clone()),
        None => std::env::current_dir().context("current dir"),
    }
}

pub fn run_resolve(cfg: &GateConfig, args: &ResolveArgs) -> Result<()> {
    let root = asset_root(cfg, args)?;
    tracing::info!("resolve url={} assets={}", args.url, root.display());
    let host = build_host(cfg, &root)?;
    tracing::debug!(
        "namespace={} sentinel={}",
        host.pipeline().settings().namespace,
        host.pipeline().settings().sentinel_path
    );

    let Some(mut response) = host.should_intercept_request(&args.url).into_response() else {
        anyhow::bail!("not found: {}", args.url);
    };

    let bytes = match &args.out {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let n = io::copy(&mut response.stream, &mut file)
                .with_context(|| format!("write {}", path.display()))?;
            file.flush()?;
            n
        }
        None => {
            let mut stdout = io::stdout().lock();
            let n = io::copy(&mut response.stream, &mut stdout).context("write body")?;
            stdout.flush()?;
            n
        }
    };

    let summary = ResponseSummary {
        url: &args.url,
        effective_url: &response.effective_url,
        mime_type: response.mime_type.as_deref(),
        encoding: response.encoding.as_deref(),
        bytes,
    };

    // Keep stdout clean for the body when no --out was given.
    let text = if args.json {
        serde_json::to_string_pretty(&summary)?
    } else {
        format!(
            "effective-url: {}\nmime-type: {}\nencoding: {}\nbytes: {}",
            summary.effective_url,
            summary.mime_type.unwrap_or("-"),
            summary.encoding.unwrap_or("-"),
            summary.bytes
        )
    };
    if args.out.is_some() {
        println!("{text}");
    } else {
        eprintln!("{text}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetgate_core::builtin::{TransformEntry, TransformSpec};

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("www")).unwrap();
        std::fs::write(dir.path().join("www/index.html"), "<h1>hi</h1>").unwrap();
        dir
    }

    fn args(url: &str, assets: &Path, out: Option<PathBuf>) -> ResolveArgs {
        ResolveArgs {
            url: url.to_string(),
            assets: Some(assets.to_path_buf()),
            out,
            json: false,
        }
    }

    #[test]
    fn resolve_writes_body_to_out_file() {
        let dir = tree();
        let out = dir.path().join("out.html");
        run_resolve(
            &GateConfig::default(),
            &args("/index.html", dir.path(), Some(out.clone())),
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "<h1>hi</h1>");
    }

    #[test]
    fn resolve_missing_asset_is_an_error() {
        let dir = tree();
        let err = run_resolve(
            &GateConfig::default(),
            &args("/missing.html", dir.path(), Some(dir.path().join("out"))),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "not found: /missing.html");
    }

    #[test]
    fn build_host_installs_configured_transforms() {
        let dir = tree();
        let cfg = GateConfig {
            transforms: vec![TransformEntry {
                priority: 1,
                spec: TransformSpec::PathPrefix {
                    from: "/app/".to_string(),
                    to: "/".to_string(),
                },
            }],
            ..GateConfig::default()
        };
        let host = build_host(&cfg, dir.path()).unwrap();
        assert_eq!(host.registry().priorities(), [1]);
        assert_eq!(host.pipeline().settings(), &cfg.pipeline);
        let response = host
            .should_intercept_request("/app/index.html")
            .into_response()
            .unwrap();
        assert_eq!(response.effective_url, "/index.html");
    }

    #[test]
    fn summary_serializes_as_json() {
        let summary = ResponseSummary {
            url: "/a.css",
            effective_url: "/a.css?v=1",
            mime_type: Some("text/css"),
            encoding: Some("UTF-8"),
            bytes: 3,
        };
        let value: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["effective_url"], "/a.css?v=1");
        assert_eq!(value["mime_type"], "text/css");
        assert_eq!(value["bytes"], 3);
    }
}
