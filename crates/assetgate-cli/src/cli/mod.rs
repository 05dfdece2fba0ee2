//! CLI for the assetgate interception pipeline.

mod commands;

use anyhow::Result;
use assetgate_core::config;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_completions, run_config_path, run_resolve, run_transforms, ResolveArgs};

/// Top-level CLI for assetgate.
#[derive(Debug, Parser)]
#[command(name = "assetgate")]
#[command(about = "assetgate: resolve web view requests through the interception chain", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/assetgate/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a request URL through the pipeline and emit the response.
    Resolve {
        /// Request URL, absolute or path-only (e.g. /index.html).
        url: String,
        /// Directory holding the asset namespace folder (overrides config `asset_root`).
        #[arg(long, value_name = "DIR")]
        assets: Option<PathBuf>,
        /// Write the body here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Print response metadata as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the transforms declared in the config, by priority.
    Transforms,

    /// Print the config file path.
    ConfigPath,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let cfg = match (&cli.command, &cli.config) {
            (CliCommand::Completions { shell }, _) => return run_completions(*shell),
            (CliCommand::ConfigPath, _) => return run_config_path(cli.config.as_deref()),
            (_, Some(path)) => config::load_from(path)?,
            (_, None) => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                url,
                assets,
                out,
                json,
            } => run_resolve(
                &cfg,
                &ResolveArgs {
                    url,
                    assets,
                    out,
                    json,
                },
            )?,
            CliCommand::Transforms => run_transforms(&cfg)?,
            CliCommand::ConfigPath | CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
