// govanity command-line entry point.
// Resolves vanity paths and prints repository metadata as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use govanity::VanityEngine;
use govanity::config::Settings;
use govanity::telemetry;

#[derive(Debug, Parser)]
#[command(name = "govanity", version, about = "Go vanity import path resolver")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the repository name a path resolves to.
    Resolve {
        /// Inbound request path, e.g. /libs/checksum.
        path: String,
    },
    /// Resolve a path and print its package page data.
    Repo {
        path: String,
    },
    /// List the owner's packages in the configured language.
    List,
}

#[derive(Serialize)]
struct Resolution<'a> {
    path: &'a str,
    repo_name: String,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn engine(settings: &Settings) -> Result<VanityEngine> {
    let config = settings.engine_config().context("invalid configuration")?;
    VanityEngine::from_config(config).context("failed to start resolver")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.settings.log_format)?;

    // Resolution is pure; only the GitHub-backed commands need an owner.
    match cli.command {
        Command::Resolve { path } => print_json(&Resolution {
            repo_name: cli.settings.mapping_rules().resolve(&path),
            path: &path,
        }),
        Command::Repo { path } => print_json(&engine(&cli.settings)?.package(&path).await),
        Command::List => print_json(&engine(&cli.settings)?.packages().await),
    }
}
