//! lsa - Leadership self-assessment terminal client
//!
//! Runs the questionnaire, shows scores with a text bar chart and
//! recommendations, keeps the last result on this machine and optionally
//! saves it through an lsa-api server.

use anyhow::Result;
use clap::Parser;
use lsa_common::catalog::Catalog;
use lsa_common::config::{resolve_root_folder, TomlConfig, ROOT_FOLDER_ENV};
use lsa_common::snapshot::{SnapshotStore, DEFAULT_SNAPSHOT_KEY};
use tracing::debug;

mod cli;
mod client;
mod commands;
mod questionnaire;
mod report;

use cli::{Cli, Commands};
use client::DEFAULT_SERVER_URL;
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let toml_config = TomlConfig::load();

    // Logs go to stderr so they never mix with the questionnaire
    let default_filter = toml_config.log_level.clone().unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root_folder = resolve_root_folder(cli.root_folder.as_deref(), ROOT_FOLDER_ENV, &toml_config);
    let server_url = cli
        .server
        .clone()
        .or_else(|| toml_config.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    debug!(root_folder = %root_folder.display(), server_url = %server_url, "Resolved settings");

    let ctx = Context {
        catalog: Catalog::standard(),
        snapshot: SnapshotStore::new(&root_folder, DEFAULT_SNAPSHOT_KEY),
        server_url,
    };

    match cli.command {
        Commands::Take(args) => commands::take(&ctx, &args.persist).await,
        Commands::Score(args) => commands::score_file(&ctx, &args.answers, &args.persist).await,
        Commands::Show => commands::show(&ctx),
        Commands::Reset => commands::reset(&ctx),
        Commands::History => commands::history(&ctx).await,
        Commands::Users => commands::users(&ctx).await,
        Commands::View(args) => commands::view(&ctx, args.id).await,
        Commands::Questions => commands::questions(&ctx),
    }
}
