//! lsa-api - Leadership self-assessment REST server
//!
//! Serves the questionnaire and scoring endpoints, stores assessments in
//! SQLite and appends submitted results to a CSV file.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lsa_common::catalog::Catalog;
use lsa_common::config::{ensure_directory_exists, TomlConfig};
use lsa_common::db::init_database;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lsa_api::api::buildinfo::BuildInfo;
use lsa_api::config::{Overrides, ServerConfig};
use lsa_api::csv_sink::CsvSink;
use lsa_api::{build_router, AppState};

/// Command-line arguments for lsa-api
#[derive(Parser, Debug)]
#[command(name = "lsa-api")]
#[command(about = "Leadership self-assessment REST server")]
#[command(version)]
struct Args {
    /// Port to listen on [default: 5000]
    #[arg(short, long, env = "LSA_PORT")]
    port: Option<u16>,

    /// Folder holding the database and CSV file
    #[arg(short, long, env = "LSA_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// SQLite database file [default: <root>/lsa.db]
    #[arg(long, env = "LSA_DB_PATH")]
    db_path: Option<PathBuf>,

    /// CSV results file [default: <root>/results.csv]
    #[arg(long, env = "LSA_CSV_PATH")]
    csv_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let toml_config = TomlConfig::load();

    let default_filter = toml_config
        .log_level
        .clone()
        .unwrap_or_else(|| "lsa_api=info,lsa_common=info,tower_http=info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {}", BuildInfo::CURRENT);

    let args = Args::parse();
    let config = ServerConfig::resolve(
        Overrides {
            port: args.port,
            root_folder: args.root_folder,
            db_path: args.db_path,
            csv_path: args.csv_path,
        },
        &toml_config,
    );

    ensure_directory_exists(config.root_folder())
        .with_context(|| format!("Failed to create {}", config.root_folder.display()))?;
    info!("Root folder: {}", config.root_folder.display());
    info!("Database path: {}", config.db_path.display());
    info!("CSV path: {}", config.csv_path.display());

    let pool = init_database(&config.db_path)
        .await
        .context("Failed to initialize database")?;
    info!("✓ Database ready");

    let csv = CsvSink::new(&config.csv_path, Catalog::standard());
    csv.ensure_file_exists()
        .await
        .context("Failed to prepare CSV results file")?;

    let app = build_router(AppState::new(pool, csv));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("lsa-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
