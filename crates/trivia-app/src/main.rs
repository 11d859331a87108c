//! Trivia - question server for quiz frontends.
//!
//! Loads `.env`, opens the question database and serves the JSON API until
//! the process is stopped.

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trivia_core::DEFAULT_PAGE_SIZE;
use trivia_server::{Server, ServerConfig, DEFAULT_API_PREFIX, DEFAULT_HOST, DEFAULT_PORT};
use trivia_storage::{Database, StorageConfig};

/// Trivia - question server for quiz frontends
#[derive(Parser, Debug)]
#[command(name = "trivia", version, about)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Prefix every API route is mounted under
    #[arg(long, default_value = DEFAULT_API_PREFIX)]
    api_prefix: String,

    /// Questions per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Database name (overrides DATABASE_NAME)
    #[arg(long)]
    database_name: Option<String>,

    /// Directory holding the database file (overrides TRIVIA_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long)]
    in_memory: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Apply command-line overrides on top of the environment settings.
    fn storage_config(&self, mut config: StorageConfig) -> StorageConfig {
        if self.in_memory {
            return StorageConfig::in_memory();
        }
        if let Some(name) = &self.database_name {
            config.database_name = name.clone();
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        config
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig::default()
            .with_host(self.host.clone())
            .with_port(self.port)
            .with_api_prefix(self.api_prefix.clone())
            .with_page_size(self.page_size)
    }
}

/// Get the logs directory.
fn logs_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "trivia", "trivia").map(|dirs| dirs.data_dir().join("logs"))
}

/// Initialize logging to stdout plus a daily rolling file.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trivia={},warn", log_level)));

    if let Some(log_dir) = logs_dir() {
        if std::fs::create_dir_all(&log_dir).is_ok() {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("trivia")
                .filename_suffix("log")
                .build(&log_dir)
                .ok();

            if let Some(appender) = file_appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(std::io::stdout))
                    .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                    .init();

                tracing::info!("Logging to {:?}", log_dir);
                return Some(guard);
            }
        }
    }

    // Fallback: console logging only
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::warn!("File logging unavailable, using console only");
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal; real environment variables still apply
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();

    // Keep the guard alive for the duration of the program
    let _log_guard = init_logging(&args);

    tracing::info!("Starting Trivia...");
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let storage = args.storage_config(
        StorageConfig::from_env().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?,
    );
    tracing::info!("Storage: {:?}", storage);

    let db = Database::open(&storage).map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    if !storage.is_in_memory() {
        tracing::info!("Database opened at {:?}", storage.db_path()?);
    }

    let server = Server::with_database(args.server_config(), db)?;
    server.run().await?;

    tracing::info!("Trivia shutting down");
    Ok(())
}
