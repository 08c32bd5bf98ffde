/// Main entry point for the Habit Tracker server
///
/// This file sets up logging, parses command line arguments, and starts the
/// HTTP server together with the reminder scheduler.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_tracker_server::config::{default_data_dir, DEFAULT_HOST, DEFAULT_PORT};
use habit_tracker_server::{HabitTrackerServer, ServerConfig, StorageBackend};

/// Command line arguments for the Habit Tracker server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the habit and progress data
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Storage backend for the data directory
    #[arg(long, value_enum, default_value_t = StorageBackend::Json)]
    backend: StorageBackend,

    /// Address to listen on
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_tracker_server={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Habit Tracker server");

    let data_dir = match args.data_dir {
        Some(path) => {
            std::fs::create_dir_all(&path)?;
            path
        }
        None => default_data_dir()?,
    };

    info!("Using data directory: {}", data_dir.display());

    let config = ServerConfig::new(data_dir)
        .with_backend(args.backend)
        .with_address(args.host, args.port);

    let server = HabitTrackerServer::new(config).await?;
    server.run().await?;

    info!("Habit Tracker server shutdown complete");
    Ok(())
}
