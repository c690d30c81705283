//! rotation-status
//!
//! Command line tool for rotation health statuses.
//!
//! # Commands
//!
//! ```text
//! list            print the canonical status names
//! parse <NAME>    decode a status name, fail on anything unrecognized
//! check <FILE>    load and validate a status document, print its table
//! watch <FILE>    follow a status document and log every change
//! ```
//!
//! Command output goes to stdout, logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rotation_status::config::{follow_updates, load_config, ConfigWatcher, RotationsConfig};
use rotation_status::observability::logging;
use rotation_status::rotation::{RotationStatus, SharedStatusTable, StatusTable};

#[derive(Parser)]
#[command(name = "rotation-status")]
#[command(about = "Inspect and validate global rotation health statuses", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). Defaults to the document's level.
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the canonical status names
    List,
    /// Decode a status name
    Parse {
        name: String,
    },
    /// Load and validate a rotation status document
    Check {
        file: PathBuf,
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow a rotation status document and log status changes
    Watch {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List => {
            logging::init(cli.log_level.as_deref().unwrap_or("info"));
            for status in RotationStatus::ALL {
                println!("{}", status);
            }
        }
        Commands::Parse { name } => {
            logging::init(cli.log_level.as_deref().unwrap_or("info"));
            let status: RotationStatus = name.parse()?;
            println!("{}", status);
        }
        Commands::Check { file, json } => {
            let config = load(&file, cli.log_level.as_deref())?;
            let table = StatusTable::from_config(&config);

            if json {
                println!("{}", table.render_json()?);
            } else {
                print!("{}", table.render_text());
            }

            tracing::info!(
                path = ?file,
                rotations = table.len(),
                status_in = table.count(RotationStatus::In),
                status_out = table.count(RotationStatus::Out),
                status_unknown = table.count(RotationStatus::Unknown),
                "Rotation status document is valid"
            );
        }
        Commands::Watch { file } => {
            let config = load(&file, cli.log_level.as_deref())?;
            watch(&file, config).await?;
        }
    }

    Ok(())
}

/// Load a document, then initialize logging with the flag or the document's level.
fn load(path: &Path, log_level: Option<&str>) -> Result<RotationsConfig, Box<dyn std::error::Error>> {
    let result = load_config(path);
    let level = match (&result, log_level) {
        (_, Some(level)) => level.to_string(),
        (Ok(config), None) => config.observability.log_level.clone(),
        (Err(_), None) => "info".to_string(),
    };
    logging::init(&level);

    Ok(result?)
}

async fn watch(path: &Path, config: RotationsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedStatusTable::new(StatusTable::from_config(&config));
    tracing::info!(
        path = ?path,
        rotations = shared.load().len(),
        "Rotation status table loaded"
    );

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    follow_updates(&shared, &mut updates, shutdown_signal()).await;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
