mod persistence;
mod telemetry;
mod web;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::persistence::{FileBackend, HistoryBackend};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "sat-telemetry")]
#[command(about = "Simulated satellite telemetry service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the telemetry generator and HTTP server
    Serve {
        /// YAML configuration file; defaults apply when omitted
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Summarize a persisted history file
    Inspect { history: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Inspect { history } => inspect(history).await,
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let config = match path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn inspect(path: PathBuf) -> ExitCode {
    let backend = FileBackend::new(path);
    let samples = match backend.load().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", backend.path().display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} samples in {}", samples.len(), backend.describe());
    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        println!("  from {}", first.timestamp.to_rfc3339());
        println!("  to   {}", last.timestamp.to_rfc3339());
        println!(
            "  latest: lat {:.4}, lon {:.4}, alt {:.1} m, temp {:.2}",
            last.latitude, last.longitude, last.altitude, last.temperature
        );
    }
    ExitCode::SUCCESS
}
