use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use valuedge::api::{ValuationClient, ValuationService};
use valuedge::models::Config;
use valuedge::ui::run_app;

/// Terminal workbench for DCF, comparable-company and sensitivity valuations
#[derive(Parser, Debug)]
#[command(name = "valuedge")]
#[command(version)]
#[command(about = "Terminal front-end for the ValuEdge valuation service")]
#[command(long_about = "
Edit DCF, comps and sensitivity assumptions, send them to the valuation
service, and combine the results into an investment report. Settings come
from the environment (or a .env file); the flags below override them.

Keys:
  Tab / Shift-Tab, F1-F4   switch views
  Up / Down, digits, Enter select and edit an assumption
  r                        run the current view
  m                        toggle EV / equity display (sensitivity)
  e                        export the PDF report (comps)
  q                        quit
")]
struct Args {
    /// Base URL of the valuation service
    #[arg(long, help = "Valuation service base URL (overrides VALUATION_API_URL)")]
    api_url: Option<String>,

    /// Directory exported reports are written into
    #[arg(long, help = "Directory for exported PDF reports (overrides REPORT_EXPORT_DIR)")]
    export_dir: Option<PathBuf>,

    /// File that receives log output
    #[arg(long, help = "Log file path (overrides LOG_FILE)")]
    log_file: Option<PathBuf>,
}

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    // Stdout belongs to the terminal UI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("valuedge=info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(export_dir) = args.export_dir {
        config.export_dir = export_dir;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }

    init_logging(&config)?;
    info!("Starting ValuEdge workbench against {}", config.api_url);

    let client = ValuationClient::new(&config)?;
    let service: Arc<dyn ValuationService> = Arc::new(client);

    match run_app(config, service).await {
        Ok(()) => {
            info!("Workbench closed");
            Ok(())
        }
        Err(e) => {
            error!("Workbench terminated: {}", e);
            Err(e)
        }
    }
}
