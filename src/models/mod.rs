use std::path::PathBuf;

pub mod assumptions;
pub mod payloads;

pub use assumptions::{CompsAssumptions, DcfAssumptions, Peer, SensitivityAssumptions, ValueMode};
pub use payloads::{
    CompsRequest, CompsResponse, DcfRequest, DcfResponse, DcfValuation, PdfCompsSection,
    PdfDcfSection, PdfExportRequest, SensitivityResponse, ValueRange,
};

/// Default base URL of the remote valuation service
pub const DEFAULT_API_URL: &str = "https://valuedge-backend.onrender.com";

/// Explicit forecast horizon sent with every DCF-style request
pub const DEFAULT_FORECAST_YEARS: u32 = 5;

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub export_dir: PathBuf,
    pub forecast_years: u32,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            export_dir: PathBuf::from("."),
            forecast_years: DEFAULT_FORECAST_YEARS,
            log_file: PathBuf::from("valuedge.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Config::default();
        let forecast_years = match std::env::var("FORECAST_YEARS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("FORECAST_YEARS must be a positive integer, got '{}'", raw))?,
            Err(_) => defaults.forecast_years,
        };
        if forecast_years == 0 {
            return Err(anyhow::anyhow!("FORECAST_YEARS must be at least 1"));
        }

        Ok(Config {
            api_url: std::env::var("VALUATION_API_URL").unwrap_or(defaults.api_url),
            export_dir: std::env::var("REPORT_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            forecast_years,
            log_file: std::env::var("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        })
    }
}
