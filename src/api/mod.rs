use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{
    CompsRequest, CompsResponse, DcfRequest, DcfResponse, PdfExportRequest, SensitivityResponse,
};

pub mod valuation_client;
pub use valuation_client::ValuationClient;

/// File name every exported report is saved under
pub const REPORT_FILE_NAME: &str = "ValuEdge_Valuation_Report.pdf";

/// Failures talking to the valuation service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Valuation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("PDF export failed with status {0}")]
    Export(u16),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to save report: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract of the remote valuation service
#[async_trait::async_trait]
pub trait ValuationService: Send + Sync {
    async fn run_dcf(&self, request: &DcfRequest) -> Result<DcfResponse, ApiError>;

    async fn run_sensitivity(&self, request: &DcfRequest) -> Result<SensitivityResponse, ApiError>;

    async fn run_comps(&self, request: &CompsRequest) -> Result<CompsResponse, ApiError>;

    /// Returns the raw document bytes
    async fn export_pdf(&self, request: &PdfExportRequest) -> Result<Vec<u8>, ApiError>;
}

/// Write an exported report into `dir` under the fixed report name
pub async fn save_report(dir: &Path, document: &[u8]) -> Result<PathBuf, ApiError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(REPORT_FILE_NAME);
    tokio::fs::write(&path, document).await?;
    info!("Saved valuation report ({} bytes) to {}", document.len(), path.display());
    Ok(path)
}
