use reqwest::{header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE}, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info};
use url::Url;

use crate::models::{
    CompsRequest, CompsResponse, Config, DcfRequest, DcfResponse, PdfExportRequest, SensitivityResponse,
};
use super::{ApiError, ValuationService};

const DCF_PATH: &str = "valuation/dcf";
const SENSITIVITY_PATH: &str = "valuation/sensitivity";
const COMPS_PATH: &str = "valuation/comps";
const PDF_EXPORT_PATH: &str = "export/pdf";

/// HTTP client for the remote valuation service
#[derive(Debug, Clone)]
pub struct ValuationClient {
    client: Client,
    base_url: Url,
}

impl ValuationClient {
    /// Create a new valuation client
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(&config.api_url)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // No request timeout: a run fails only when the request itself fails
        let client = Client::builder()
            .user_agent("valuedge/0.1")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// POST a JSON body and decode a JSON reply
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("Making request to: {}", url);

        let response = self.client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!("Request to {} failed with status {}: {}", path, status, text);
            return Err(ApiError::Service {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("API response received: {} bytes", text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    // A trailing slash keeps any path prefix when endpoints are joined
    Ok(Url::parse(&format!("{}/", trimmed))?)
}

#[async_trait::async_trait]
impl ValuationService for ValuationClient {
    async fn run_dcf(&self, request: &DcfRequest) -> Result<DcfResponse, ApiError> {
        let response: DcfResponse = self.post_json(DCF_PATH, request).await?;
        response.validate()?;
        info!(
            "DCF run returned enterprise value {:.2} over {} periods",
            response.valuation.enterprise_value,
            response.fcffs.len()
        );
        Ok(response)
    }

    async fn run_sensitivity(&self, request: &DcfRequest) -> Result<SensitivityResponse, ApiError> {
        let response: SensitivityResponse = self.post_json(SENSITIVITY_PATH, request).await?;
        response.validate()?;
        info!(
            "Sensitivity run returned a {}x{} grid",
            response.terminal_growth_values.len(),
            response.wacc_values.len()
        );
        Ok(response)
    }

    async fn run_comps(&self, request: &CompsRequest) -> Result<CompsResponse, ApiError> {
        let response: CompsResponse = self.post_json(COMPS_PATH, request).await?;
        response.validate()?;
        info!(
            "Comps run returned median enterprise value {:.2} from {} peers",
            response.enterprise_value.median,
            request.peers.len()
        );
        Ok(response)
    }

    async fn export_pdf(&self, request: &PdfExportRequest) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(PDF_EXPORT_PATH)?;
        debug!("Making request to: {}", url);

        let response = self.client.post(url).json(request).send().await?;

        // The body of a failed export is never inspected
        if !response.status().is_success() {
            let status = response.status();
            error!("PDF export failed with status {}", status);
            return Err(ApiError::Export(status.as_u16()));
        }

        let document = response.bytes().await?;
        Ok(document.to_vec())
    }
}
