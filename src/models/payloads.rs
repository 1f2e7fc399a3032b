//! Request and response bodies for the remote valuation service.
//!
//! Responses are checked with `validate` before anything derived is computed
//! from them, so a non-finite figure never reaches a view or the result hub.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Body shared by the DCF and sensitivity endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfRequest {
    pub revenue: f64,
    pub revenue_growth: f64,
    pub ebitda_margin: f64,
    pub tax_rate: f64,
    pub capex_percent: f64,
    pub wc_percent: f64,
    pub wacc: f64,
    pub terminal_growth: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    pub enterprise_value: f64,
    pub discounted_fcffs: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfResponse {
    pub fcffs: Vec<f64>,
    pub valuation: DcfValuation,
}

impl DcfResponse {
    pub fn validate(&self) -> Result<(), ApiError> {
        ensure_finite("valuation.enterprise_value", self.valuation.enterprise_value)?;
        ensure_all_finite("fcffs", &self.fcffs)?;
        ensure_all_finite("valuation.discounted_fcffs", &self.valuation.discounted_fcffs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResponse {
    pub enterprise_value_matrix: Vec<Vec<Option<f64>>>,
    pub wacc_values: Vec<f64>,
    pub terminal_growth_values: Vec<f64>,
}

impl SensitivityResponse {
    pub fn validate(&self) -> Result<(), ApiError> {
        ensure_all_finite("wacc_values", &self.wacc_values)?;
        ensure_all_finite("terminal_growth_values", &self.terminal_growth_values)?;
        for row in &self.enterprise_value_matrix {
            for cell in row.iter().flatten() {
                ensure_finite("enterprise_value_matrix", *cell)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerMultiple {
    pub name: String,
    pub multiple: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsRequest {
    pub peers: Vec<PeerMultiple>,
    pub metric_value: f64,
    pub net_debt: f64,
    pub shares_outstanding: f64,
}

/// A low / mid / high triple returned by the comps endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl ValueRange {
    fn validate(&self, field: &str) -> Result<(), ApiError> {
        ensure_finite(field, self.min)?;
        ensure_finite(field, self.median)?;
        ensure_finite(field, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsResponse {
    pub enterprise_value: ValueRange,
    pub implied_price: ValueRange,
}

impl CompsResponse {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.enterprise_value.validate("enterprise_value")?;
        self.implied_price.validate("implied_price")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDcfSection {
    pub enterprise_value: f64,
    pub equity_value: f64,
    pub share_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfCompsSection {
    pub ev_min: f64,
    pub ev_median: f64,
    pub ev_max: f64,
    pub px_min: f64,
    pub px_median: f64,
    pub px_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfExportRequest {
    pub dcf: PdfDcfSection,
    pub comps: PdfCompsSection,
}

fn ensure_finite(field: &str, value: f64) -> Result<(), ApiError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ApiError::InvalidPayload(format!("{} is not a finite number", field)))
    }
}

fn ensure_all_finite(field: &str, values: &[f64]) -> Result<(), ApiError> {
    values.iter().try_for_each(|v| ensure_finite(field, *v))
}
