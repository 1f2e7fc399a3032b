//! Figures derived locally from primitive numbers.
//!
//! All of these are plain functions. Views call them on every render, so an
//! edit to net debt or share count shows up immediately without a new run.

use crate::models::{
    CompsResponse, DcfAssumptions, DcfResponse, PdfCompsSection, PdfDcfSection, PdfExportRequest,
    SensitivityResponse, ValueMode,
};

/// Net debt subtracted from every sensitivity cell in equity mode.
/// Deliberately independent of any view's editable assumptions.
pub const SENSITIVITY_NET_DEBT: f64 = 450.0;

/// Label year of the first forecast period
pub const FIRST_PROJECTION_YEAR: i32 = 2025;

/// Enterprise value bridged to equity and a per-share figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityBridge {
    pub enterprise_value: f64,
    pub equity_value: f64,
    pub implied_share_price: f64,
}

/// Equity value per share; zero when the share count is zero or negative
pub fn per_share(equity_value: f64, shares_outstanding: f64) -> f64 {
    if shares_outstanding > 0.0 {
        equity_value / shares_outstanding
    } else {
        0.0
    }
}

pub fn equity_bridge(enterprise_value: f64, net_debt: f64, shares_outstanding: f64) -> EquityBridge {
    let equity_value = enterprise_value - net_debt;
    EquityBridge {
        enterprise_value,
        equity_value,
        implied_share_price: per_share(equity_value, shares_outstanding),
    }
}

/// DCF card figures. Enterprise value falls back to zero before the first run.
pub fn dcf_metrics(result: Option<&DcfResponse>, assumptions: &DcfAssumptions) -> EquityBridge {
    let enterprise_value = result.map(|r| r.valuation.enterprise_value).unwrap_or(0.0);
    equity_bridge(enterprise_value, assumptions.net_debt, assumptions.shares_outstanding)
}

/// One forecast period of the projections table
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRow {
    pub label: String,
    pub fcf: f64,
    pub discounted_fcf: f64,
}

pub fn projection_rows(result: &DcfResponse) -> Vec<ProjectionRow> {
    result
        .fcffs
        .iter()
        .zip(result.valuation.discounted_fcffs.iter())
        .enumerate()
        .map(|(i, (fcf, dfcf))| ProjectionRow {
            label: format!("{}E", FIRST_PROJECTION_YEAR + i as i32),
            fcf: *fcf,
            discounted_fcf: *dfcf,
        })
        .collect()
}

/// Export body combining the DCF value with the comps ranges.
///
/// Equity and per-share figures use the comps view's own net debt and share
/// count, with the same zero-share guard as the DCF card.
pub fn build_pdf_export(
    dcf_enterprise_value: f64,
    net_debt: f64,
    shares_outstanding: f64,
    comps: &CompsResponse,
) -> PdfExportRequest {
    let bridge = equity_bridge(dcf_enterprise_value, net_debt, shares_outstanding);
    PdfExportRequest {
        dcf: PdfDcfSection {
            enterprise_value: bridge.enterprise_value,
            equity_value: bridge.equity_value,
            share_price: bridge.implied_share_price,
        },
        comps: PdfCompsSection {
            ev_min: comps.enterprise_value.min,
            ev_median: comps.enterprise_value.median,
            ev_max: comps.enterprise_value.max,
            px_min: comps.implied_price.min,
            px_median: comps.implied_price.median,
            px_max: comps.implied_price.max,
        },
    }
}

/// Subtract net debt from every defined cell; null cells stay null
pub fn equity_matrix(enterprise_values: &[Vec<Option<f64>>], net_debt: f64) -> Vec<Vec<Option<f64>>> {
    enterprise_values
        .iter()
        .map(|row| row.iter().map(|cell| cell.map(|ev| ev - net_debt)).collect())
        .collect()
}

/// Matrix to draw for the selected display mode
pub fn display_matrix(result: &SensitivityResponse, mode: ValueMode) -> Vec<Vec<Option<f64>>> {
    match mode {
        ValueMode::EnterpriseValue => result.enterprise_value_matrix.clone(),
        ValueMode::EquityValue => equity_matrix(&result.enterprise_value_matrix, SENSITIVITY_NET_DEBT),
    }
}
