//! Investment recommendation for the Reports view.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hub::ValuationFacts;

/// Market price assumed when none is entered, as a fraction of the DCF price.
/// A fixed placeholder, not market data.
pub const DEFAULT_MARKET_DISCOUNT: f64 = 0.85;

pub const BUY_THRESHOLD_PERCENT: f64 = 20.0;
pub const SELL_THRESHOLD_PERCENT: f64 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Recommendation {
    /// Strict comparisons: exactly 20% is HOLD, exactly -10% is SELL
    pub fn from_upside(upside_percent: f64) -> Self {
        if upside_percent > BUY_THRESHOLD_PERCENT {
            Recommendation::Buy
        } else if upside_percent > SELL_THRESHOLD_PERCENT {
            Recommendation::Hold
        } else {
            Recommendation::Sell
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::Sell => "SELL",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn default_market_price(share_price_dcf: f64) -> f64 {
    share_price_dcf * DEFAULT_MARKET_DISCOUNT
}

/// Percentage gap between intrinsic and market price; zero for a zero or
/// non-finite market price
pub fn upside_percent(share_price_dcf: f64, current_price: f64) -> f64 {
    if current_price != 0.0 && current_price.is_finite() {
        (share_price_dcf - current_price) / current_price * 100.0
    } else {
        0.0
    }
}

/// Everything the Reports view displays once the gate is open
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportSummary {
    pub dcf_enterprise_value: f64,
    pub comps_median_enterprise_value: f64,
    pub share_price_dcf: f64,
    pub current_price: f64,
    pub upside_percent: f64,
    pub recommendation: Recommendation,
}

impl ReportSummary {
    pub fn compute(
        dcf_enterprise_value: f64,
        comps_median_enterprise_value: f64,
        share_price_dcf: f64,
        current_price: Option<f64>,
    ) -> Self {
        let current_price = current_price.unwrap_or_else(|| default_market_price(share_price_dcf));
        let upside = upside_percent(share_price_dcf, current_price);
        Self {
            dcf_enterprise_value,
            comps_median_enterprise_value,
            share_price_dcf,
            current_price,
            upside_percent: upside,
            recommendation: Recommendation::from_upside(upside),
        }
    }

    /// `None` while any hub slot is still empty
    pub fn from_facts(facts: &ValuationFacts, current_price: Option<f64>) -> Option<Self> {
        Some(Self::compute(
            facts.dcf_enterprise_value?,
            facts.comps_median_enterprise_value?,
            facts.dcf_implied_share_price?,
            current_price,
        ))
    }

    /// Closing sentence of the report
    pub fn conclusion(&self) -> String {
        let direction = if self.upside_percent >= 0.0 { "above" } else { "below" };
        format!(
            "Our intrinsic valuation analysis suggests that the company is {} at current market levels. \
             The DCF-derived valuation implies a fair value meaningfully {} the prevailing price, \
             supported by peer trading multiples and fundamental cash flow assumptions.",
            self.recommendation.as_str().to_lowercase(),
            direction
        )
    }
}
