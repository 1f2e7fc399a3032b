//! Locally owned, user-editable assumption sets.
//!
//! Each view owns exactly one of these. Nothing here crosses a view boundary;
//! only the figures recorded in the result hub are shared.

use serde::{Deserialize, Serialize};

use super::payloads::{CompsRequest, DcfRequest, PeerMultiple};

/// Assumptions behind a discounted-cash-flow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfAssumptions {
    pub base_revenue: f64,
    pub revenue_growth: f64,
    pub ebitda_margin: f64,
    pub tax_rate: f64,
    pub capex_percent: f64,
    pub nwc_percent: f64,
    pub wacc: f64,
    pub terminal_growth: f64,
    pub net_debt: f64,
    pub shares_outstanding: f64,
}

impl Default for DcfAssumptions {
    fn default() -> Self {
        Self {
            base_revenue: 1200.0,
            revenue_growth: 0.12,
            ebitda_margin: 0.25,
            tax_rate: 0.21,
            capex_percent: 0.05,
            nwc_percent: 0.02,
            wacc: 0.085,
            terminal_growth: 0.02,
            net_debt: 450.0,
            shares_outstanding: 100.0,
        }
    }
}

impl DcfAssumptions {
    /// Build the wire request. Net debt and share count stay local.
    pub fn to_request(&self, years: u32) -> DcfRequest {
        DcfRequest {
            revenue: self.base_revenue,
            revenue_growth: self.revenue_growth,
            ebitda_margin: self.ebitda_margin,
            tax_rate: self.tax_rate,
            capex_percent: self.capex_percent,
            wc_percent: self.nwc_percent,
            wacc: self.wacc,
            terminal_growth: self.terminal_growth,
            years,
        }
    }
}

/// A named peer with its trading multiple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub name: String,
    pub multiple: f64,
}

impl Peer {
    pub fn new(name: &str, multiple: f64) -> Self {
        Self {
            name: name.to_string(),
            multiple,
        }
    }
}

/// Assumptions behind a comparable-company run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsAssumptions {
    pub peers: Vec<Peer>,
    pub ebitda: f64,
    pub net_debt: f64,
    pub shares_outstanding: f64,
}

impl Default for CompsAssumptions {
    fn default() -> Self {
        Self {
            peers: vec![
                Peer::new("Peer A", 8.0),
                Peer::new("Peer B", 10.0),
                Peer::new("Peer C", 12.0),
            ],
            ebitda: 300.0,
            net_debt: 450.0,
            shares_outstanding: 100.0,
        }
    }
}

impl CompsAssumptions {
    pub fn to_request(&self) -> CompsRequest {
        CompsRequest {
            peers: self
                .peers
                .iter()
                .map(|p| PeerMultiple {
                    name: p.name.clone(),
                    multiple: p.multiple,
                })
                .collect(),
            metric_value: self.ebitda,
            net_debt: self.net_debt,
            shares_outstanding: self.shares_outstanding,
        }
    }
}

/// Which valuation the sensitivity heatmap displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueMode {
    #[default]
    EnterpriseValue,
    EquityValue,
}

impl ValueMode {
    pub fn toggled(self) -> Self {
        match self {
            ValueMode::EnterpriseValue => ValueMode::EquityValue,
            ValueMode::EquityValue => ValueMode::EnterpriseValue,
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            ValueMode::EnterpriseValue => "EV",
            ValueMode::EquityValue => "EQ",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ValueMode::EnterpriseValue => "Enterprise Value Sensitivity",
            ValueMode::EquityValue => "Equity Value Sensitivity",
        }
    }
}

/// Sensitivity run inputs: the DCF operating set plus a display toggle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAssumptions {
    pub revenue: f64,
    pub revenue_growth: f64,
    pub ebitda_margin: f64,
    pub tax_rate: f64,
    pub capex_percent: f64,
    pub wc_percent: f64,
    pub wacc: f64,
    pub terminal_growth: f64,
    pub mode: ValueMode,
}

impl Default for SensitivityAssumptions {
    fn default() -> Self {
        let dcf = DcfAssumptions::default();
        Self {
            revenue: dcf.base_revenue,
            revenue_growth: dcf.revenue_growth,
            ebitda_margin: dcf.ebitda_margin,
            tax_rate: dcf.tax_rate,
            capex_percent: dcf.capex_percent,
            wc_percent: dcf.nwc_percent,
            wacc: dcf.wacc,
            terminal_growth: dcf.terminal_growth,
            mode: ValueMode::default(),
        }
    }
}

impl SensitivityAssumptions {
    /// The sensitivity endpoint takes the same body as the DCF endpoint
    pub fn to_request(&self, years: u32) -> DcfRequest {
        DcfRequest {
            revenue: self.revenue,
            revenue_growth: self.revenue_growth,
            ebitda_margin: self.ebitda_margin,
            tax_rate: self.tax_rate,
            capex_percent: self.capex_percent,
            wc_percent: self.wc_percent,
            wacc: self.wacc,
            terminal_growth: self.terminal_growth,
            years,
        }
    }
}
