//! Cross-view propagation, readiness gating, and locally derived figures.

pub mod hub;
pub mod metrics;
pub mod readiness;
pub mod recommendation;

pub use hub::{HubError, HubUpdate, ResultHub, ValuationFacts};
pub use metrics::{
    build_pdf_export, dcf_metrics, display_matrix, equity_bridge, equity_matrix, per_share,
    projection_rows, EquityBridge, ProjectionRow, SENSITIVITY_NET_DEBT,
};
pub use readiness::{is_reports_ready, REPORTS_FALLBACK_PROMPT};
pub use recommendation::{default_market_price, upside_percent, Recommendation, ReportSummary};
