use super::hub::ValuationFacts;

/// Whether the Reports view may show its content instead of the prompt.
///
/// Recomputed from the current snapshot on every render; never cached.
pub fn is_reports_ready(facts: &ValuationFacts) -> bool {
    facts.dcf_enterprise_value.is_some()
        && facts.dcf_implied_share_price.is_some()
        && facts.comps_median_enterprise_value.is_some()
}

/// Message shown while one of the producers has not run yet
pub const REPORTS_FALLBACK_PROMPT: &str =
    "Please run DCF and COMPS first to generate the investment report.";
