//! Locally derived figures: equity bridge, recommendation tiers, sensitivity modes

use pretty_assertions::assert_eq;
use test_log::test;

use valuedge::analysis::{
    default_market_price, display_matrix, equity_bridge, upside_percent, Recommendation, ReportSummary,
    ValuationFacts, SENSITIVITY_NET_DEBT,
};
use valuedge::models::ValueMode;

use crate::common::test_data;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn test_equity_bridge_and_zero_share_guard() {
    let bridge = equity_bridge(950.0, 450.0, 100.0);
    assert_eq!(bridge.equity_value, 500.0);
    assert_eq!(format!("{:.2}", bridge.implied_share_price), "5.00");

    let guarded = equity_bridge(950.0, 450.0, 0.0);
    assert_eq!(guarded.implied_share_price, 0.0);
    assert!(guarded.implied_share_price.is_finite());
}

#[test]
fn test_recommendation_scenarios() {
    let buy = upside_percent(10.0, 8.0);
    assert!(close(buy, 25.0));
    assert_eq!(Recommendation::from_upside(buy), Recommendation::Buy);

    let hold = upside_percent(10.0, 9.09);
    assert!(close(hold, 10.01));
    assert_eq!(Recommendation::from_upside(hold), Recommendation::Hold);

    let sell = upside_percent(10.0, 20.0);
    assert!(close(sell, -50.0));
    assert_eq!(Recommendation::from_upside(sell), Recommendation::Sell);

    assert_eq!(Recommendation::from_upside(20.0), Recommendation::Hold);
    // Strict comparison: exactly -10 falls to the lower tier
    assert_eq!(Recommendation::from_upside(-10.0), Recommendation::Sell);
}

#[test]
fn test_default_market_price_gives_hold() {
    assert!(close(default_market_price(10.0), 8.5));

    let facts = ValuationFacts {
        dcf_enterprise_value: Some(1450.0),
        dcf_implied_share_price: Some(10.0),
        comps_median_enterprise_value: Some(3000.0),
    };
    let summary = ReportSummary::from_facts(&facts, None).unwrap();

    assert!(close(summary.upside_percent, 17.65));
    assert_eq!(summary.recommendation, Recommendation::Hold);
    assert_eq!(format!("{:.1}", summary.upside_percent), "17.6");
    assert!(summary.conclusion().contains("above"));
}

#[test]
fn test_zero_or_non_finite_market_price_yields_zero_upside() {
    assert_eq!(upside_percent(10.0, 0.0), 0.0);
    assert_eq!(upside_percent(10.0, f64::NAN), 0.0);
    assert_eq!(upside_percent(10.0, f64::INFINITY), 0.0);
}

#[test]
fn test_negative_dcf_price_keeps_formula() {
    let share_price_dcf = -0.5;
    let upside = upside_percent(share_price_dcf, default_market_price(share_price_dcf));

    assert!(close(upside, 17.65));
    assert_eq!(Recommendation::from_upside(upside), Recommendation::Hold);
}

#[test]
fn test_equity_mode_subtracts_fixed_net_debt() {
    let response = test_data::sensitivity_response();

    assert_eq!(SENSITIVITY_NET_DEBT, 450.0);
    assert_eq!(
        display_matrix(&response, ValueMode::EquityValue),
        vec![vec![Some(550.0), None], vec![Some(750.0), Some(850.0)]]
    );
    assert_eq!(
        display_matrix(&response, ValueMode::EnterpriseValue),
        response.enterprise_value_matrix
    );
}
