//! Cross-view propagation and the Reports readiness gate

use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::logging::{init_test_logging, log_test_step};
use valuedge::analysis::{
    is_reports_ready, HubUpdate, ResultHub, ValuationFacts, REPORTS_FALLBACK_PROMPT,
};

fn facts(ev: Option<f64>, price: Option<f64>, median: Option<f64>) -> ValuationFacts {
    ValuationFacts {
        dcf_enterprise_value: ev,
        dcf_implied_share_price: price,
        comps_median_enterprise_value: median,
    }
}

#[test]
fn test_gate_truth_table() {
    init_test_logging();
    log_test_step("Checking the readiness gate over all presence combinations");

    let table = [
        (facts(None, None, None), false),
        (facts(Some(500.0), None, None), false),
        (facts(None, Some(4.2), None), false),
        (facts(None, None, Some(600.0)), false),
        (facts(Some(500.0), Some(4.2), None), false),
        (facts(Some(500.0), None, Some(600.0)), false),
        (facts(None, Some(4.2), Some(600.0)), false),
        (facts(Some(500.0), Some(4.2), Some(600.0)), true),
    ];

    for (snapshot, expected) in table {
        assert_eq!(is_reports_ready(&snapshot), expected, "{:?}", snapshot);
    }
}

#[test]
fn test_dcf_write_is_atomic() {
    let mut hub = ResultHub::new();
    hub.record_dcf_result(500.0, 4.2).unwrap();

    assert_eq!(hub.snapshot(), facts(Some(500.0), Some(4.2), None));
}

#[test]
fn test_sticky_union_in_both_orders() {
    let mut dcf_first = ResultHub::new();
    dcf_first.record_dcf_result(500.0, 4.2).unwrap();
    dcf_first.record_comps_result(600.0).unwrap();

    let mut comps_first = ResultHub::new();
    comps_first.record_comps_result(600.0).unwrap();
    comps_first.record_dcf_result(500.0, 4.2).unwrap();

    let expected = facts(Some(500.0), Some(4.2), Some(600.0));
    assert_eq!(dcf_first.snapshot(), expected);
    assert_eq!(comps_first.snapshot(), expected);
    assert!(is_reports_ready(&dcf_first.snapshot()));
}

#[test]
fn test_rerun_overwrites_only_its_own_slots() {
    let mut hub = ResultHub::new();
    hub.record_dcf_result(500.0, 4.2).unwrap();
    hub.record_comps_result(600.0).unwrap();

    hub.record_dcf_result(700.0, 6.1).unwrap();
    assert_eq!(hub.snapshot(), facts(Some(700.0), Some(6.1), Some(600.0)));

    hub.record_comps_result(650.0).unwrap();
    assert_eq!(hub.snapshot(), facts(Some(700.0), Some(6.1), Some(650.0)));
}

#[test]
fn test_non_finite_writes_leave_hub_untouched() {
    let mut hub = ResultHub::new();
    hub.record_comps_result(600.0).unwrap();

    assert!(hub.record_dcf_result(f64::NAN, 4.2).is_err());
    assert!(hub.record_dcf_result(500.0, f64::INFINITY).is_err());
    assert!(hub.record_comps_result(f64::NEG_INFINITY).is_err());

    assert_eq!(hub.snapshot(), facts(None, None, Some(600.0)));
}

#[test]
fn test_subscribers_see_accepted_writes() {
    let mut hub = ResultHub::new();
    let mut updates = hub.subscribe();

    hub.record_dcf_result(500.0, 4.2).unwrap();
    let _ = hub.record_comps_result(f64::NAN);
    hub.record_comps_result(600.0).unwrap();

    assert_eq!(
        updates.try_recv().unwrap(),
        HubUpdate::DcfRecorded { enterprise_value: 500.0, implied_share_price: 4.2 }
    );
    assert_eq!(
        updates.try_recv().unwrap(),
        HubUpdate::CompsRecorded { median_enterprise_value: 600.0 }
    );
    assert!(updates.try_recv().is_err());
}

#[test]
fn test_fallback_prompt_text() {
    assert_eq!(
        REPORTS_FALLBACK_PROMPT,
        "Please run DCF and COMPS first to generate the investment report."
    );
}
