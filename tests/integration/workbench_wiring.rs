//! Workbench wiring against a mocked valuation service: runs, busy flags,
//! failure notifications, and the report export.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::KeyCode;
use mockall::mock;
use pretty_assertions::assert_eq;
use tokio_test::assert_ok;

use crate::common::logging::{init_test_logging, log_test_step};
use crate::common::test_data;
use valuedge::analysis::{is_reports_ready, ValuationFacts};
use valuedge::api::{ApiError, ValuationService, REPORT_FILE_NAME};
use valuedge::models::{
    CompsRequest, CompsResponse, Config, DcfRequest, DcfResponse, PdfExportRequest, SensitivityResponse,
};
use valuedge::ui::{EventManager, ServiceCall, Tab, WorkbenchApp};

mock! {
    pub Service {}

    #[async_trait]
    impl ValuationService for Service {
        async fn run_dcf(&self, request: &DcfRequest) -> Result<DcfResponse, ApiError>;
        async fn run_sensitivity(&self, request: &DcfRequest) -> Result<SensitivityResponse, ApiError>;
        async fn run_comps(&self, request: &CompsRequest) -> Result<CompsResponse, ApiError>;
        async fn export_pdf(&self, request: &PdfExportRequest) -> Result<Vec<u8>, ApiError>;
    }
}

/// Press `key` and, if it triggered a run, execute it and apply the outcome
async fn press_and_complete(app: &mut WorkbenchApp, key: KeyCode, service: &MockService) {
    let call = app.handle_key(key).expect("key should trigger a run");
    let outcome = call.execute(service).await;
    app.apply_outcome(outcome);
}

#[test_log::test(tokio::test)]
async fn test_failed_dcf_rerun_keeps_reports_ready() {
    init_test_logging();
    log_test_step("A failing DCF re-run must not disturb the shared figures");

    let mut service = MockService::new();
    let mut dcf_calls = 0;
    service.expect_run_dcf().times(2).returning(move |_| {
        dcf_calls += 1;
        if dcf_calls == 1 {
            Ok(test_data::dcf_response(950.0))
        } else {
            Err(ApiError::Service { status: 500, body: "solver diverged".to_string() })
        }
    });
    service
        .expect_run_comps()
        .times(1)
        .returning(|_| Ok(test_data::comps_response()));

    let mut app = WorkbenchApp::new(&Config::default());
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;
    app.handle_key(KeyCode::Tab);
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;

    let before = app.hub.snapshot();
    assert!(is_reports_ready(&before));
    assert_eq!(before.dcf_enterprise_value, Some(950.0));
    assert_eq!(before.dcf_implied_share_price, Some(5.0));

    app.handle_key(KeyCode::BackTab);
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;

    assert_eq!(app.hub.snapshot(), before);
    assert!(is_reports_ready(&app.hub.snapshot()));
    assert!(!app.dcf.busy);
    assert_eq!(
        app.dcf.result.as_ref().map(|r| r.valuation.enterprise_value),
        Some(950.0)
    );

    let notification = app.notification.clone().expect("failure should notify");
    assert_eq!(notification.message, "DCF valuation failed");
    assert!(notification.detail.contains("solver diverged"));
}

#[test_log::test(tokio::test)]
async fn test_run_trigger_ignored_while_busy() {
    let mut service = MockService::new();
    service
        .expect_run_sensitivity()
        .times(1)
        .returning(|_| Ok(test_data::sensitivity_response()));

    let mut app = WorkbenchApp::new(&Config::default());
    app.handle_key(KeyCode::F(3));
    assert_eq!(app.current_tab, Tab::Sensitivity);

    let call = app.handle_key(KeyCode::Char('r')).expect("first trigger runs");
    assert!(app.sensitivity.busy);
    assert!(app.handle_key(KeyCode::Char('r')).is_none());

    app.apply_outcome(call.execute(&service).await);
    assert!(!app.sensitivity.busy);
    assert!(app.sensitivity.result.is_some());
    assert!(app.notification.is_none());

    // Sensitivity results never reach the hub
    assert_eq!(app.hub.snapshot(), ValuationFacts::default());
}

#[test_log::test(tokio::test)]
async fn test_export_writes_report_file() {
    let export_dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        export_dir: export_dir.path().join("reports"),
        ..Config::default()
    };

    let mut service = MockService::new();
    service
        .expect_run_dcf()
        .returning(|_| Ok(test_data::dcf_response(950.0)));
    service
        .expect_run_comps()
        .returning(|_| Ok(test_data::comps_response()));
    service
        .expect_export_pdf()
        .withf(|request: &PdfExportRequest| request.dcf.equity_value == 500.0 && request.comps.ev_median == 3000.0)
        .times(1)
        .returning(|_| Ok(b"%PDF-1.4 report".to_vec()));
    let service = Arc::new(service);

    let mut app = WorkbenchApp::new(&config);
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;
    app.handle_key(KeyCode::Tab);
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;

    let call = app.handle_key(KeyCode::Char('e')).expect("export should be offered");
    assert!(matches!(call, ServiceCall::ExportPdf { .. }));
    assert!(app.comps.exporting);

    // Go through the real dispatch path
    let mut events = EventManager::new();
    let shared: Arc<dyn ValuationService> = service.clone();
    events.dispatch(call, shared);
    let outcome = events.event_receiver.recv().await.expect("export outcome");
    app.apply_outcome(outcome);

    assert!(!app.comps.exporting);
    assert!(app.notification.is_none());
    let written = assert_ok!(std::fs::read(config.export_dir.join(REPORT_FILE_NAME)));
    assert_eq!(written, b"%PDF-1.4 report".to_vec());
}

#[test_log::test(tokio::test)]
async fn test_export_failure_notifies() {
    let mut service = MockService::new();
    service
        .expect_run_dcf()
        .returning(|_| Ok(test_data::dcf_response(950.0)));
    service
        .expect_run_comps()
        .returning(|_| Ok(test_data::comps_response()));
    service
        .expect_export_pdf()
        .returning(|_| Err(ApiError::Export(503)));

    let mut app = WorkbenchApp::new(&Config::default());
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;
    app.handle_key(KeyCode::Tab);
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;
    press_and_complete(&mut app, KeyCode::Char('e'), &service).await;

    assert!(!app.comps.exporting);
    assert_eq!(
        app.notification.as_ref().map(|n| n.message.as_str()),
        Some("PDF export failed")
    );
}

#[test_log::test(tokio::test)]
async fn test_export_not_offered_without_dcf() {
    let mut service = MockService::new();
    service
        .expect_run_comps()
        .returning(|_| Ok(test_data::comps_response()));
    service.expect_export_pdf().never();

    let mut app = WorkbenchApp::new(&Config::default());
    app.handle_key(KeyCode::Tab);
    press_and_complete(&mut app, KeyCode::Char('r'), &service).await;

    assert!(app.handle_key(KeyCode::Char('e')).is_none());
    assert!(!app.comps.exporting);
}
