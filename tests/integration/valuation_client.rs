//! Contract tests for the HTTP client against a mock valuation service

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::logging::{init_test_logging, log_test_data, log_test_step};
use valuedge::api::{ApiError, ValuationClient, ValuationService};
use valuedge::models::{CompsAssumptions, DcfAssumptions, SensitivityAssumptions};
use valuedge::analysis::build_pdf_export;

use crate::common::test_data;

async fn client_for(server: &MockServer) -> ValuationClient {
    ValuationClient::with_base_url(&server.uri()).expect("mock server URI should parse")
}

#[test_log::test(tokio::test)]
async fn test_dcf_posts_wire_body_and_decodes_reply() {
    init_test_logging();
    log_test_step("DCF request goes to /valuation/dcf with the documented body");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/valuation/dcf"))
        .and(body_json(json!({
            "revenue": 1200.0,
            "revenue_growth": 0.12,
            "ebitda_margin": 0.25,
            "tax_rate": 0.21,
            "capex_percent": 0.05,
            "wc_percent": 0.02,
            "wacc": 0.085,
            "terminal_growth": 0.02,
            "years": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fcffs": [201.6, 225.8],
            "valuation": { "enterprise_value": 950.0, "discounted_fcffs": [185.8, 191.8] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .run_dcf(&DcfAssumptions::default().to_request(5))
        .await
        .expect("DCF run should succeed");

    log_test_data("DCF response", &response);
    assert_eq!(response.valuation.enterprise_value, 950.0);
    assert_eq!(response.fcffs, vec![201.6, 225.8]);
}

#[test_log::test(tokio::test)]
async fn test_sensitivity_accepts_null_cells() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/valuation/sensitivity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enterprise_value_matrix": [[1000.0, null], [1200.0, 1300.0]],
            "wacc_values": [0.075, 0.085],
            "terminal_growth_values": [0.02, 0.03]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .run_sensitivity(&SensitivityAssumptions::default().to_request(5))
        .await
        .expect("sensitivity run should succeed");

    assert_eq!(response, test_data::sensitivity_response());
}

#[test_log::test(tokio::test)]
async fn test_comps_sends_peers_and_local_figures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/valuation/comps"))
        .and(body_json(json!({
            "peers": [
                { "name": "Peer A", "multiple": 8.0 },
                { "name": "Peer B", "multiple": 10.0 },
                { "name": "Peer C", "multiple": 12.0 }
            ],
            "metric_value": 300.0,
            "net_debt": 450.0,
            "shares_outstanding": 100.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enterprise_value": { "min": 2400.0, "median": 3000.0, "max": 3600.0 },
            "implied_price": { "min": 19.5, "median": 25.5, "max": 31.5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .run_comps(&CompsAssumptions::default().to_request())
        .await
        .expect("comps run should succeed");

    assert_eq!(response, test_data::comps_response());
}

#[test_log::test(tokio::test)]
async fn test_error_body_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/valuation/dcf"))
        .respond_with(ResponseTemplate::new(422).set_body_string("wacc must exceed terminal growth"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client
        .run_dcf(&DcfAssumptions::default().to_request(5))
        .await
        .unwrap_err();

    assert_matches!(&error, ApiError::Service { status: 422, body } if body == "wacc must exceed terminal growth");
    assert!(error.to_string().contains("wacc must exceed terminal growth"));
}

#[test_log::test(tokio::test)]
async fn test_undecodable_reply_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/valuation/comps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "enterprise_value": null })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client
        .run_comps(&CompsAssumptions::default().to_request())
        .await
        .unwrap_err();

    assert_matches!(error, ApiError::Decode(_));
}

#[test_log::test(tokio::test)]
async fn test_pdf_export_returns_raw_bytes() {
    let comps = test_data::comps_response();
    let request = build_pdf_export(950.0, 450.0, 100.0, &comps);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/export/pdf"))
        .and(body_json(json!({
            "dcf": { "enterprise_value": 950.0, "equity_value": 500.0, "share_price": 5.0 },
            "comps": {
                "ev_min": 2400.0, "ev_median": 3000.0, "ev_max": 3600.0,
                "px_min": 19.5, "px_median": 25.5, "px_max": 31.5
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let document = client.export_pdf(&request).await.expect("export should succeed");

    assert_eq!(document, b"%PDF-1.4 fake".to_vec());
}

#[test_log::test(tokio::test)]
async fn test_pdf_export_failure_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/export/pdf"))
        .respond_with(ResponseTemplate::new(500).set_body_string("renderer crashed"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = build_pdf_export(950.0, 450.0, 100.0, &test_data::comps_response());
    let error = client.export_pdf(&request).await.unwrap_err();

    assert_matches!(error, ApiError::Export(500));
}
