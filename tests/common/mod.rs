//! Common test utilities and helpers

/// Canned service payloads
pub mod test_data {
    use valuedge::models::{
        CompsResponse, DcfResponse, DcfValuation, SensitivityResponse, ValueRange,
    };

    /// DCF reply with five forecast periods and the given enterprise value
    pub fn dcf_response(enterprise_value: f64) -> DcfResponse {
        DcfResponse {
            fcffs: vec![201.6, 225.8, 252.9, 283.2, 317.2],
            valuation: DcfValuation {
                enterprise_value,
                discounted_fcffs: vec![185.8, 191.8, 197.9, 204.3, 210.9],
            },
        }
    }

    pub fn comps_response() -> CompsResponse {
        CompsResponse {
            enterprise_value: ValueRange { min: 2400.0, median: 3000.0, max: 3600.0 },
            implied_price: ValueRange { min: 19.5, median: 25.5, max: 31.5 },
        }
    }

    pub fn sensitivity_response() -> SensitivityResponse {
        SensitivityResponse {
            enterprise_value_matrix: vec![vec![Some(1000.0), None], vec![Some(1200.0), Some(1300.0)]],
            wacc_values: vec![0.075, 0.085],
            terminal_growth_values: vec![0.02, 0.03],
        }
    }
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::{debug, info};

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            // test-log may have installed a subscriber already
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("valuedge=debug,main=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
