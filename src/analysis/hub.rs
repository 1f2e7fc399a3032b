//! Cross-view result propagation.
//!
//! The hub holds the only figures that cross view boundaries. The DCF view
//! writes its enterprise value and implied share price together; the comps
//! view writes its median enterprise value. A write never clears the other
//! producer's slots, so the final state does not depend on completion order.

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Snapshot of everything shared between views
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValuationFacts {
    pub dcf_enterprise_value: Option<f64>,
    pub dcf_implied_share_price: Option<f64>,
    pub comps_median_enterprise_value: Option<f64>,
}

/// Notification sent to subscribers after an accepted write
#[derive(Debug, Clone, PartialEq)]
pub enum HubUpdate {
    DcfRecorded { enterprise_value: f64, implied_share_price: f64 },
    CompsRecorded { median_enterprise_value: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum HubError {
    #[error("refusing to record non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Session-lifetime store of cross-view facts
#[derive(Debug)]
pub struct ResultHub {
    facts: ValuationFacts,
    sender: broadcast::Sender<HubUpdate>,
}

impl Default for ResultHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel::<HubUpdate>(16);
        Self {
            facts: ValuationFacts::default(),
            sender,
        }
    }

    /// Current contents; callers recompute anything derived from this
    pub fn snapshot(&self) -> ValuationFacts {
        self.facts
    }

    /// Record both DCF figures in one step
    pub fn record_dcf_result(&mut self, enterprise_value: f64, implied_share_price: f64) -> Result<(), HubError> {
        check_finite("dcf_enterprise_value", enterprise_value)?;
        check_finite("dcf_implied_share_price", implied_share_price)?;

        self.facts.dcf_enterprise_value = Some(enterprise_value);
        self.facts.dcf_implied_share_price = Some(implied_share_price);
        debug!("Hub recorded DCF EV {:.2}, implied price {:.2}", enterprise_value, implied_share_price);

        self.publish(HubUpdate::DcfRecorded { enterprise_value, implied_share_price });
        Ok(())
    }

    pub fn record_comps_result(&mut self, median_enterprise_value: f64) -> Result<(), HubError> {
        check_finite("comps_median_enterprise_value", median_enterprise_value)?;

        self.facts.comps_median_enterprise_value = Some(median_enterprise_value);
        debug!("Hub recorded comps median EV {:.2}", median_enterprise_value);

        self.publish(HubUpdate::CompsRecorded { median_enterprise_value });
        Ok(())
    }

    /// Subscribe to write notifications
    pub fn subscribe(&self) -> broadcast::Receiver<HubUpdate> {
        self.sender.subscribe()
    }

    fn publish(&self, update: HubUpdate) {
        // No subscribers is fine
        let _ = self.sender.send(update);
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), HubError> {
    if value.is_finite() {
        Ok(())
    } else {
        warn!("Rejected non-finite {} ({})", field, value);
        Err(HubError::NonFinite { field, value })
    }
}
