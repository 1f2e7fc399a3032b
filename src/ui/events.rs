use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{save_report, ApiError, ValuationService};
use crate::models::{
    CompsRequest, CompsResponse, DcfRequest, DcfResponse, PdfExportRequest, SensitivityResponse,
};

/// The four remote operations a view can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    Dcf,
    Comps,
    Sensitivity,
    PdfExport,
}

impl RunKind {
    pub fn label(self) -> &'static str {
        match self {
            RunKind::Dcf => "DCF valuation",
            RunKind::Comps => "Comps analysis",
            RunKind::Sensitivity => "Sensitivity analysis",
            RunKind::PdfExport => "PDF export",
        }
    }

    /// Text of the blocking notification shown when this run fails
    pub fn failure_message(self) -> String {
        format!("{} failed", self.label())
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A request a view has asked the shell to send
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    Dcf(DcfRequest),
    Comps(CompsRequest),
    Sensitivity(DcfRequest),
    ExportPdf { request: PdfExportRequest, destination: PathBuf },
}

/// The completion of a `ServiceCall`, delivered back to the UI loop
#[derive(Debug)]
pub enum ServiceOutcome {
    Dcf(Result<DcfResponse, ApiError>),
    Comps(Result<CompsResponse, ApiError>),
    Sensitivity(Result<SensitivityResponse, ApiError>),
    ExportPdf(Result<PathBuf, ApiError>),
}

impl ServiceCall {
    pub fn kind(&self) -> RunKind {
        match self {
            ServiceCall::Dcf(_) => RunKind::Dcf,
            ServiceCall::Comps(_) => RunKind::Comps,
            ServiceCall::Sensitivity(_) => RunKind::Sensitivity,
            ServiceCall::ExportPdf { .. } => RunKind::PdfExport,
        }
    }

    /// Perform the round-trip. Never touches view or hub state.
    pub async fn execute(self, service: &dyn ValuationService) -> ServiceOutcome {
        match self {
            ServiceCall::Dcf(request) => ServiceOutcome::Dcf(service.run_dcf(&request).await),
            ServiceCall::Comps(request) => ServiceOutcome::Comps(service.run_comps(&request).await),
            ServiceCall::Sensitivity(request) => {
                ServiceOutcome::Sensitivity(service.run_sensitivity(&request).await)
            }
            ServiceCall::ExportPdf { request, destination } => {
                let saved = match service.export_pdf(&request).await {
                    Ok(document) => save_report(&destination, &document).await,
                    Err(e) => Err(e),
                };
                ServiceOutcome::ExportPdf(saved)
            }
        }
    }
}

impl ServiceOutcome {
    pub fn kind(&self) -> RunKind {
        match self {
            ServiceOutcome::Dcf(_) => RunKind::Dcf,
            ServiceOutcome::Comps(_) => RunKind::Comps,
            ServiceOutcome::Sensitivity(_) => RunKind::Sensitivity,
            ServiceOutcome::ExportPdf(_) => RunKind::PdfExport,
        }
    }
}

/// Channel carrying completions from spawned requests back to the UI loop
pub struct EventManager {
    pub event_sender: mpsc::Sender<ServiceOutcome>,
    pub event_receiver: mpsc::Receiver<ServiceOutcome>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::channel::<ServiceOutcome>(100);
        Self {
            event_sender,
            event_receiver,
        }
    }

    /// Spawn the round-trip; its outcome arrives later through `try_receive`
    pub fn dispatch(&self, call: ServiceCall, service: Arc<dyn ValuationService>) {
        let sender = self.event_sender.clone();
        let kind = call.kind();
        debug!("Dispatching {}", kind);

        tokio::spawn(async move {
            let outcome = call.execute(service.as_ref()).await;
            if sender.send(outcome).await.is_err() {
                debug!("UI loop closed before {} completed", kind);
            }
        });
    }

    /// Try to receive a completion (non-blocking)
    pub fn try_receive(&mut self) -> Option<ServiceOutcome> {
        self.event_receiver.try_recv().ok()
    }
}
