//! Terminal workbench: tab shell, per-view assumption forms, and the async
//! plumbing that carries service completions back to the UI loop.

pub mod app;
pub mod comps_view;
pub mod components;
pub mod dcf_view;
pub mod events;
pub mod form;
pub mod layout;
pub mod reports_view;
pub mod sensitivity_view;
pub mod state;
pub mod view;

pub use app::{run_app, Notification, WorkbenchApp};
pub use events::{EventManager, RunKind, ServiceCall, ServiceOutcome};
pub use view::{Tab, View, ViewAction};
