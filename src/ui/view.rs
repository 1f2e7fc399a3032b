use crossterm::event::KeyCode;
use ratatui::{prelude::Rect, Frame};

use crate::analysis::ValuationFacts;
use super::events::ServiceCall;

/// What a view wants the shell to do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Not a key this view uses
    Ignored,
    /// Handled locally
    Handled,
    /// Send this request to the valuation service
    Dispatch(ServiceCall),
    /// Show a blocking message to the user
    Notify(String),
}

/// View contract for all TUI views.
///
/// Views read shared figures only through the `ValuationFacts` snapshot they
/// are handed; they never see each other's assumptions.
pub trait View {
    /// Render the view
    fn render(&self, f: &mut Frame, area: Rect, facts: &ValuationFacts);

    /// Get the view title
    fn get_title(&self) -> &'static str;

    /// Get the view status text
    fn get_status(&self, facts: &ValuationFacts) -> String;

    /// Handle view-specific key events
    fn handle_key(&mut self, _key: KeyCode, _facts: &ValuationFacts) -> ViewAction {
        ViewAction::Ignored
    }

    /// True while a field edit is in progress and every key belongs to the view
    fn is_editing(&self) -> bool {
        false
    }
}

/// The four workbench tabs, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dcf,
    Comps,
    Sensitivity,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dcf, Tab::Comps, Tab::Sensitivity, Tab::Reports];

    pub fn index(self) -> usize {
        match self {
            Tab::Dcf => 0,
            Tab::Comps => 1,
            Tab::Sensitivity => 2,
            Tab::Reports => 3,
        }
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dcf => "DCF Valuation",
            Tab::Comps => "Comparable Analysis",
            Tab::Sensitivity => "Sensitivity Analysis",
            Tab::Reports => "Reports",
        }
    }
}
