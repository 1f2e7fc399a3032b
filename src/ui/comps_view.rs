use std::path::PathBuf;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use tracing::{info, warn};

use crate::analysis::{build_pdf_export, ResultHub, ValuationFacts};
use crate::api::ApiError;
use crate::models::{CompsAssumptions, CompsResponse};
use super::components::{
    football_field_lines, format_millions, format_range, render_form, render_placeholder, render_view_title,
};
use super::events::ServiceCall;
use super::form::{FieldSpec, FieldUnit, FormEvent, NumericForm};
use super::layout::ViewLayout;
use super::view::{View, ViewAction};

const FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("EBITDA", FieldUnit::Money),
    FieldSpec::new("Net Debt", FieldUnit::Money),
    FieldSpec::new("Shares Outstanding", FieldUnit::Shares),
];

/// Comparable-company view. Also the place the combined PDF report is exported from.
pub struct CompsView {
    pub assumptions: CompsAssumptions,
    pub result: Option<CompsResponse>,
    pub busy: bool,
    pub exporting: bool,
    form: NumericForm,
    export_dir: PathBuf,
}

impl CompsView {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            assumptions: CompsAssumptions::default(),
            result: None,
            busy: false,
            exporting: false,
            form: NumericForm::new(),
            export_dir,
        }
    }

    pub fn begin_run(&mut self) -> Option<ServiceCall> {
        if self.busy {
            info!("Comps run already in progress, ignoring trigger");
            return None;
        }
        self.busy = true;
        Some(ServiceCall::Comps(self.assumptions.to_request()))
    }

    /// Store a successful result and share its median enterprise value
    pub fn complete_run(
        &mut self,
        outcome: Result<CompsResponse, ApiError>,
        hub: &mut ResultHub,
    ) -> Result<String, ApiError> {
        self.busy = false;
        let response = outcome?;

        let median = response.enterprise_value.median;
        self.result = Some(response);

        if let Err(e) = hub.record_comps_result(median) {
            warn!("Comps median not shared: {}", e);
        }

        Ok(format!("Median enterprise value {}", format_millions(median)))
    }

    /// Export needs a DCF value in the hub and a comps result of our own
    pub fn can_export(&self, facts: &ValuationFacts) -> bool {
        facts.dcf_enterprise_value.is_some() && self.result.is_some()
    }

    pub fn begin_export(&mut self, facts: &ValuationFacts) -> Option<ServiceCall> {
        if self.exporting {
            info!("PDF export already in progress, ignoring trigger");
            return None;
        }
        let dcf_enterprise_value = facts.dcf_enterprise_value?;
        let comps = self.result.as_ref()?;

        let request = build_pdf_export(
            dcf_enterprise_value,
            self.assumptions.net_debt,
            self.assumptions.shares_outstanding,
            comps,
        );
        self.exporting = true;
        Some(ServiceCall::ExportPdf {
            request,
            destination: self.export_dir.clone(),
        })
    }

    pub fn complete_export(&mut self, outcome: Result<PathBuf, ApiError>) -> Result<String, ApiError> {
        self.exporting = false;
        let path = outcome?;
        Ok(format!("Report saved to {}", path.display()))
    }

    fn values(&self) -> [f64; 3] {
        [self.assumptions.ebitda, self.assumptions.net_debt, self.assumptions.shares_outstanding]
    }

    fn set_value(&mut self, index: usize, value: f64) {
        match index {
            0 => self.assumptions.ebitda = value,
            1 => self.assumptions.net_debt = value,
            2 => self.assumptions.shares_outstanding = value,
            _ => {}
        }
    }

    fn render_ranges(&self, f: &mut Frame, area: Rect, result: &CompsResponse) {
        let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let rows = vec![
            Row::new(vec![
                "Enterprise Value ($M)".to_string(),
                format_range(&result.enterprise_value, 0),
            ]),
            Row::new(vec![
                "Implied Share Price ($)".to_string(),
                format_range(&result.implied_price, 2),
            ]),
        ];

        let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(20)])
            .header(Row::new(vec!["Metric", "Min — Median — Max"]).style(header_style))
            .block(Block::default().borders(Borders::ALL).title("Valuation Range"));

        f.render_widget(table, area);
    }

    fn render_football_field(&self, f: &mut Frame, area: Rect, dcf_value: f64, result: &CompsResponse) {
        let width = area.width.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = football_field_lines(dcf_value, &result.enterprise_value, width)
            .into_iter()
            .map(Line::from)
            .collect();

        let hint = if self.exporting {
            "Exporting report..."
        } else {
            "e export PDF report"
        };
        lines.push(Line::from(""));
        lines.push(Line::styled(hint, Style::default().fg(Color::Gray)));

        let chart = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Football Field (EV, $M)"));
        f.render_widget(chart, area);
    }
}

impl View for CompsView {
    fn render(&self, f: &mut Frame, area: Rect, facts: &ValuationFacts) {
        let layout = ViewLayout::new(area, 46);
        render_view_title(f, layout.title, self.get_title(), "Valuation range based on peer trading multiples");
        render_form(f, layout.inputs, "Assumptions", &FIELDS, &self.values(), &self.form);

        let sections = layout.split_results(&[Constraint::Length(6), Constraint::Min(0)]);

        match (&self.result, self.busy) {
            (_, true) => render_placeholder(f, sections[0], "Running comps analysis..."),
            (Some(result), false) => self.render_ranges(f, sections[0], result),
            (None, false) => render_placeholder(f, sections[0], "Enter assumptions and run comps analysis"),
        }

        match (&self.result, facts.dcf_enterprise_value) {
            (Some(result), Some(dcf_value)) => self.render_football_field(f, sections[1], dcf_value, result),
            _ => render_placeholder(f, sections[1], "Run DCF and comps to compare valuations"),
        }
    }

    fn get_title(&self) -> &'static str {
        "Comparable Analysis"
    }

    fn get_status(&self, facts: &ValuationFacts) -> String {
        if self.busy {
            "Comps analysis running".to_string()
        } else if self.can_export(facts) {
            "↑↓ select • type to edit • r run comps • e export PDF".to_string()
        } else {
            "↑↓ select • type to edit • r run comps".to_string()
        }
    }

    fn handle_key(&mut self, key: KeyCode, facts: &ValuationFacts) -> ViewAction {
        if !self.form.is_editing() {
            match key {
                KeyCode::Char('r') => {
                    return match self.begin_run() {
                        Some(call) => ViewAction::Dispatch(call),
                        None => ViewAction::Handled,
                    };
                }
                KeyCode::Char('e') => {
                    return match self.begin_export(facts) {
                        Some(call) => ViewAction::Dispatch(call),
                        None => ViewAction::Handled,
                    };
                }
                _ => {}
            }
        }

        match self.form.handle_key(key, &FIELDS) {
            FormEvent::Commit { index, value } => {
                self.set_value(index, value);
                ViewAction::Handled
            }
            FormEvent::Rejected(message) => ViewAction::Notify(message),
            FormEvent::Consumed => ViewAction::Handled,
            FormEvent::Ignored => ViewAction::Ignored,
        }
    }

    fn is_editing(&self) -> bool {
        self.form.is_editing()
    }
}
