use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use tracing::{info, warn};

use crate::analysis::{dcf_metrics, projection_rows, ResultHub, ValuationFacts};
use crate::api::ApiError;
use crate::models::{DcfAssumptions, DcfResponse};
use super::components::{format_millions, format_price, metric_line, render_form, render_placeholder, render_view_title};
use super::events::ServiceCall;
use super::form::{FieldSpec, FieldUnit, FormEvent, NumericForm};
use super::layout::ViewLayout;
use super::view::{View, ViewAction};

const FIELDS: [FieldSpec; 10] = [
    FieldSpec::new("Base Revenue", FieldUnit::Money),
    FieldSpec::new("Revenue Growth", FieldUnit::Percent),
    FieldSpec::new("EBITDA Margin", FieldUnit::Percent),
    FieldSpec::new("Tax Rate", FieldUnit::Percent),
    FieldSpec::new("CapEx % Revenue", FieldUnit::Percent),
    FieldSpec::new("NWC % Revenue", FieldUnit::Percent),
    FieldSpec::new("WACC", FieldUnit::Percent),
    FieldSpec::new("Terminal Growth", FieldUnit::Percent),
    FieldSpec::new("Net Debt", FieldUnit::Money),
    FieldSpec::new("Shares Outstanding", FieldUnit::Shares),
];

/// Discounted-cash-flow view: owns its assumptions and last successful result
pub struct DcfView {
    pub assumptions: DcfAssumptions,
    pub result: Option<DcfResponse>,
    pub busy: bool,
    form: NumericForm,
    forecast_years: u32,
}

impl DcfView {
    pub fn new(forecast_years: u32) -> Self {
        Self {
            assumptions: DcfAssumptions::default(),
            result: None,
            busy: false,
            form: NumericForm::new(),
            forecast_years,
        }
    }

    /// Build the run request, or `None` while a run is already in flight
    pub fn begin_run(&mut self) -> Option<ServiceCall> {
        if self.busy {
            info!("DCF run already in progress, ignoring trigger");
            return None;
        }
        self.busy = true;
        Some(ServiceCall::Dcf(self.assumptions.to_request(self.forecast_years)))
    }

    /// Apply a finished run.
    ///
    /// On success the result replaces the previous one and the hub receives
    /// the enterprise value together with the implied price computed from the
    /// assumptions current at completion time. On failure nothing but the
    /// busy flag changes.
    pub fn complete_run(
        &mut self,
        outcome: Result<DcfResponse, ApiError>,
        hub: &mut ResultHub,
    ) -> Result<String, ApiError> {
        self.busy = false;
        let response = outcome?;

        let metrics = dcf_metrics(Some(&response), &self.assumptions);
        self.result = Some(response);

        if let Err(e) = hub.record_dcf_result(metrics.enterprise_value, metrics.implied_share_price) {
            warn!("DCF figures not shared: {}", e);
        }

        Ok(format!("Enterprise value {}", format_millions(metrics.enterprise_value)))
    }

    fn values(&self) -> [f64; 10] {
        let a = &self.assumptions;
        [
            a.base_revenue,
            a.revenue_growth,
            a.ebitda_margin,
            a.tax_rate,
            a.capex_percent,
            a.nwc_percent,
            a.wacc,
            a.terminal_growth,
            a.net_debt,
            a.shares_outstanding,
        ]
    }

    fn set_value(&mut self, index: usize, value: f64) {
        let a = &mut self.assumptions;
        match index {
            0 => a.base_revenue = value,
            1 => a.revenue_growth = value,
            2 => a.ebitda_margin = value,
            3 => a.tax_rate = value,
            4 => a.capex_percent = value,
            5 => a.nwc_percent = value,
            6 => a.wacc = value,
            7 => a.terminal_growth = value,
            8 => a.net_debt = value,
            9 => a.shares_outstanding = value,
            _ => {}
        }
    }

    fn render_metrics(&self, f: &mut Frame, area: Rect) {
        let metrics = dcf_metrics(self.result.as_ref(), &self.assumptions);

        let card = Paragraph::new(vec![
            metric_line("Enterprise Value", format_millions(metrics.enterprise_value), Color::Cyan),
            metric_line("Equity Value", format_millions(metrics.equity_value), Color::Cyan),
            metric_line("Implied Share Price", format_price(metrics.implied_share_price), Color::Green),
        ])
        .block(Block::default().borders(Borders::ALL).title("Valuation"));

        f.render_widget(card, area);
    }

    fn render_projections(&self, f: &mut Frame, area: Rect, result: &DcfResponse) {
        let rows: Vec<Row> = projection_rows(result)
            .into_iter()
            .map(|row| {
                Row::new(vec![
                    row.label,
                    format!("{:.1}", row.fcf),
                    format!("{:.1}", row.discounted_fcf),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Length(8), Constraint::Length(14), Constraint::Length(16)],
        )
        .header(
            Row::new(vec!["Year", "FCF ($M)", "PV of FCF ($M)"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Cash Flow Projections"));

        f.render_widget(table, area);
    }
}

impl View for DcfView {
    fn render(&self, f: &mut Frame, area: Rect, _facts: &ValuationFacts) {
        let layout = ViewLayout::new(area, 46);
        render_view_title(f, layout.title, self.get_title(), "Intrinsic value from projected free cash flows");
        render_form(f, layout.inputs, "Assumptions", &FIELDS, &self.values(), &self.form);

        let sections = layout.split_results(&[Constraint::Length(5), Constraint::Min(0)]);
        self.render_metrics(f, sections[0]);

        match (&self.result, self.busy) {
            (_, true) => render_placeholder(f, sections[1], "Running valuation..."),
            (Some(result), false) => self.render_projections(f, sections[1], result),
            (None, false) => render_placeholder(f, sections[1], "Enter assumptions and run valuation"),
        }
    }

    fn get_title(&self) -> &'static str {
        "DCF Valuation"
    }

    fn get_status(&self, _facts: &ValuationFacts) -> String {
        if self.busy {
            "Valuation running".to_string()
        } else {
            "↑↓ select • type to edit • r run valuation".to_string()
        }
    }

    fn handle_key(&mut self, key: KeyCode, _facts: &ValuationFacts) -> ViewAction {
        if !self.form.is_editing() && key == KeyCode::Char('r') {
            return match self.begin_run() {
                Some(call) => ViewAction::Dispatch(call),
                None => ViewAction::Handled,
            };
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
