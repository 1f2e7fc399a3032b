use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use tracing::info;

use crate::analysis::{display_matrix, ValuationFacts};
use crate::api::ApiError;
use crate::models::{SensitivityAssumptions, SensitivityResponse};
use super::components::{format_rate, heat_color, render_form, render_placeholder, render_view_title};
use super::events::ServiceCall;
use super::form::{FieldSpec, FieldUnit, FormEvent, NumericForm};
use super::layout::ViewLayout;
use super::view::{View, ViewAction};

const FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("Revenue", FieldUnit::Money),
    FieldSpec::new("Revenue Growth", FieldUnit::Percent),
    FieldSpec::new("EBITDA Margin", FieldUnit::Percent),
    FieldSpec::new("Tax Rate", FieldUnit::Percent),
    FieldSpec::new("CapEx % Revenue", FieldUnit::Percent),
    FieldSpec::new("NWC % Revenue", FieldUnit::Percent),
    FieldSpec::new("WACC", FieldUnit::Percent),
    FieldSpec::new("Terminal Growth", FieldUnit::Percent),
];

/// WACC by terminal-growth grid of valuations
pub struct SensitivityView {
    pub assumptions: SensitivityAssumptions,
    pub result: Option<SensitivityResponse>,
    pub busy: bool,
    form: NumericForm,
    forecast_years: u32,
}

impl SensitivityView {
    pub fn new(forecast_years: u32) -> Self {
        Self {
            assumptions: SensitivityAssumptions::default(),
            result: None,
            busy: false,
            form: NumericForm::new(),
            forecast_years,
        }
    }

    pub fn begin_run(&mut self) -> Option<ServiceCall> {
        if self.busy {
            info!("Sensitivity run already in progress, ignoring trigger");
            return None;
        }
        self.busy = true;
        Some(ServiceCall::Sensitivity(self.assumptions.to_request(self.forecast_years)))
    }

    /// Sensitivity results stay local; nothing is shared through the hub
    pub fn complete_run(&mut self, outcome: Result<SensitivityResponse, ApiError>) -> Result<String, ApiError> {
        self.busy = false;
        let response = outcome?;
        let summary = format!(
            "{} x {} grid",
            response.terminal_growth_values.len(),
            response.wacc_values.len()
        );
        self.result = Some(response);
        Ok(summary)
    }

    /// Switch between enterprise and equity display without refetching
    pub fn toggle_mode(&mut self) {
        self.assumptions.mode = self.assumptions.mode.toggled();
    }

    fn values(&self) -> [f64; 8] {
        let a = &self.assumptions;
        [
            a.revenue,
            a.revenue_growth,
            a.ebitda_margin,
            a.tax_rate,
            a.capex_percent,
            a.wc_percent,
            a.wacc,
            a.terminal_growth,
        ]
    }

    fn set_value(&mut self, index: usize, value: f64) {
        let a = &mut self.assumptions;
        match index {
            0 => a.revenue = value,
            1 => a.revenue_growth = value,
            2 => a.ebitda_margin = value,
            3 => a.tax_rate = value,
            4 => a.capex_percent = value,
            5 => a.wc_percent = value,
            6 => a.wacc = value,
            7 => a.terminal_growth = value,
            _ => {}
        }
    }

    /// Rows are terminal growth rates, columns are WACC values
    fn render_heatmap(&self, f: &mut Frame, area: Rect, result: &SensitivityResponse) {
        let matrix = display_matrix(result, self.assumptions.mode);

        let defined = matrix.iter().flatten().flatten().copied();
        let (min, max) = defined.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut header = vec![Cell::from("g \\ WACC").style(header_style)];
        header.extend(result.wacc_values.iter().map(|w| Cell::from(format_rate(*w)).style(header_style)));

        let rows: Vec<Row> = matrix
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let label = result
                    .terminal_growth_values
                    .get(i)
                    .map(|g| format_rate(*g))
                    .unwrap_or_default();

                let mut cells = vec![Cell::from(label).style(header_style)];
                cells.extend(row.iter().map(|cell| match cell {
                    Some(value) => Cell::from(format!("{:.0}", value))
                        .style(Style::default().fg(Color::Black).bg(heat_color(*value, min, max))),
                    None => Cell::from("—").style(Style::default().fg(Color::DarkGray)),
                }));
                Row::new(cells)
            })
            .collect();

        let mut widths = vec![Constraint::Length(10)];
        widths.extend(result.wacc_values.iter().map(|_| Constraint::Length(9)));

        let table = Table::new(rows, widths)
            .header(Row::new(header))
            .block(Block::default().borders(Borders::ALL).title(self.assumptions.mode.title()));

        f.render_widget(table, area);
    }

    fn render_mode(&self, f: &mut Frame, area: Rect) {
        let mode = self.assumptions.mode;
        let line = Line::from(vec![
            Span::styled("Display: ", Style::default().fg(Color::Gray)),
            Span::styled(mode.short_label(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled("  (m to switch EV/EQ)", Style::default().fg(Color::Gray)),
        ]);
        f.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
    }
}

impl View for SensitivityView {
    fn render(&self, f: &mut Frame, area: Rect, _facts: &ValuationFacts) {
        let layout = ViewLayout::new(area, 46);
        render_view_title(f, layout.title, self.get_title(), "Valuation across WACC and terminal growth");
        render_form(f, layout.inputs, "Assumptions", &FIELDS, &self.values(), &self.form);

        let sections = layout.split_results(&[Constraint::Length(3), Constraint::Min(0)]);
        self.render_mode(f, sections[0]);

        match (&self.result, self.busy) {
            (_, true) => render_placeholder(f, sections[1], "Running sensitivity analysis..."),
            (Some(result), false) => self.render_heatmap(f, sections[1], result),
            (None, false) => render_placeholder(f, sections[1], "Enter assumptions and run sensitivity analysis"),
        }
    }

    fn get_title(&self) -> &'static str {
        "Sensitivity Analysis"
    }

    fn get_status(&self, _facts: &ValuationFacts) -> String {
        if self.busy {
            "Sensitivity analysis running".to_string()
        } else {
            format!("↑↓ select • type to edit • r run • m mode ({})", self.assumptions.mode.short_label())
        }
    }

    fn handle_key(&mut self, key: KeyCode, _facts: &ValuationFacts) -> ViewAction {
        if !self.form.is_editing() {
            match key {
                KeyCode::Char('r') => {
                    return match self.begin_run() {
                        Some(call) => ViewAction::Dispatch(call),
                        None => ViewAction::Handled,
                    };
                }
                KeyCode::Char('m') => {
                    self.toggle_mode();
                    return ViewAction::Handled;
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
