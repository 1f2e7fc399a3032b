use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::analysis::{
    default_market_price, is_reports_ready, Recommendation, ReportSummary, ValuationFacts, REPORTS_FALLBACK_PROMPT,
};
use super::components::{
    format_millions, format_price, metric_line, render_form, render_placeholder, render_view_title,
    styled_percentage_change,
};
use super::form::{FieldSpec, FieldUnit, FormEvent, NumericForm};
use super::layout::ViewLayout;
use super::view::{View, ViewAction};

const FIELDS: [FieldSpec; 1] = [FieldSpec::new("Current Price", FieldUnit::Price)];

/// Investment summary built purely from the shared facts
#[derive(Default)]
pub struct ReportsView {
    /// Market price typed by the user; the discounted DCF price is used otherwise
    pub market_price: Option<f64>,
    form: NumericForm,
}

impl ReportsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary for the current snapshot, or `None` while the gate is closed
    pub fn summary(&self, facts: &ValuationFacts) -> Option<ReportSummary> {
        if !is_reports_ready(facts) {
            return None;
        }
        ReportSummary::from_facts(facts, self.market_price)
    }

    fn render_report(&self, f: &mut Frame, area: Rect, summary: &ReportSummary) {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(8), Constraint::Min(0)])
            .split(area);

        let color = recommendation_color(summary.recommendation);
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                summary.recommendation.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Based on intrinsic valuation vs current market price",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Recommendation"));
        f.render_widget(banner, sections[0]);

        let figures = Paragraph::new(vec![
            metric_line("DCF Enterprise Value", format_millions(summary.dcf_enterprise_value), Color::Cyan),
            metric_line("Comps Median EV", format_millions(summary.comps_median_enterprise_value), Color::Cyan),
            metric_line("DCF Share Price", format_price(summary.share_price_dcf), Color::Green),
            metric_line("Current Price", format_price(summary.current_price), Color::White),
            Line::from(vec![
                Span::styled("Upside: ", Style::default().fg(Color::Gray)),
                styled_percentage_change(summary.upside_percent),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("Key Figures"));
        f.render_widget(figures, sections[1]);

        let conclusion = Paragraph::new(summary.conclusion())
            .block(Block::default().borders(Borders::ALL).title("Conclusion"))
            .wrap(Wrap { trim: true });
        f.render_widget(conclusion, sections[2]);
    }
}

fn recommendation_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::Buy => Color::Green,
        Recommendation::Hold => Color::Yellow,
        Recommendation::Sell => Color::Red,
    }
}

impl View for ReportsView {
    fn render(&self, f: &mut Frame, area: Rect, facts: &ValuationFacts) {
        let layout = ViewLayout::new(area, 40);
        render_view_title(f, layout.title, self.get_title(), "Investment summary from DCF and comps");

        let shown_price = self
            .market_price
            .or_else(|| facts.dcf_implied_share_price.map(default_market_price))
            .unwrap_or(0.0);
        render_form(f, layout.inputs, "Market", &FIELDS, &[shown_price], &self.form);

        match self.summary(facts) {
            Some(summary) => self.render_report(f, layout.results, &summary),
            None => render_placeholder(f, layout.results, REPORTS_FALLBACK_PROMPT),
        }
    }

    fn get_title(&self) -> &'static str {
        "Reports"
    }

    fn get_status(&self, facts: &ValuationFacts) -> String {
        if !is_reports_ready(facts) {
            "Waiting for DCF and comps results".to_string()
        } else if self.market_price.is_some() {
            "Enter edit price • c use default price".to_string()
        } else {
            "Enter set market price".to_string()
        }
    }

    fn handle_key(&mut self, key: KeyCode, _facts: &ValuationFacts) -> ViewAction {
        if !self.form.is_editing() && key == KeyCode::Char('c') {
            self.market_price = None;
            return ViewAction::Handled;
        }

        match self.form.handle_key(key, &FIELDS) {
            FormEvent::Commit { value, .. } if value <= 0.0 => {
                ViewAction::Notify(format!("Market price must be above zero, got {}", value))
            }
            FormEvent::Commit { value, .. } => {
                self.market_price = Some(value);
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
