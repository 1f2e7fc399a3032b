/// UI components and formatting helpers shared by the workbench views
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::ValueRange;
use super::form::{FieldSpec, NumericForm};

/// Millions of dollars with no decimals, e.g. `$950M`
pub fn format_millions(value: f64) -> String {
    format!("${:.0}M", value)
}

/// Dollars per share, e.g. `$5.00`
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Axis label for a rate stored as a fraction, e.g. `8.5%`
pub fn format_rate(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// `min — median — max` with the given number of decimals
pub fn format_range(range: &ValueRange, decimals: usize) -> String {
    format!(
        "{:.*} — {:.*} — {:.*}",
        decimals, range.min, decimals, range.median, decimals, range.max
    )
}

/// Create a percentage change span with + or - prefix
pub fn styled_percentage_change(value: f64) -> Span<'static> {
    let formatted = if value >= 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    };

    if value >= 0.0 {
        Span::styled(formatted, Style::default().fg(Color::Green))
    } else {
        Span::styled(formatted, Style::default().fg(Color::Red))
    }
}

/// One labelled figure, e.g. `Enterprise Value: $950M`
pub fn metric_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Title strip at the top of a view
pub fn render_view_title(f: &mut Frame, area: Rect, title: &str, description: &str) {
    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", description), Style::default().fg(Color::Gray)),
    ])])
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

/// Assumption list with the selected row highlighted and the edit buffer inline
pub fn render_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    fields: &[FieldSpec],
    values: &[f64],
    form: &NumericForm,
) {
    let items: Vec<ListItem> = fields
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(i, (field, value))| {
            let is_selected = i == form.selected;
            let style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let shown = match (&form.buffer, is_selected) {
                (Some(buffer), true) => format!("{}_", buffer),
                _ => field.unit.format(*value),
            };

            ListItem::new(Line::from(vec![
                Span::styled(if is_selected { "▶ " } else { "  " }, style),
                Span::styled(format!("{:<20}", field.label), style),
                Span::styled(format!("{:>10} ", shown), style),
                Span::styled(field.unit.suffix(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(list, area);
}

/// Placeholder shown in a results panel
pub fn render_placeholder(f: &mut Frame, area: Rect, message: &str) {
    let placeholder = Paragraph::new(message.to_string())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        .wrap(Wrap { trim: true });

    f.render_widget(placeholder, area);
}

/// Blocking error popup centred over `area`
pub fn render_notification(f: &mut Frame, area: Rect, message: &str, detail: &str) {
    let popup = centered_rect(60, 7, area);
    let body = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(detail.to_string(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled("Press Enter or Esc to dismiss", Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::ALL).title("Error"))
    .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// ASCII football field: comps EV range as a bar with its median, DCF EV as a marker.
///
/// Both rows share one axis spanning every plotted value.
pub fn football_field_lines(dcf_value: f64, comps: &ValueRange, width: usize) -> Vec<String> {
    const LABEL_WIDTH: usize = 22;
    if width <= LABEL_WIDTH + 2 {
        return vec!["No room".to_string()];
    }
    let plot_width = width - LABEL_WIDTH;

    let low = dcf_value.min(comps.min);
    let high = dcf_value.max(comps.max);
    let span = high - low;
    let column = |value: f64| -> usize {
        if span.abs() < f64::EPSILON {
            plot_width / 2
        } else {
            let normalized = (value - low) / span;
            ((normalized * (plot_width - 1) as f64).round() as usize).min(plot_width - 1)
        }
    };

    let mut comps_row = vec![' '; plot_width];
    for cell in comps_row.iter_mut().take(column(comps.max) + 1).skip(column(comps.min)) {
        *cell = '█';
    }
    comps_row[column(comps.median)] = '◆';

    let mut dcf_row = vec![' '; plot_width];
    dcf_row[column(dcf_value)] = '│';

    vec![
        format!("{:<width$}{}", "Comparable Companies", comps_row.into_iter().collect::<String>(), width = LABEL_WIDTH),
        format!("{:<width$}{}", "DCF Valuation", dcf_row.into_iter().collect::<String>(), width = LABEL_WIDTH),
        format!(
            "{:<width$}{} … {}",
            "",
            format_millions(low),
            format_millions(high),
            width = LABEL_WIDTH
        ),
    ]
}

/// Colour for a heatmap cell, low values cool and high values warm
pub fn heat_color(value: f64, min: f64, max: f64) -> Color {
    let span = max - min;
    let t = if span.abs() < f64::EPSILON { 0.5 } else { ((value - min) / span).clamp(0.0, 1.0) };
    match (t * 4.0).round() as u8 {
        0 => Color::Blue,
        1 => Color::Cyan,
        2 => Color::Green,
        3 => Color::Yellow,
        _ => Color::Red,
    }
}
