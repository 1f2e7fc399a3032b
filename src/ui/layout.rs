use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::state::{ActivityLog, LogLevel};
use super::view::Tab;

/// Activity log entries shown under the status line
pub const STATUS_LOG_LINES: usize = 3;

/// Centralized layout management for the workbench shell
pub struct TuiLayout {
    pub tab_bar: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

impl TuiLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(3 + STATUS_LOG_LINES as u16), // Status bar and recent activity
            ])
            .split(area);

        Self {
            tab_bar: chunks[0],
            content: chunks[1],
            status_bar: chunks[2],
        }
    }

    /// Render the tab bar
    pub fn render_tab_bar(&self, f: &mut Frame, selected: Tab) {
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("ValuEdge Workbench"))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .select(selected.index());

        f.render_widget(tabs, self.tab_bar);
    }

    /// Render the status bar with the most recent activity entries
    pub fn render_status_bar(&self, f: &mut Frame, view_status: &str, activity: &ActivityLog) {
        let mut status_content = vec![
            Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(" switch views • ", Style::default().fg(Color::Gray)),
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" run • ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" quit • ", Style::default().fg(Color::Gray)),
                Span::styled(view_status.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Gray)),
                Span::styled(activity.get_status_text(), Style::default().fg(Color::Cyan)),
            ]),
        ];

        for entry in activity.get_recent_logs(STATUS_LOG_LINES) {
            let color = match entry.level {
                LogLevel::Info => Color::Gray,
                LogLevel::Success => Color::Green,
                LogLevel::Error => Color::Red,
            };
            status_content.push(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ]));
        }

        let paragraph = Paragraph::new(status_content)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, self.status_bar);
    }
}

/// Layout inside a view: assumption form on the left, results on the right
pub struct ViewLayout {
    pub title: Rect,
    pub inputs: Rect,
    pub results: Rect,
}

impl ViewLayout {
    pub fn new(content_area: Rect, input_width: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Main content
            ])
            .split(content_area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(input_width), Constraint::Min(0)])
            .split(rows[1]);

        Self {
            title: rows[0],
            inputs: columns[0],
            results: columns[1],
        }
    }

    /// Split the results area into stacked sections
    pub fn split_results(&self, constraints: &[Constraint]) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints.to_vec())
            .split(self.results)
            .to_vec()
    }
}
