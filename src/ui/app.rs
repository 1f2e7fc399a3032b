use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use crate::analysis::{HubUpdate, ResultHub};
use crate::api::ValuationService;
use crate::models::Config;
use super::comps_view::CompsView;
use super::components::render_notification;
use super::dcf_view::DcfView;
use super::events::{EventManager, ServiceCall, ServiceOutcome};
use super::layout::TuiLayout;
use super::reports_view::ReportsView;
use super::sensitivity_view::SensitivityView;
use super::state::{ActivityLog, LogLevel};
use super::view::{Tab, View, ViewAction};

/// A message the user must dismiss before doing anything else
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub detail: String,
}

/// The workbench shell: four views, the shared hub, and the activity log
pub struct WorkbenchApp {
    pub dcf: DcfView,
    pub comps: CompsView,
    pub sensitivity: SensitivityView,
    pub reports: ReportsView,
    pub hub: ResultHub,
    pub activity: ActivityLog,
    pub notification: Option<Notification>,
    pub current_tab: Tab,
    pub should_quit: bool,
    hub_updates: broadcast::Receiver<HubUpdate>,
}

impl WorkbenchApp {
    pub fn new(config: &Config) -> Self {
        let hub = ResultHub::new();
        let hub_updates = hub.subscribe();

        Self {
            dcf: DcfView::new(config.forecast_years),
            comps: CompsView::new(config.export_dir.clone()),
            sensitivity: SensitivityView::new(config.forecast_years),
            reports: ReportsView::new(),
            hub,
            activity: ActivityLog::new(),
            notification: None,
            current_tab: Tab::Dcf,
            should_quit: false,
            hub_updates,
        }
    }

    fn current_view(&self) -> &dyn View {
        match self.current_tab {
            Tab::Dcf => &self.dcf,
            Tab::Comps => &self.comps,
            Tab::Sensitivity => &self.sensitivity,
            Tab::Reports => &self.reports,
        }
    }

    fn current_view_mut(&mut self) -> &mut dyn View {
        match self.current_tab {
            Tab::Dcf => &mut self.dcf,
            Tab::Comps => &mut self.comps,
            Tab::Sensitivity => &mut self.sensitivity,
            Tab::Reports => &mut self.reports,
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let layout = TuiLayout::new(f.area());
        let facts = self.hub.snapshot();

        layout.render_tab_bar(f, self.current_tab);

        let view = self.current_view();
        view.render(f, layout.content, &facts);
        layout.render_status_bar(f, &view.get_status(&facts), &self.activity);

        if let Some(notification) = &self.notification {
            render_notification(f, f.area(), &notification.message, &notification.detail);
        }
    }

    /// Handle one key press. Returns the request to send when a view triggered a run.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<ServiceCall> {
        if self.notification.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.notification = None;
            }
            return None;
        }

        if !self.current_view().is_editing() {
            match key {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return None;
                }
                KeyCode::Tab => {
                    self.current_tab = self.current_tab.next();
                    return None;
                }
                KeyCode::BackTab => {
                    self.current_tab = self.current_tab.previous();
                    return None;
                }
                KeyCode::F(n @ 1..=4) => {
                    self.current_tab = Tab::ALL[(n - 1) as usize];
                    return None;
                }
                _ => {}
            }
        }

        let facts = self.hub.snapshot();
        match self.current_view_mut().handle_key(key, &facts) {
            ViewAction::Dispatch(call) => {
                self.activity.start_operation(call.kind());
                Some(call)
            }
            ViewAction::Notify(detail) => {
                self.notification = Some(Notification {
                    message: "Invalid input".to_string(),
                    detail,
                });
                None
            }
            ViewAction::Handled | ViewAction::Ignored => None,
        }
    }

    /// Apply a completed request to the view that issued it
    pub fn apply_outcome(&mut self, outcome: ServiceOutcome) {
        let kind = outcome.kind();
        let result = match outcome {
            ServiceOutcome::Dcf(response) => self.dcf.complete_run(response, &mut self.hub),
            ServiceOutcome::Comps(response) => self.comps.complete_run(response, &mut self.hub),
            ServiceOutcome::Sensitivity(response) => self.sensitivity.complete_run(response),
            ServiceOutcome::ExportPdf(saved) => self.comps.complete_export(saved),
        };

        match result {
            Ok(summary) => {
                info!("{} completed: {}", kind, summary);
                self.activity.complete_operation(kind, Ok(summary));
            }
            Err(e) => {
                error!("{}: {}", kind.failure_message(), e);
                self.activity.complete_operation(kind, Err(e.to_string()));
                self.notification = Some(Notification {
                    message: kind.failure_message(),
                    detail: e.to_string(),
                });
            }
        }
    }

    /// Record hub writes in the activity log
    pub fn drain_hub_updates(&mut self) {
        loop {
            match self.hub_updates.try_recv() {
                Ok(HubUpdate::DcfRecorded { enterprise_value, implied_share_price }) => {
                    self.activity.add_log_message(
                        LogLevel::Info,
                        &format!("Shared DCF EV {:.0} / price {:.2}", enterprise_value, implied_share_price),
                    );
                }
                Ok(HubUpdate::CompsRecorded { median_enterprise_value }) => {
                    self.activity.add_log_message(
                        LogLevel::Info,
                        &format!("Shared comps median EV {:.0}", median_enterprise_value),
                    );
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Activity log missed {} hub updates", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}

/// Run the workbench until the user quits
pub async fn run_app(config: Config, service: Arc<dyn ValuationService>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = WorkbenchApp::new(&config);
    let result = event_loop(&mut terminal, &mut app, service).await;

    // Restore the terminal even when the loop failed
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut WorkbenchApp,
    service: Arc<dyn ValuationService>,
) -> Result<()> {
    const MAX_EVENTS_PER_CYCLE: usize = 10;
    let mut events = EventManager::new();

    loop {
        let mut events_processed = false;
        let mut event_count = 0;

        while event_count < MAX_EVENTS_PER_CYCLE && event::poll(std::time::Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                debug!("Key event: {:?}", key_event.code);

                if let Some(call) = app.handle_key(key_event.code) {
                    events.dispatch(call, Arc::clone(&service));
                }
                events_processed = true;
                event_count += 1;

                if app.should_quit {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }

        while let Some(outcome) = events.try_receive() {
            app.apply_outcome(outcome);
            events_processed = true;
        }
        app.drain_hub_updates();

        terminal.draw(|f| app.draw(f))?;

        let delay_ms = if events_processed { 8 } else { 16 };
        tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
    }
}
