use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::events::RunKind;

/// Keep only the most recent entries
const MAX_LOG_MESSAGES: usize = 100;

/// Application state shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Idle,
    Executing { operation: RunKind, start_time: DateTime<Utc> },
    Error { message: String },
    Success { message: String },
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// Log message with timestamp
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// In-app record of runs and their outcomes
#[derive(Debug, Clone)]
pub struct ActivityLog {
    pub current_state: AppState,
    pub pending_operations: HashMap<RunKind, DateTime<Utc>>,
    pub log_messages: Vec<LogMessage>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            current_state: AppState::Idle,
            pending_operations: HashMap::new(),
            log_messages: Vec::new(),
        }
    }

    /// Start tracking a run
    pub fn start_operation(&mut self, operation: RunKind) {
        let start_time = Utc::now();
        self.pending_operations.insert(operation, start_time);
        self.current_state = AppState::Executing { operation, start_time };
        self.add_log_message(LogLevel::Info, &format!("Started: {}", operation));
    }

    /// Complete a run
    pub fn complete_operation(&mut self, operation: RunKind, result: Result<String, String>) {
        let start_time = self.pending_operations.remove(&operation).unwrap_or_else(Utc::now);
        let elapsed = (Utc::now() - start_time).num_milliseconds() as f64 / 1000.0;

        match result {
            Ok(msg) => {
                self.add_log_message(
                    LogLevel::Success,
                    &format!("Completed: {} in {:.1}s - {}", operation, elapsed, msg),
                );
                self.current_state = AppState::Success { message: msg };
            }
            Err(err) => {
                self.add_log_message(
                    LogLevel::Error,
                    &format!("Failed: {} after {:.1}s - {}", operation, elapsed, err),
                );
                self.current_state = AppState::Error { message: err };
            }
        }
    }

    /// Add a log message
    pub fn add_log_message(&mut self, level: LogLevel, message: &str) {
        self.log_messages.push(LogMessage {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        });

        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    /// Get the current status text for display
    pub fn get_status_text(&self) -> String {
        match &self.current_state {
            AppState::Idle => "Ready".to_string(),
            AppState::Executing { operation, start_time } => {
                let duration = Utc::now() - *start_time;
                format!("Running {}: {}s", operation, duration.num_seconds())
            }
            AppState::Error { message } => format!("Error: {}", message),
            AppState::Success { message } => format!("Success: {}", message),
        }
    }

    pub fn has_active_operations(&self) -> bool {
        !self.pending_operations.is_empty()
    }

    /// Get recent log messages (last N)
    pub fn get_recent_logs(&self, count: usize) -> &[LogMessage] {
        let start = self.log_messages.len().saturating_sub(count);
        &self.log_messages[start..]
    }
}
