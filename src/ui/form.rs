//! Numeric assumption entry shared by the input views.

use crossterm::event::KeyCode;

/// How a stored value is shown and typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUnit {
    /// Millions of dollars
    Money,
    /// Stored as a fraction, typed and shown as a percentage
    Percent,
    /// Millions of shares
    Shares,
    /// Dollars per share
    Price,
}

impl FieldUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            FieldUnit::Money => "$M",
            FieldUnit::Percent => "%",
            FieldUnit::Shares => "M",
            FieldUnit::Price => "$",
        }
    }

    pub fn to_display(self, stored: f64) -> f64 {
        match self {
            FieldUnit::Percent => stored * 100.0,
            _ => stored,
        }
    }

    pub fn from_display(self, typed: f64) -> f64 {
        match self {
            FieldUnit::Percent => typed / 100.0,
            _ => typed,
        }
    }

    pub fn format(self, stored: f64) -> String {
        match self {
            FieldUnit::Percent => format!("{:.2}", self.to_display(stored)),
            FieldUnit::Price => format!("{:.2}", stored),
            FieldUnit::Money | FieldUnit::Shares => format!("{}", stored),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub unit: FieldUnit,
}

impl FieldSpec {
    pub const fn new(label: &'static str, unit: FieldUnit) -> Self {
        Self { label, unit }
    }
}

/// Result of feeding a key to a form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Key is not a form key
    Ignored,
    /// Key changed selection or the edit buffer
    Consumed,
    /// A new stored value for the field at `index`
    Commit { index: usize, value: f64 },
    /// The typed text was not a finite number
    Rejected(String),
}

/// Selection and in-progress edit over a fixed list of fields
#[derive(Debug, Clone, Default)]
pub struct NumericForm {
    pub selected: usize,
    pub buffer: Option<String>,
}

impl NumericForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn handle_key(&mut self, key: KeyCode, fields: &[FieldSpec]) -> FormEvent {
        if fields.is_empty() {
            return FormEvent::Ignored;
        }

        if let Some(buffer) = self.buffer.as_mut() {
            return match key {
                KeyCode::Char(c) if is_numeric_char(c) => {
                    buffer.push(c);
                    FormEvent::Consumed
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    FormEvent::Consumed
                }
                KeyCode::Esc => {
                    self.buffer = None;
                    FormEvent::Consumed
                }
                KeyCode::Enter => self.commit(fields),
                // Swallow everything else until the edit ends
                _ => FormEvent::Consumed,
            };
        }

        match key {
            KeyCode::Up => {
                self.selected = if self.selected == 0 { fields.len() - 1 } else { self.selected - 1 };
                FormEvent::Consumed
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % fields.len();
                FormEvent::Consumed
            }
            KeyCode::Enter => {
                self.buffer = Some(String::new());
                FormEvent::Consumed
            }
            KeyCode::Char(c) if is_numeric_char(c) => {
                self.buffer = Some(c.to_string());
                FormEvent::Consumed
            }
            _ => FormEvent::Ignored,
        }
    }

    fn commit(&mut self, fields: &[FieldSpec]) -> FormEvent {
        let typed = self.buffer.take().unwrap_or_default();
        let index = self.selected.min(fields.len() - 1);
        match typed.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => FormEvent::Commit {
                index,
                value: fields[index].unit.from_display(value),
            },
            _ => FormEvent::Rejected(format!("'{}' is not a number", typed)),
        }
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}
