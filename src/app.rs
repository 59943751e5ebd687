use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, warn};

use crate::bridge::{CalcCommand, UiEvent};
use crate::client::{LoanRequest, MAX_PRINCIPAL, MAX_RATE, MIN_RATE};
use crate::render::{render_outputs, Breakdown, OutputSlots};
use crate::tenure::TenureSelect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Amount,
    Rate,
    Tenure,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Amount => Field::Rate,
            Field::Rate => Field::Tenure,
            Field::Tenure => Field::Amount,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Amount => Field::Tenure,
            Field::Rate => Field::Amount,
            Field::Tenure => Field::Rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub max_months: u32,
    pub step: u32,
    pub default_months: u32,
    pub amount: String,
    pub rate: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_months: 360,
            step: 3,
            default_months: 12,
            amount: String::new(),
            rate: "10".to_string(),
        }
    }
}

pub struct App {
    pub focus: Field,
    pub amount: String,
    pub rate: String,
    pub rate_text: String,
    pub tenure: TenureSelect,
    pub outputs: OutputSlots,
    issued_seq: u64,
    shown_seq: u64,
    cmd_tx: Sender<CalcCommand>,
}

impl App {
    /// Fills the tenure list, echoes the starting rate and queues the first
    /// calculation.
    pub fn new(config: AppConfig, cmd_tx: Sender<CalcCommand>) -> Self {
        let mut tenure = TenureSelect::default();
        tenure.populate(config.max_months, config.step, config.default_months);

        let mut app = Self {
            focus: Field::Amount,
            rate_text: config.rate.clone(),
            amount: config.amount,
            rate: config.rate,
            tenure,
            outputs: OutputSlots::default(),
            issued_seq: 0,
            shown_seq: 0,
            cmd_tx,
        };
        app.recalculate();
        app
    }

    pub fn is_pending(&self) -> bool {
        self.shown_seq < self.issued_seq
    }

    /// Reads the three inputs, clamped to what the backend accepts.
    pub fn loan_request(&self) -> LoanRequest {
        LoanRequest {
            principal: parse_leading_f64(&self.amount).clamp(0.0, MAX_PRINCIPAL),
            rate: parse_leading_f64(&self.rate).clamp(MIN_RATE, MAX_RATE),
            tenure_months: self.tenure.selected_months().unwrap_or(0),
        }
    }

    pub fn recalculate(&mut self) {
        let request = self.loan_request();
        self.issued_seq += 1;
        let seq = self.issued_seq;

        let command = CalcCommand {
            seq,
            request: request.clone(),
        };
        if self.cmd_tx.send(command).is_err() {
            warn!(seq, "calculation worker unavailable");
            self.show(seq, Breakdown::fallback(&request));
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Calculated {
                seq,
                request,
                outcome,
            } => {
                if seq <= self.shown_seq {
                    debug!(seq, shown = self.shown_seq, "dropping stale calculation");
                    return;
                }
                let breakdown = match outcome {
                    Ok(result) => Breakdown::from_result(&request, &result),
                    Err(err) => {
                        error!(seq, "calculation failed: {err}");
                        Breakdown::fallback(&request)
                    }
                };
                self.show(seq, breakdown);
            }
            UiEvent::BridgeDown(reason) => {
                error!("calculation worker stopped: {reason}");
                let seq = self.issued_seq;
                self.show(seq, Breakdown::fallback(&self.loan_request()));
            }
        }
    }

    fn show(&mut self, seq: u64, breakdown: Breakdown) {
        self.outputs.overwrite(render_outputs(&breakdown));
        self.shown_seq = self.shown_seq.max(seq);
    }

    /// Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Field::Amount => handle_amount_input(self, key),
            Field::Rate => handle_rate_input(self, key),
            Field::Tenure => handle_tenure_input(self, key),
        }
        false
    }
}

fn edit_numeric(buffer: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        _ => false,
    }
}

fn handle_amount_input(app: &mut App, key: KeyEvent) {
    if edit_numeric(&mut app.amount, key) {
        app.recalculate();
    }
}

fn handle_rate_input(app: &mut App, key: KeyEvent) {
    if edit_numeric(&mut app.rate, key) {
        app.rate_text = app.rate.clone();
        app.recalculate();
    }
}

fn handle_tenure_input(app: &mut App, key: KeyEvent) {
    let moved = match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.tenure.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.tenure.select_previous(),
        _ => false,
    };
    if moved {
        app.recalculate();
    }
}

/// Longest numeric prefix of `raw`, or zero if there is none.
pub fn parse_leading_f64(raw: &str) -> f64 {
    let raw = raw.trim_start();
    (1..=raw.len())
        .rev()
        .filter(|&end| raw.is_char_boundary(end))
        .find_map(|end| raw[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
