use crate::config::AppConfig;
use crate::engine::{DrawEngine, Rejected};
use chrono::Local;
use rand::RngExt;
use std::collections::VecDeque;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const MAX_ACTIVITY: usize = 200;

#[derive(Debug, Clone)]
pub struct Message {
    pub timestamp: String,
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind {
    Info,
    Winner,
    Warning,
    Error,
}

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    /// Terminal columns between the start of the text and the cursor.
    pub fn cursor_width(&self) -> usize {
        self.text[..self.cursor].width()
    }

    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => return,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.set_text(self.history[idx].clone());
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.set_text(self.history[i + 1].clone());
            }
            Some(_) => self.clear(),
            None => {}
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the slot machine face shows. Nothing here affects the draw outcome.
#[derive(Debug, Default)]
pub struct SlotDisplay {
    /// Cosmetic value flickering while the wheel spins.
    pub rolling: Option<i64>,
    /// Most recent winning number.
    pub last: Option<i64>,
    pub highlight_until: Option<Instant>,
    last_roll: Option<Instant>,
}

impl SlotDisplay {
    pub fn is_highlighted(&self, now: Instant) -> bool {
        self.highlight_until.is_some_and(|until| now < until)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Input,
    Pool,
    Results,
}

pub struct AppState {
    pub config: AppConfig,
    pub engine: DrawEngine,
    pub input: InputState,
    pub focus: FocusPanel,
    pub pool_selected: usize,
    pub slot: SlotDisplay,
    pub activity: VecDeque<Message>,
    pub reset_dialog: bool,
    /// Draws resolved since the main loop last drained them, as (ordinal, value).
    pub new_draws: Vec<(usize, i64)>,
    pub pending_reset_log: bool,
    pub should_quit: bool,
    pub dirty: bool,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(config: AppConfig, engine: DrawEngine) -> Self {
        Self {
            config,
            engine,
            input: InputState::new(),
            focus: FocusPanel::Input,
            pool_selected: 0,
            slot: SlotDisplay::default(),
            activity: VecDeque::new(),
            reset_dialog: false,
            new_draws: Vec::new(),
            pending_reset_log: false,
            should_quit: false,
            dirty: true,
            tick_count: 0,
        }
    }

    fn push_message(&mut self, text: String, kind: MessageKind) {
        let msg = Message {
            timestamp: Local::now().format(&self.config.ui.timestamp_format).to_string(),
            text,
            kind,
        };
        if self.activity.len() >= MAX_ACTIVITY {
            self.activity.pop_front();
        }
        self.activity.push_back(msg);
        self.dirty = true;
    }

    pub fn info(&mut self, text: String) {
        self.push_message(text, MessageKind::Info);
    }

    pub fn winner(&mut self, text: String) {
        self.push_message(text, MessageKind::Winner);
    }

    pub fn error(&mut self, text: String) {
        self.push_message(text, MessageKind::Error);
    }

    /// Report a refused operation. Purely advisory; the engine is unchanged.
    pub fn advise(&mut self, rejected: &Rejected) {
        self.push_message(capitalize(&rejected.to_string()), MessageKind::Warning);
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.activity.back()
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Input => FocusPanel::Pool,
            FocusPanel::Pool => FocusPanel::Results,
            FocusPanel::Results => FocusPanel::Input,
        };
        self.dirty = true;
    }

    /// Keep the pool selection on an existing entry after the pool shrinks.
    pub fn clamp_pool_selection(&mut self) {
        let len = self.engine.available();
        self.pool_selected = self.pool_selected.min(len.saturating_sub(1));
    }

    pub fn move_pool_selection(&mut self, delta: isize) {
        let len = self.engine.available();
        if len == 0 {
            self.pool_selected = 0;
            return;
        }
        let next = self.pool_selected.saturating_add_signed(delta);
        self.pool_selected = next.min(len - 1);
        self.dirty = true;
    }

    pub fn selected_pool_number(&self) -> Option<i64> {
        self.engine.pool().get(self.pool_selected).copied()
    }

    pub fn start_spin(&mut self, now: Instant) {
        self.slot.rolling = None;
        self.slot.highlight_until = None;
        self.slot.last_roll = None;
        self.roll(now);
    }

    /// Advance the cosmetic spin if the roll interval has elapsed. Returns
    /// whether the face changed.
    pub fn roll(&mut self, now: Instant) -> bool {
        if !self.engine.is_spinning() {
            return false;
        }
        let interval = self.config.draw.roll_interval();
        if self.slot.last_roll.is_some_and(|at| now.duration_since(at) < interval) {
            return false;
        }
        let pool = self.engine.pool();
        if pool.is_empty() {
            return false;
        }
        let idx = rand::rng().random_range(0..pool.len());
        self.slot.rolling = Some(pool[idx]);
        self.slot.last_roll = Some(now);
        true
    }

    pub fn status_line(&self) -> String {
        let engine = &self.engine;
        let mut s = format!(
            "Available: {} | Selected: {} | Total: {}",
            engine.available(),
            engine.selected(),
            engine.total()
        );
        if let Some(remaining) = engine.auto_remaining() {
            s.push_str(&format!(" | Auto rolling... {} remaining", remaining));
        } else if engine.is_spinning() {
            s.push_str(" | Rolling...");
        }
        s
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_editing_and_history() {
        let mut input = InputState::new();
        for c in "1,2".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.delete_back();
        assert_eq!(input.text, "12");
        input.move_right();
        assert_eq!(input.take_text(), "12");
        assert!(input.text.is_empty());

        input.set_text("/draw".into());
        input.take_text();
        input.history_up();
        assert_eq!(input.text, "/draw");
        input.history_up();
        assert_eq!(input.text, "12");
        input.history_down();
        assert_eq!(input.text, "/draw");
        input.history_down();
        assert!(input.text.is_empty());
    }

    #[test]
    fn test_cursor_width_counts_columns() {
        let mut input = InputState::new();
        input.set_text("７7".into());
        assert_eq!(input.cursor_width(), 3);
    }

    #[test]
    fn test_activity_is_bounded() {
        let mut state = AppState::new(AppConfig::default(), DrawEngine::new(100));
        for i in 0..(MAX_ACTIVITY + 5) {
            state.info(format!("line {}", i));
        }
        assert_eq!(state.activity.len(), MAX_ACTIVITY);
        assert_eq!(state.last_message().unwrap().text, format!("line {}", MAX_ACTIVITY + 4));
    }

    #[test]
    fn test_advice_is_capitalized() {
        let mut state = AppState::new(AppConfig::default(), DrawEngine::new(100));
        state.advise(&Rejected::EmptyPool);
        let msg = state.last_message().unwrap();
        assert_eq!(msg.text, "There are no numbers to draw");
        assert_eq!(msg.kind, MessageKind::Warning);
    }
}
