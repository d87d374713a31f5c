use crate::app::action::Action;
use crate::app::commands::{self, ParsedCommand};
use crate::app::event::{AppEvent, TimerKind};
use crate::app::state::*;
use crate::engine::pool::parse_number;
use crate::engine::{Rejected, SessionToken};
use crate::files::expand_home;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::Path;
use std::time::Instant;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::DrawTimer { kind: TimerKind::Resolve, token } => handle_resolve(state, token),
        AppEvent::DrawTimer { kind: TimerKind::Continue, token } => handle_continue(state, token),
        AppEvent::EngineChanged(_) => {
            state.clamp_pool_selection();
            state.dirty = true;
            vec![]
        }
        AppEvent::Resolved(value) => {
            // Queued before a reset that has since cleared the results
            if !state.engine.results().contains(&value) {
                return vec![];
            }
            state.slot.last = Some(value);
            state.slot.highlight_until = Some(Instant::now() + state.config.draw.highlight());
            state.dirty = true;
            vec![]
        }
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);
    let now = Instant::now();

    if state.roll(now) {
        state.dirty = true;
    }

    // Sparkle fades out
    if state.slot.highlight_until.is_some_and(|until| now >= until) {
        state.slot.highlight_until = None;
        state.dirty = true;
    }

    // Keep the highlight animating
    if state.slot.is_highlighted(now) {
        state.dirty = true;
    }

    vec![]
}

fn schedule(kind: TimerKind, token: SessionToken, state: &AppState) -> Action {
    let delay = match kind {
        TimerKind::Resolve => state.config.draw.spin(),
        TimerKind::Continue => state.config.draw.auto_delay(),
    };
    Action::Schedule { kind, token, delay }
}

fn handle_resolve(state: &mut AppState, token: SessionToken) -> Vec<Action> {
    match state.engine.resolve_draw(token) {
        Ok(res) => {
            state.slot.rolling = None;
            state.slot.last = Some(res.value);
            state.new_draws.push((res.ordinal, res.value));
            state.winner(format!("Lucky number #{}: {}", res.ordinal, res.value));
            if state.engine.is_exhausted() {
                state.info("All numbers have been selected! Reset to start over.".to_string());
            }
            match res.next {
                Some(next) => vec![schedule(TimerKind::Continue, next, state)],
                None => vec![],
            }
        }
        // A timer from before a reset
        Err(Rejected::StaleCallback) => vec![],
        Err(e) => {
            state.advise(&e);
            vec![]
        }
    }
}

fn handle_continue(state: &mut AppState, token: SessionToken) -> Vec<Action> {
    match state.engine.continue_auto(token) {
        Ok(next) => {
            state.start_spin(Instant::now());
            vec![schedule(TimerKind::Resolve, next, state)]
        }
        Err(Rejected::StaleCallback) => vec![],
        Err(e) => {
            state.advise(&e);
            vec![]
        }
    }
}

fn start_single_draw(state: &mut AppState) -> Vec<Action> {
    match state.engine.start_single_draw() {
        Ok(token) => {
            state.start_spin(Instant::now());
            vec![schedule(TimerKind::Resolve, token, state)]
        }
        Err(e) => {
            state.advise(&e);
            vec![]
        }
    }
}

fn start_auto_draw(state: &mut AppState, raw: &str) -> Vec<Action> {
    let Some(count) = parse_number(raw) else {
        state.advise(&Rejected::InvalidNumber(raw.trim().to_string()));
        return vec![];
    };
    let count = usize::try_from(count).unwrap_or(0);
    match state.engine.start_auto_draw(count) {
        Ok(token) => {
            state.start_spin(Instant::now());
            state.info(format!("Auto rolling {} numbers", count));
            vec![schedule(TimerKind::Resolve, token, state)]
        }
        Err(e) => {
            state.advise(&e);
            vec![]
        }
    }
}

fn request_reset(state: &mut AppState) {
    if state.config.ui.confirm_reset {
        state.reset_dialog = true;
    } else {
        perform_reset(state);
    }
    state.dirty = true;
}

fn perform_reset(state: &mut AppState) {
    state.engine.reset();
    state.slot.clear();
    state.input.clear();
    state.pool_selected = 0;
    state.reset_dialog = false;
    state.pending_reset_log = true;
    state.info("Everything has been reset.".to_string());
}

fn report_added(state: &mut AppState, result: Result<usize, Rejected>, what: &str) {
    match result {
        Ok(0) => state.info(format!("No new numbers in {}", what)),
        Ok(n) => state.info(format!("Added {} numbers from {}", n, what)),
        Err(e) => state.advise(&e),
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Reset confirmation captures all input when visible
    if state.reset_dialog {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => perform_reset(state),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.reset_dialog = false,
            _ => {}
        }
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        request_reset(state);
        return vec![];
    }

    match key.code {
        KeyCode::F(5) => return start_single_draw(state),
        KeyCode::F(6) => {
            let raw = state.input.text.clone();
            let actions = start_auto_draw(state, &raw);
            if !actions.is_empty() {
                state.input.clear();
            }
            return actions;
        }
        KeyCode::PageUp => {
            state.engine.prev_page();
            return vec![];
        }
        KeyCode::PageDown => {
            state.engine.next_page();
            return vec![];
        }
        _ => {}
    }

    // Tab to cycle focus (when not in input or input is empty)
    if key.code == KeyCode::Tab && state.focus != FocusPanel::Input {
        state.cycle_focus();
        return vec![];
    }

    match state.focus {
        FocusPanel::Input => handle_input_key(state, key),
        FocusPanel::Pool => handle_pool_key(state, key),
        FocusPanel::Results => handle_results_key(state, key),
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            if text.trim().is_empty() {
                return vec![];
            }
            if text.trim_start().starts_with('/') {
                return handle_command(state, &text);
            }
            let result = state.engine.add_many(&text);
            report_added(state, result, "input");
            vec![]
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.cursor = 0;
            vec![]
        }
        KeyCode::End => {
            state.input.cursor = state.input.text.len();
            vec![]
        }
        KeyCode::Up => {
            state.input.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.input.history_down();
            vec![]
        }
        KeyCode::Tab => {
            if state.input.text.starts_with('/') {
                try_command_completion(state);
            } else {
                state.cycle_focus();
            }
            vec![]
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => state.input.cursor = 0,
                    'e' => state.input.cursor = state.input.text.len(),
                    'u' => state.input.clear(),
                    _ => {}
                }
            } else {
                state.input.insert_char(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_pool_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up => state.move_pool_selection(-1),
        KeyCode::Down => state.move_pool_selection(1),
        KeyCode::Home => state.pool_selected = 0,
        KeyCode::End => state.move_pool_selection(isize::MAX),
        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
            if let Some(value) = state.selected_pool_number() {
                match state.engine.remove(value) {
                    Ok(()) => {
                        state.clamp_pool_selection();
                        state.info(format!("Removed {}", value));
                    }
                    Err(e) => state.advise(&e),
                }
            }
        }
        KeyCode::Char(c) => {
            // Start typing: switch to input
            state.focus = FocusPanel::Input;
            state.input.insert_char(c);
        }
        _ => {}
    }
    vec![]
}

fn handle_results_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('[') => {
            state.engine.prev_page();
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char(']') => {
            state.engine.next_page();
        }
        KeyCode::Home => {
            state.engine.go_to_page(1);
        }
        KeyCode::End => {
            let last = state.engine.total_pages();
            state.engine.go_to_page(last);
        }
        KeyCode::Char(c) => {
            state.focus = FocusPanel::Input;
            state.input.insert_char(c);
        }
        _ => {}
    }
    vec![]
}

fn try_command_completion(state: &mut AppState) {
    let text = state.input.text.clone();
    let partial = text[1..].to_lowercase();
    if partial.contains(' ') {
        return;
    }
    if let Some(first) = commands::COMMANDS.iter().find(|c| c.starts_with(partial.as_str())) {
        state.input.set_text(format!("/{} ", first));
    }
}

fn handle_command(state: &mut AppState, text: &str) -> Vec<Action> {
    let Some(command) = commands::parse_command(text) else {
        state.error(format!("Unknown command or missing argument: {} (try /help)", text.trim()));
        return vec![];
    };

    match command {
        ParsedCommand::Add { value } => {
            match state.engine.add_one(&value) {
                Ok(n) => state.info(format!("Added {}", n)),
                Err(e) => state.advise(&e),
            }
            vec![]
        }
        ParsedCommand::AddMany { list } => {
            let result = state.engine.add_many(&list);
            report_added(state, result, "list");
            vec![]
        }
        ParsedCommand::Range { bounds } => {
            let (lo, hi) = bounds.unwrap_or((state.config.pool.range_start, state.config.pool.range_end));
            let result = state.engine.add_range(lo, hi);
            report_added(state, result, &format!("range {}-{}", lo, hi));
            vec![]
        }
        ParsedCommand::Remove { value } => {
            match state.engine.remove(value) {
                Ok(()) => state.info(format!("Removed {}", value)),
                Err(e) => state.advise(&e),
            }
            vec![]
        }
        ParsedCommand::Clear => {
            match state.engine.clear_pool() {
                Ok(n) => state.info(format!("Cleared {} numbers from the pool", n)),
                Err(e) => state.advise(&e),
            }
            vec![]
        }
        ParsedCommand::Import { path } => vec![Action::ImportFile { path: expand_home(&path) }],
        ParsedCommand::Template { dir } => {
            let dir = dir.unwrap_or_else(|| state.config.pool.export_dir.clone());
            vec![Action::ExportTemplate { dir: expand_home(&dir) }]
        }
        ParsedCommand::Draw => start_single_draw(state),
        ParsedCommand::Auto { count } => start_auto_draw(state, &count),
        ParsedCommand::Next => {
            state.engine.next_page();
            vec![]
        }
        ParsedCommand::Prev => {
            state.engine.prev_page();
            vec![]
        }
        ParsedCommand::Page { page } => {
            state.engine.go_to_page(page);
            vec![]
        }
        ParsedCommand::Reset => {
            request_reset(state);
            vec![]
        }
        ParsedCommand::SaveConfig => vec![Action::SaveConfig],
        ParsedCommand::Help => {
            state.info("Commands:".to_string());
            for (usage, desc) in commands::HELP {
                state.info(format!("  {:<24} {}", usage, desc));
            }
            state.info("Keys: F5 draw, F6 auto (count in input), Tab focus, Ctrl+R reset".to_string());
            vec![]
        }
        ParsedCommand::Quit => vec![Action::Quit],
    }
}

/// Apply the outcome of reading an import file.
pub fn finish_import(state: &mut AppState, path: &Path, read: anyhow::Result<String>) {
    match read {
        Ok(text) => {
            let result = state.engine.import_from(&text);
            report_added(state, result, &path.display().to_string());
        }
        Err(e) => state.error(format!("Import failed: {:#}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::engine::random::ScriptedSource;
    use crate::engine::{DrawEngine, DrawState};

    fn test_state(picks: Vec<usize>) -> AppState {
        let engine = DrawEngine::with_source(100, Box::new(ScriptedSource::new(picks)));
        AppState::new(AppConfig::default(), engine)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)))
    }

    fn type_line(state: &mut AppState, text: &str) -> Vec<Action> {
        for c in text.chars() {
            handle_event(state, key(KeyCode::Char(c)));
        }
        handle_event(state, key(KeyCode::Enter))
    }

    fn fire(action: &Action) -> AppEvent {
        match action {
            Action::Schedule { kind, token, .. } => AppEvent::DrawTimer { kind: *kind, token: *token },
            other => panic!("not a timer: {:?}", other),
        }
    }

    #[test]
    fn test_enter_adds_batch() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "1, 2, 2, 3");
        assert_eq!(state.engine.pool(), &[1, 2, 3]);
        assert!(state.input.text.is_empty());
    }

    #[test]
    fn test_single_draw_flow() {
        let mut state = test_state(vec![1]);
        type_line(&mut state, "/addmany 5,3,9");
        let actions = handle_event(&mut state, key(KeyCode::F(5)));
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::Schedule { kind, delay, .. } => {
                assert_eq!(*kind, TimerKind::Resolve);
                assert_eq!(*delay, state.config.draw.spin());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(state.engine.is_spinning());
        assert!(state.slot.rolling.is_some());

        // Busy: a second F5 schedules nothing
        assert!(handle_event(&mut state, key(KeyCode::F(5))).is_empty());

        let follow = handle_event(&mut state, fire(&actions[0]));
        assert!(follow.is_empty());
        assert_eq!(state.engine.results(), &[3]);
        assert_eq!(state.engine.pool(), &[5, 9]);
        assert_eq!(state.new_draws, vec![(1, 3)]);
        assert_eq!(state.slot.last, Some(3));
        assert_eq!(state.slot.rolling, None);
    }

    #[test]
    fn test_auto_draw_via_f6_chains_timers() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "/range 1 5");
        for c in "3".chars() {
            handle_event(&mut state, key(KeyCode::Char(c)));
        }
        let mut actions = handle_event(&mut state, key(KeyCode::F(6)));
        assert!(state.input.text.is_empty());

        let mut kinds = Vec::new();
        while let Some(action) = actions.pop() {
            if let Action::Schedule { kind, .. } = &action {
                kinds.push(*kind);
            }
            actions = handle_event(&mut state, fire(&action));
        }

        assert_eq!(
            kinds,
            vec![
                TimerKind::Resolve,
                TimerKind::Continue,
                TimerKind::Resolve,
                TimerKind::Continue,
                TimerKind::Resolve
            ]
        );
        assert_eq!(state.engine.results(), &[1, 2, 3]);
        assert_eq!(state.engine.state(), DrawState::Idle);
    }

    #[test]
    fn test_auto_count_out_of_range_is_advisory() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "/range 1 3");
        let actions = type_line(&mut state, "/auto 4");
        assert!(actions.is_empty());
        assert_eq!(state.engine.state(), DrawState::Idle);
        assert_eq!(state.last_message().unwrap().kind, MessageKind::Warning);
    }

    #[test]
    fn test_reset_needs_confirmation_and_drops_stale_timer() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "/range 1 3");
        let actions = type_line(&mut state, "/draw");

        handle_event(&mut state, ctrl('r'));
        assert!(state.reset_dialog);
        handle_event(&mut state, key(KeyCode::Char('n')));
        assert!(!state.reset_dialog);
        assert_eq!(state.engine.available(), 3);

        handle_event(&mut state, ctrl('r'));
        handle_event(&mut state, key(KeyCode::Char('y')));
        assert!(!state.reset_dialog);
        assert!(state.pending_reset_log);
        assert_eq!(state.engine.total(), 0);

        type_line(&mut state, "/range 10 12");
        assert!(handle_event(&mut state, fire(&actions[0])).is_empty());
        assert!(state.engine.results().is_empty());
        assert_eq!(state.engine.available(), 3);
    }

    #[test]
    fn test_pool_panel_removes_selected() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "/range 1 4");
        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, FocusPanel::Pool);
        handle_event(&mut state, key(KeyCode::Down));
        handle_event(&mut state, key(KeyCode::Delete));
        assert_eq!(state.engine.pool(), &[1, 3, 4]);
        handle_event(&mut state, key(KeyCode::End));
        handle_event(&mut state, key(KeyCode::Char('d')));
        assert_eq!(state.engine.pool(), &[1, 3]);
        assert_eq!(state.pool_selected, 1);
    }

    #[test]
    fn test_results_paging_keys() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "/range 1 250");
        for _ in 0..250 {
            let actions = handle_event(&mut state, key(KeyCode::F(5)));
            handle_event(&mut state, fire(&actions[0]));
        }
        assert_eq!(state.engine.page(), 3);
        handle_event(&mut state, key(KeyCode::PageUp));
        assert_eq!(state.engine.page(), 2);
        type_line(&mut state, "/page 9");
        assert_eq!(state.engine.page(), 3);
        assert!(state.engine.is_exhausted());
    }

    #[test]
    fn test_command_completion_and_unknown_command() {
        let mut state = test_state(vec![0]);
        for c in "/tem".chars() {
            handle_event(&mut state, key(KeyCode::Char(c)));
        }
        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.input.text, "/template ");

        state.input.clear();
        type_line(&mut state, "/bogus");
        assert_eq!(state.last_message().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn test_file_commands_become_actions() {
        let mut state = test_state(vec![0]);
        assert_eq!(
            type_line(&mut state, "/import numbers.csv"),
            vec![Action::ImportFile { path: "numbers.csv".into() }]
        );
        assert_eq!(
            type_line(&mut state, "/template"),
            vec![Action::ExportTemplate { dir: ".".into() }]
        );
        assert_eq!(type_line(&mut state, "/quit"), vec![Action::Quit]);
    }

    #[test]
    fn test_finish_import() {
        let mut state = test_state(vec![0]);
        state.engine.add_one("2").unwrap();
        finish_import(&mut state, Path::new("x.csv"), Ok("1,2\n3\tz".to_string()));
        assert_eq!(state.engine.pool(), &[2, 1, 3]);
        finish_import(&mut state, Path::new("y.csv"), Err(anyhow::anyhow!("boom")));
        assert_eq!(state.last_message().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn test_resolved_event_highlights() {
        let mut state = test_state(vec![0]);
        type_line(&mut state, "8");
        let actions = handle_event(&mut state, key(KeyCode::F(5)));
        handle_event(&mut state, fire(&actions[0]));
        handle_event(&mut state, AppEvent::Resolved(8));
        assert_eq!(state.slot.last, Some(8));
        assert!(state.slot.is_highlighted(Instant::now()));
    }

    #[test]
    fn test_resolved_after_reset_is_ignored() {
        let mut state = test_state(vec![0]);
        state.config.ui.confirm_reset = false;
        type_line(&mut state, "1, 2");
        let actions = handle_event(&mut state, key(KeyCode::F(5)));
        handle_event(&mut state, fire(&actions[0]));
        handle_event(&mut state, ctrl('r'));
        handle_event(&mut state, AppEvent::Resolved(1));
        assert_eq!(state.slot.last, None);
        assert!(state.engine.results().is_empty());
        assert!(!state.slot.is_highlighted(Instant::now()));
    }
}
