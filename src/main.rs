mod app;
mod config;
mod engine;
mod files;
mod logging;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::engine::DrawEngine;
use crate::logging::DrawLogger;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting luckydraw");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut engine = DrawEngine::new(cfg.ui.page_size);
    engine.set_max_range_len(cfg.pool.max_range_len);
    let change_tx = event_tx.clone();
    engine.subscribe(move |change| {
        let _ = change_tx.send(AppEvent::EngineChanged(change));
    });
    let resolved_tx = event_tx.clone();
    engine.on_resolved(move |value| {
        let _ = resolved_tx.send(AppEvent::Resolved(value));
    });

    let mut draw_logger = DrawLogger::new(&cfg.logging, &cfg.ui.timestamp_format);
    let mut state = AppState::new(cfg, engine);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    state.info("Welcome to Lucky Draw!".to_string());
    state.info("Type numbers separated by commas and press Enter to add them.".to_string());
    state.info(format!(
        "/range adds {}-{}, /import <file> loads a CSV, F5 draws. /help lists everything.",
        state.config.pool.range_start, state.config.pool.range_end
    ));

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        // Drain new draws for the history log
        if state.pending_reset_log {
            draw_logger.log_reset();
            state.pending_reset_log = false;
        }
        for (ordinal, value) in state.new_draws.drain(..) {
            draw_logger.log_draw(ordinal, value);
        }

        // Process actions
        for action in actions {
            match action {
                Action::Schedule { kind, token, delay } => {
                    let timer_tx = event_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = timer_tx.send(AppEvent::DrawTimer { kind, token });
                    });
                }
                Action::ImportFile { path } => {
                    let read = files::read_import(&path, state.config.pool.max_import_bytes);
                    if let Err(ref e) = read {
                        warn!(path = %path.display(), error = %e, "import failed");
                    }
                    handler::finish_import(&mut state, &path, read);
                }
                Action::ExportTemplate { dir } => match files::write_template(&dir) {
                    Ok(path) => state.info(format!("Template written to {}", path.display())),
                    Err(e) => state.error(format!("Template export failed: {:#}", e)),
                },
                Action::SaveConfig => match config::save_config(&state.config) {
                    Ok(path) => state.info(format!("Config saved to {}", path.display())),
                    Err(e) => state.error(format!("Config save failed: {:#}", e)),
                },
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            info!(drawn = state.engine.selected(), "quitting");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
