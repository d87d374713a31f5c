mod activity;
mod controls;
mod header;
mod input_box;
mod layout;
mod pool_panel;
mod reset_dialog;
mod results_grid;
mod slot_machine;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    pool_panel::render(frame, app_layout.pool, state);
    slot_machine::render(frame, app_layout.slot_machine, state);
    results_grid::render(frame, app_layout.results, state);
    controls::render(frame, app_layout.controls, state);
    activity::render(frame, app_layout.activity, state);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Popups render last so they sit on top
    reset_dialog::render(frame, state);
}
