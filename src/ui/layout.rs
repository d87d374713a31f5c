use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub pool: Rect,
    pub slot_machine: Rect,
    pub results: Rect,
    pub controls: Rect,
    pub activity: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: header | content | activity | input | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(12),   // Panels
            Constraint::Length(7), // Activity log
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = main_chunks[0];
    let content = main_chunks[1];
    let activity = main_chunks[2];
    let input_box = main_chunks[3];
    let status_bar = main_chunks[4];

    // Horizontal: pool | slot machine + results | controls
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(20), // Pool list
            Constraint::Min(40),    // Centre column
            Constraint::Length(28), // Controls
        ])
        .split(content);

    let pool = h_chunks[0];
    let controls = h_chunks[2];

    let centre_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Slot machine
            Constraint::Min(5),    // Results grid
        ])
        .split(h_chunks[1]);

    AppLayout {
        header,
        pool,
        slot_machine: centre_chunks[0],
        results: centre_chunks[1],
        controls,
        activity,
        input_box,
        status_bar,
    }
}

/// A rectangle of at most `width` x `height` centred in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
