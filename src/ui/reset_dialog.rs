use crate::app::state::AppState;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    if !state.reset_dialog {
        return;
    }

    let popup_area = centered_rect(46, 7, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Reset ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_ROSE))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let engine = &state.engine;
    let lines = vec![
        Line::from(Span::styled(
            "Clear the pool and all results?",
            Style::default().fg(Theme::TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} available, {} drawn", engine.available(), engine.selected()),
            Style::default().fg(Theme::TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y/Enter", Theme::key_hint()),
            Span::styled(" Reset  ", Style::default().fg(Theme::TEXT_SECONDARY)),
            Span::styled("n/Esc", Theme::key_hint()),
            Span::styled(" Cancel", Style::default().fg(Theme::TEXT_SECONDARY)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup_area);
}
