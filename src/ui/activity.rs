use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Activity ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Always pinned to the newest entries
    let available_height = inner.height as usize;
    let total = state.activity.len();
    let start = total.saturating_sub(available_height);

    let lines: Vec<Line> = state
        .activity
        .iter()
        .skip(start)
        .map(format_message)
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("┃")
            .track_symbol(Some("│"))
            .thumb_style(Theme::scrollbar_thumb())
            .track_style(Theme::scrollbar_track());

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn format_message<'a>(msg: &Message) -> Line<'a> {
    let ts = Span::styled(format!("[{}] ", msg.timestamp), Theme::timestamp());

    match msg.kind {
        MessageKind::Info => Line::from(vec![
            ts,
            Span::styled(msg.text.clone(), Theme::message_text()),
        ]),
        MessageKind::Winner => Line::from(vec![
            ts,
            Span::styled("★ ", Style::default().fg(Theme::ACCENT_GREEN)),
            Span::styled(msg.text.clone(), Theme::winner_message()),
        ]),
        MessageKind::Warning => Line::from(vec![
            ts,
            Span::styled("• ", Style::default().fg(Theme::ACCENT_AMBER)),
            Span::styled(msg.text.clone(), Theme::warning_message()),
        ]),
        MessageKind::Error => Line::from(vec![
            ts,
            Span::styled("✘ ", Style::default().fg(Theme::ACCENT_ROSE)),
            Span::styled(msg.text.clone(), Theme::error_message()),
        ]),
    }
}
