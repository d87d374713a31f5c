use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const TITLE: &str = " ✦ LUCKY DRAW ✦ ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let busy = state.engine.is_busy();

    // The title shimmers while a draw is running
    let mut spans: Vec<Span> = TITLE
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let fg = if busy {
                Theme::wave_color(i as u16, state.tick_count)
            } else {
                Theme::ACCENT_TEAL
            };
            Span::styled(
                ch.to_string(),
                Style::default()
                    .fg(fg)
                    .bg(Theme::BG_SURFACE)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    spans.push(Span::styled(
        format!(
            " Page {}/{} ",
            state.engine.page(),
            state.engine.total_pages()
        ),
        Theme::header(),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::header());
    frame.render_widget(paragraph, area);
}
