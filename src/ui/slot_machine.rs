use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::Instant;

/// Wheel face text, padded so the reel width does not jump.
fn face_text(value: Option<i64>) -> String {
    match value {
        Some(v) => format!("{:^9}", v),
        None => format!("{:^9}", "?"),
    }
}

fn face_spans(text: String, highlighted: bool, spinning: bool, tick: u64) -> Vec<Span<'static>> {
    if highlighted {
        return text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                Span::styled(
                    ch.to_string(),
                    Style::default()
                        .fg(Theme::wave_color(i as u16, tick))
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
    }
    let fg = if spinning { Theme::ACCENT_AMBER } else { Theme::TEXT_PRIMARY };
    vec![Span::styled(text, Style::default().fg(fg).add_modifier(Modifier::BOLD))]
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let spinning = state.engine.is_spinning();
    let highlighted = !spinning && state.slot.is_highlighted(Instant::now());

    let border_style = if spinning {
        Style::default().fg(Theme::ACCENT_AMBER)
    } else if highlighted {
        Style::default().fg(Theme::wave_color(0, state.tick_count))
    } else {
        Theme::border()
    };

    let block = Block::default()
        .title(" Lucky Number ")
        .title_style(Theme::title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(border_style)
        .style(Theme::panel_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (value, caption) = if spinning {
        (state.slot.rolling, "Rolling...".to_string())
    } else if let Some(last) = state.slot.last {
        (Some(last), format!("Draw #{}", state.engine.selected()))
    } else if state.engine.available() == 0 {
        (None, "Add numbers to begin".to_string())
    } else {
        (None, "Press F5 to draw".to_string())
    };

    let reel = Style::default().fg(Theme::BORDER_DIM);
    let mut middle = vec![Span::styled("│ ", reel)];
    middle.extend(face_spans(face_text(value), highlighted, spinning, state.tick_count));
    middle.push(Span::styled(" │", reel));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("╭───────────╮", reel)),
        Line::from(middle),
        Line::from(Span::styled("╰───────────╯", reel)),
        Line::from(""),
        Line::from(Span::styled(caption, Style::default().fg(Theme::TEXT_SECONDARY))),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
