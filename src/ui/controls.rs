use crate::app::state::*;
use crate::engine::DrawState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

fn stat_line(label: &str, value: usize, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<11}", label), Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn hint_line(key: &str, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<8}", key), Theme::key_hint()),
        Span::styled(what.to_string(), Style::default().fg(Theme::TEXT_SECONDARY)),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Controls ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());

    let engine = &state.engine;
    let mut lines = vec![
        stat_line("Available", engine.available(), Theme::ACCENT_TEAL),
        stat_line("Selected", engine.selected(), Theme::ACCENT_GREEN),
        stat_line("Total", engine.total(), Theme::TEXT_PRIMARY),
        Line::from(""),
    ];

    let status = match engine.state() {
        DrawState::Idle => Span::styled(" Ready", Style::default().fg(Theme::TEXT_MUTED)),
        DrawState::Drawing { auto: false, .. } => {
            Span::styled(" Rolling...", Style::default().fg(Theme::ACCENT_AMBER))
        }
        DrawState::Drawing { remaining, auto: true } | DrawState::AutoDrawing { remaining } => {
            Span::styled(
                format!(" Auto rolling... {} left", remaining),
                Style::default()
                    .fg(Theme::ACCENT_AMBER)
                    .add_modifier(Modifier::BOLD),
            )
        }
    };
    lines.push(Line::from(status));
    lines.push(Line::from(""));

    lines.push(hint_line("F5", "Draw one"));
    lines.push(hint_line("F6", "Auto (count in input)"));
    lines.push(hint_line("Ctrl+R", "Reset all"));
    lines.push(hint_line("Tab", "Switch panel"));
    lines.push(hint_line("/help", "Commands"));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
