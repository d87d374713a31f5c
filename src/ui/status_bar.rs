use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    // Counters and draw status
    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    // Latest advisory, so a refused action is visible without the log
    if let Some(msg) = state.last_message() {
        if matches!(msg.kind, MessageKind::Warning | MessageKind::Error) {
            parts.push(Span::styled(
                format!("| {} ", msg.text),
                Style::default().fg(Theme::ACCENT_AMBER).bg(Theme::BG_SURFACE),
            ));
        }
    }

    // Focus indicator
    let focus_name = match state.focus {
        FocusPanel::Input => "INPUT",
        FocusPanel::Pool => "POOL",
        FocusPanel::Results => "RESULTS",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_SURFACE),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
