use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

fn page_caption(page: usize, total_pages: usize, total: usize) -> String {
    format!("Page {} of {} ({} total numbers)", page, total_pages, total)
}

/// Width of one grid cell: the widest number on the page plus a gap.
fn cell_width(items: &[i64]) -> usize {
    items.iter().map(|n| n.to_string().len()).max().unwrap_or(1) + 2
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Results;
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let engine = &state.engine;
    let block = Block::default()
        .title(format!(" Results ({}) ", engine.selected()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    if engine.is_exhausted() {
        lines.push(Line::from(Span::styled(
            "All numbers have been selected!",
            Style::default()
                .fg(Theme::ACCENT_AMBER)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let items = engine.page_items();
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "No numbers drawn yet.",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
    } else {
        let columns = state.config.ui.grid_columns.max(1);
        let width = cell_width(items);
        let first_ordinal = (engine.page() - 1) * engine.page_size() + 1;
        let newest = engine.selected();

        for (row, chunk) in items.chunks(columns).enumerate() {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, n)| {
                    let ordinal = first_ordinal + row * columns + col;
                    let style = if ordinal == newest {
                        Theme::winner_message()
                    } else {
                        Theme::result_number()
                    };
                    Span::styled(format!("{:>width$}", n, width = width), style)
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    // Footer with page info sits on the last inner row
    let body_h = inner.height.saturating_sub(1);
    frame.render_widget(
        Paragraph::new(lines),
        Rect::new(inner.x, inner.y, inner.width, body_h),
    );

    let footer = Line::from(vec![
        Span::styled(
            page_caption(engine.page(), engine.total_pages(), engine.selected()),
            Style::default().fg(Theme::TEXT_SECONDARY),
        ),
        Span::styled("  [ ] PgUp/PgDn", Theme::timestamp()),
    ]);
    frame.render_widget(
        Paragraph::new(footer),
        Rect::new(inner.x, inner.y + body_h, inner.width, 1),
    );
}
