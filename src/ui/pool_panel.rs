use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use std::ops::Range;

/// Rows of the pool to build for a panel `height` rows tall, keeping
/// `selected` on screen.
fn visible_window(len: usize, selected: usize, height: usize) -> Range<usize> {
    let height = height.max(1);
    let start = selected.min(len.saturating_sub(1)).saturating_sub(height - 1);
    start..(start + height).min(len)
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Pool;
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let pool = state.engine.pool();
    let title = if pool.is_empty() {
        " Pool ".to_string()
    } else {
        format!(" Pool ({}) ", pool.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    if pool.is_empty() {
        let items = vec![ListItem::new(Span::styled(
            " —",
            Style::default().fg(Theme::TEXT_MUTED),
        ))];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    // Only the rows that fit; imports can hold millions of numbers
    let height = block.inner(area).height as usize;
    let selected = if focused { state.pool_selected } else { 0 };
    let window = visible_window(pool.len(), selected, height);
    let offset = window.start;
    let items: Vec<ListItem> = pool[window]
        .iter()
        .map(|n| ListItem::new(Span::styled(format!(" {}", n), Theme::pool_number())))
        .collect();

    let mut list = List::new(items).block(block);
    let mut list_state = ListState::default();
    if focused {
        list = list.highlight_style(Theme::pool_selected());
        list_state.select(Some(state.pool_selected - offset));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}
