//! Toolbar above the table: page size selector and search box

use crate::model::TableView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SEARCH_LABEL: &str = "Search: ";
const SEARCH_PLACEHOLDER: &str = "type to search...";
const SEARCH_BOX_WIDTH: u16 = 32;

/// Clickable toolbar areas from the last draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolbarHits {
    pub page_size: Option<Rect>,
    pub search: Option<Rect>,
}

/// Label of the page size control, e.g. "[ 10 ▾ ]"
pub fn page_size_button(view: &TableView) -> String {
    format!("[ {} ▾ ]", view.rows_per_page)
}

/// Draw "Show [ 10 ▾ ] entries" on the left and the search box on the right
pub fn draw_toolbar(frame: &mut Frame, area: Rect, view: &TableView, search_mode: bool) -> ToolbarHits {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return ToolbarHits::default();
    }

    // Left: page size selector
    let button = page_size_button(view);
    let show = "Show ";
    let left = Line::from(vec![
        Span::raw(show),
        Span::styled(
            button.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" entries"),
    ]);
    frame.render_widget(Paragraph::new(left), inner);

    let button_x = inner.x + show.width() as u16;
    let page_size = (button_x < inner.right()).then(|| {
        Rect::new(
            button_x,
            inner.y,
            (button.width() as u16).min(inner.right() - button_x),
            1,
        )
    });

    // Right: search box, only when there is room next to the selector
    let left_width = (show.width() + button.width() + " entries".width()) as u16;
    let label_width = SEARCH_LABEL.width() as u16;
    let box_width = SEARCH_BOX_WIDTH.min(inner.width.saturating_sub(left_width + label_width + 2));
    if box_width < 8 {
        return ToolbarHits { page_size, search: None };
    }

    let box_x = inner.right() - box_width;
    let label_area = Rect::new(box_x - label_width, inner.y, label_width, 1);
    let box_area = Rect::new(box_x, inner.y, box_width, 1);

    frame.render_widget(Paragraph::new(SEARCH_LABEL), label_area);

    let box_style = if search_mode {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default().bg(Color::Black).fg(Color::White)
    };
    let content = if view.search_query.is_empty() && !search_mode {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).bg(Color::Black),
        ))
    } else {
        let cursor = if search_mode { "▏" } else { "" };
        Line::from(Span::raw(format!(
            "{}{}",
            tail_fitting(&view.search_query, box_width.saturating_sub(1) as usize),
            cursor
        )))
    };
    frame.render_widget(Paragraph::new(content).style(box_style), box_area);

    ToolbarHits {
        page_size,
        search: Some(box_area),
    }
}

/// The longest suffix of `text` that fits in `width` columns
fn tail_fitting(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut start = text.len();
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_fitting_keeps_end_of_query() {
        assert_eq!(tail_fitting("jane", 10), "jane");
        assert_eq!(tail_fitting("abcdefgh", 3), "fgh");
        assert_eq!(tail_fitting("", 0), "");
    }
}
