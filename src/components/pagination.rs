//! Pagination footer: entry range on the left, page controls on the right

use crate::model::PageSummary;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PREVIOUS: &str = "[ Previous ]";
const NEXT: &str = "[ Next ]";

/// Clickable footer areas from the last draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationHits {
    pub previous: Option<Rect>,
    pub next: Option<Rect>,
}

fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw_pagination(frame: &mut Frame, area: Rect, summary: &PageSummary) -> PaginationHits {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return PaginationHits::default();
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            summary.entries_label(),
            Style::default().fg(Color::Yellow),
        ))),
        inner,
    );

    let page_label = format!("{}  ", summary.page_label());
    let controls_width = (page_label.width() + PREVIOUS.width() + 1 + NEXT.width()) as u16;
    if controls_width > inner.width {
        return PaginationHits::default();
    }

    let x = inner.right() - controls_width;
    let controls = Line::from(vec![
        Span::raw(page_label.clone()),
        Span::styled(PREVIOUS, button_style(summary.has_previous())),
        Span::raw(" "),
        Span::styled(NEXT, button_style(summary.has_next())),
    ]);
    frame.render_widget(
        Paragraph::new(controls),
        Rect::new(x, inner.y, controls_width, 1),
    );

    let previous_x = x + page_label.width() as u16;
    let next_x = previous_x + PREVIOUS.width() as u16 + 1;
    PaginationHits {
        previous: Some(Rect::new(previous_x, inner.y, PREVIOUS.width() as u16, 1)),
        next: Some(Rect::new(next_x, inner.y, NEXT.width() as u16, 1)),
    }
}
