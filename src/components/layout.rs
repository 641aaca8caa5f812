//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub title: Rect,
    pub body: Rect,
    pub help: Rect,
}

/// Areas of the data table component
pub struct TableLayout {
    pub toolbar: Rect,
    pub table: Rect,
    pub footer: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout: title line, body, help bar
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        title: chunks[0],
        body: chunks[1],
        help: chunks[2],
    }
}

/// Split the body into toolbar, table and pagination footer
pub fn calculate_table_layout(area: Rect) -> TableLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    TableLayout {
        toolbar: chunks[0],
        table: chunks[1],
        footer: chunks[2],
    }
}

/// Whether the terminal cell at (`column`, `row`) falls inside `rect`
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup() {
        let popup = centered_popup(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let clipped = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(clipped, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_layouts_fill_area() {
        let main = calculate_main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(main.title.height, 1);
        assert_eq!(main.body, Rect::new(0, 1, 80, 22));
        assert_eq!(main.help.y, 23);

        let table = calculate_table_layout(main.body);
        assert_eq!(table.toolbar, Rect::new(0, 1, 80, 3));
        assert_eq!(table.table, Rect::new(0, 4, 80, 16));
        assert_eq!(table.footer, Rect::new(0, 20, 80, 3));
    }

    #[test]
    fn test_hit() {
        let rect = Rect::new(10, 5, 4, 2);
        assert!(hit(rect, 10, 5));
        assert!(hit(rect, 13, 6));
        assert!(!hit(rect, 14, 6));
        assert!(!hit(rect, 10, 7));
        assert!(!hit(rect, 9, 5));
    }
}
