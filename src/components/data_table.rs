//! Data table component
//!
//! Renders the toolbar (page size selector, search box), the header row with
//! sort indicators, the current page and the pagination footer. Owns the
//! `DataTable` and translates key presses and clicks into Actions.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{calculate_table_layout, hit};
use crate::components::pagination::{draw_pagination, PaginationHits};
use crate::components::toolbar::{draw_toolbar, ToolbarHits};
use crate::model::{DataTable, Dataset, HeaderCell, Record, Row, RowsPerPage, TableView};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column is allowed to grow
const MAX_COLUMN_WIDTH: usize = 40;
const SEPARATOR: &str = " │ ";

/// Compute display widths: the widest of header (plus indicator) and cells
pub fn column_widths<I>(headers: &[HeaderCell], rows: I) -> Vec<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| header.label.width() + if header.indicator.is_some() { 2 } else { 0 })
        .collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
    }
    widths
        .into_iter()
        .map(|w| w.clamp(1, MAX_COLUMN_WIDTH))
        .collect()
}

/// Pad or truncate `text` to exactly `width` columns
pub fn fit_cell(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Table component wrapping a `DataTable` of dynamic rows
pub struct DataTableComponent {
    table: DataTable<Row>,
    /// Whether typed characters go to the search box
    pub search_mode: bool,
    /// Header column selected for keyboard sorting
    focused_column: usize,
    /// Vertical scroll within the current page
    scroll: usize,
    header_hits: Vec<(Rect, String, bool)>,
    /// Column widths measured over all filtered rows, keyed by (revision, query)
    width_cache: Option<((u64, String), Vec<usize>)>,
    toolbar_hits: ToolbarHits,
    pagination_hits: PaginationHits,
}

impl DataTableComponent {
    pub fn new(dataset: Dataset, rows_per_page: RowsPerPage) -> Self {
        let mut table = DataTable::new(dataset.rows, dataset.columns);
        table.set_rows_per_page(rows_per_page);
        Self {
            table,
            search_mode: false,
            focused_column: 0,
            scroll: 0,
            header_hits: Vec::new(),
            width_cache: None,
            toolbar_hits: ToolbarHits::default(),
            pagination_hits: PaginationHits::default(),
        }
    }

    /// Swap in freshly loaded data, keeping query, sort and page size
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.table.set_columns(dataset.columns);
        self.table.set_data(dataset.rows);
        let count = self.table.columns().len();
        if self.focused_column >= count {
            self.focused_column = count.saturating_sub(1);
        }
        self.scroll = 0;
    }

    pub fn table(&self) -> &DataTable<Row> {
        &self.table
    }

    pub fn rows_per_page(&self) -> RowsPerPage {
        self.table.state().rows_per_page
    }

    fn focused_key(&self) -> Option<&str> {
        self.table
            .columns()
            .get(self.focused_column)
            .map(|c| c.key.as_str())
    }

    fn handle_search_key_event(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearSearch)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SearchInput(c))
            }
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Widths over every filtered row, so paging and sorting keep the grid still
    fn measured_widths(&mut self, headers: &[HeaderCell]) -> Vec<usize> {
        let key = (self.table.revision(), self.table.state().search_query.clone());
        if let Some((cached_key, widths)) = &self.width_cache {
            if *cached_key == key {
                return widths.clone();
            }
        }

        let columns = self.table.columns().to_vec();
        let widths = column_widths(
            headers,
            self.table
                .filtered_rows()
                .into_iter()
                .map(|row| columns.iter().map(|col| row.cell(&col.key).display()).collect()),
        );
        self.width_cache = Some((key, widths.clone()));
        widths
    }

    fn header_line(&self, headers: &[HeaderCell], widths: &[usize]) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (header, &width)) in headers.iter().zip(widths).enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
            }

            let mut label_style = if header.sortable {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            if i == self.focused_column {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }

            match header.indicator {
                Some(indicator) => {
                    let label_width = width.saturating_sub(2);
                    spans.push(Span::styled(fit_cell(&header.label, label_width), label_style));
                    spans.push(Span::raw(" "));
                    let symbol_style = if indicator.active {
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    spans.push(Span::styled(indicator.symbol(), symbol_style));
                }
                None => spans.push(Span::styled(fit_cell(&header.label, width), label_style)),
            }
        }
        Line::from(spans)
    }

    fn row_lines(rows: &[Vec<String>], widths: &[usize]) -> Vec<Line<'static>> {
        rows.iter()
            .map(|row| {
                let mut spans = Vec::new();
                for (i, &width) in widths.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
                    }
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    spans.push(Span::styled(fit_cell(cell, width), Style::default().fg(Color::White)));
                }
                Line::from(spans)
            })
            .collect()
    }

    /// Header cell areas, clipped to `inner`
    fn header_rects(inner: Rect, headers: &[HeaderCell], widths: &[usize]) -> Vec<(Rect, String, bool)> {
        let mut hits = Vec::new();
        let mut x = inner.x as usize;
        for (header, &width) in headers.iter().zip(widths) {
            let right = inner.right() as usize;
            if x >= right {
                break;
            }
            let visible = width.min(right - x) as u16;
            hits.push((
                Rect::new(x as u16, inner.y, visible, 1),
                header.key.clone(),
                header.sortable,
            ));
            x += width + SEPARATOR.width();
        }
        hits
    }

    fn draw_grid(&mut self, frame: &mut Frame, area: Rect, view: &TableView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.header_hits.clear();
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let widths = self.measured_widths(&view.headers);
        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");

        let header_area = Rect::new(inner.x, inner.y, inner.width, inner.height.min(2));
        frame.render_widget(
            Paragraph::new(vec![
                self.header_line(&view.headers, &widths),
                Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
            ]),
            header_area,
        );
        self.header_hits = Self::header_rects(inner, &view.headers, &widths);

        if inner.height <= 2 {
            return;
        }
        let body = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);

        let lines = if view.rows.is_empty() {
            vec![Line::from(Span::styled(
                "No matching records found",
                Style::default().fg(Color::Yellow),
            ))]
        } else {
            Self::row_lines(&view.rows, &widths)
        };

        let total = lines.len();
        let visible_height = body.height as usize;
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }

        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll as u16, 0)),
            body,
        );

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

impl Component for DataTableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return Ok(self.handle_search_key_event(key));
        }

        let action = match key.code {
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Esc if !self.table.state().search_query.is_empty() => Some(Action::ClearSearch),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::FocusPrevColumn),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::FocusNextColumn),
            KeyCode::Enter | KeyCode::Char('s') => {
                self.focused_key().map(|k| Action::SortBy(k.to_string()))
            }
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::PageDown | KeyCode::Char('n') => Some(Action::NextPage),
            KeyCode::PageUp | KeyCode::Char('p') => Some(Action::PrevPage),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::FirstPage),
            KeyCode::End | KeyCode::Char('G') => Some(Action::LastPage),
            KeyCode::Char('r') => Some(Action::OpenPageSizeSelector),
            KeyCode::Char('R') => Some(Action::Reload),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let (column, row) = (mouse.column, mouse.row);
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((_, key, sortable)) =
                    self.header_hits.iter().find(|(rect, _, _)| hit(*rect, column, row))
                {
                    // non-sortable headers swallow the click
                    sortable.then(|| Action::SortBy(key.clone()))
                } else if self.pagination_hits.previous.is_some_and(|r| hit(r, column, row)) {
                    Some(Action::PrevPage)
                } else if self.pagination_hits.next.is_some_and(|r| hit(r, column, row)) {
                    Some(Action::NextPage)
                } else if self.toolbar_hits.page_size.is_some_and(|r| hit(r, column, row)) {
                    Some(Action::OpenPageSizeSelector)
                } else if self.toolbar_hits.search.is_some_and(|r| hit(r, column, row)) {
                    Some(Action::EnterSearchMode)
                } else {
                    None
                }
            }
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let page_before = self.table.state().current_page;

        match action {
            Action::EnterSearchMode => self.search_mode = true,
            Action::ExitSearchMode => self.search_mode = false,
            Action::SearchInput(c) => {
                let mut query = self.table.state().search_query.clone();
                query.push(c);
                self.table.set_search_query(query);
                self.scroll = 0;
            }
            Action::SearchBackspace => {
                let mut query = self.table.state().search_query.clone();
                query.pop();
                self.table.set_search_query(query);
                self.scroll = 0;
            }
            Action::ClearSearch => {
                self.table.set_search_query(String::new());
                self.scroll = 0;
            }
            Action::FocusNextColumn => {
                let count = self.table.columns().len();
                if count > 0 {
                    self.focused_column = (self.focused_column + 1) % count;
                }
            }
            Action::FocusPrevColumn => {
                let count = self.table.columns().len();
                if count > 0 {
                    self.focused_column = (self.focused_column + count - 1) % count;
                }
            }
            Action::SortBy(key) => {
                if self.table.sort_by(&key) {
                    if let Some(idx) = self.table.columns().iter().position(|c| c.key == key) {
                        self.focused_column = idx;
                    }
                    self.scroll = 0;
                }
            }
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::NextPage => {
                self.table.next_page();
            }
            Action::PrevPage => {
                self.table.previous_page();
            }
            Action::FirstPage => {
                self.table.first_page();
            }
            Action::LastPage => {
                self.table.last_page();
            }
            Action::SetRowsPerPage(size) => {
                self.table.set_rows_per_page(size);
                self.scroll = 0;
            }
            _ => {}
        }

        if self.table.state().current_page != page_before {
            self.scroll = 0;
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let view = self.table.view();
        let layout = calculate_table_layout(area);

        self.toolbar_hits = draw_toolbar(frame, layout.toolbar, &view, self.search_mode);
        self.draw_grid(frame, layout.table, &view);
        self.pagination_hits = draw_pagination(frame, layout.footer, &view.summary);

        Ok(())
    }
}
