//! Page size dialog component
//!
//! Lets the user pick how many rows each page shows.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::RowsPerPage;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Page size selector
pub struct PageSizeDialog {
    /// Highlighted option index into `RowsPerPage::ALL`
    pub selected_index: usize,
    /// List state for rendering
    pub list_state: ListState,
    /// Page size in effect when the dialog opened
    pub current: RowsPerPage,
}

impl Default for PageSizeDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSizeDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
            current: RowsPerPage::default(),
        }
    }

    /// Reset the highlight to the page size in effect
    pub fn open(&mut self, current: RowsPerPage) {
        self.current = current;
        self.selected_index = current.index();
        self.list_state.select(Some(self.selected_index));
    }

    pub fn selected(&self) -> RowsPerPage {
        RowsPerPage::ALL[self.selected_index.min(RowsPerPage::ALL.len() - 1)]
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < RowsPerPage::ALL.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for PageSizeDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetRowsPerPage(self.selected())),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_height = RowsPerPage::ALL.len() as u16 + 2 + 6;
        let popup_area = centered_popup(area, 36, popup_height);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Options
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(Span::styled(
            format!("Current: {} entries", self.current),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rows per Page ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = RowsPerPage::ALL
            .iter()
            .map(|size| {
                let is_current = *size == self.current;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!("{} entries", size),
                        if is_current {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut PageSizeDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_open_highlights_current_size() {
        let mut dialog = PageSizeDialog::new();
        dialog.open(RowsPerPage::Fifty);
        assert_eq!(dialog.selected(), RowsPerPage::Fifty);
        assert_eq!(dialog.list_state.selected(), Some(2));
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let mut dialog = PageSizeDialog::new();
        dialog.open(RowsPerPage::Ten);
        assert_eq!(press(&mut dialog, KeyCode::Char('k')), None);
        assert_eq!(dialog.selected(), RowsPerPage::Ten);

        for _ in 0..5 {
            press(&mut dialog, KeyCode::Char('j'));
        }
        assert_eq!(dialog.selected(), RowsPerPage::Hundred);
    }

    #[test]
    fn test_enter_selects_and_esc_closes() {
        let mut dialog = PageSizeDialog::new();
        dialog.open(RowsPerPage::Ten);
        press(&mut dialog, KeyCode::Down);
        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SetRowsPerPage(RowsPerPage::TwentyFive))
        );
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }
}
