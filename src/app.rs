//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates between the table and its dialogs; table semantics live in
//! `model::table`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, DataTableComponent, HelpDialog, PageSizeDialog, QuitDialog,
};
use crate::model::modal::{Modal, ModalStack};
use crate::model::{Dataset, RowsPerPage};
use crate::services;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Data file the rows came from; `None` for the built-in sample
    pub data_path: Option<PathBuf>,

    /// Result of the last reload, shown in the title line
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub table: DataTableComponent,
    pub quit_dialog: QuitDialog,
    pub page_size_dialog: PageSizeDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(dataset: Dataset, rows_per_page: RowsPerPage, data_path: Option<PathBuf>) -> App {
        App {
            should_quit: false,
            modals: ModalStack::new(),
            data_path,
            status_message: None,
            table: DataTableComponent::new(dataset, rows_per_page),
            quit_dialog: QuitDialog,
            page_size_dialog: PageSizeDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    fn source_label(&self) -> String {
        match &self.data_path {
            Some(path) => path.display().to_string(),
            None => "built-in sample".to_string(),
        }
    }

    /// Re-read the data file, keeping the current rows when that fails
    fn reload(&mut self) {
        let Some(path) = self.data_path.clone() else {
            self.status_message = Some("Built-in sample, nothing to reload".to_string());
            return;
        };

        match services::load_dataset(&path) {
            Ok(dataset) => {
                self.table.replace_dataset(dataset);
                let count = self.table.table().rows().len();
                log::info!("Reloaded {} rows from {}", count, path.display());
                self.status_message = Some(format!("Reloaded {} rows", count));
            }
            Err(err) => {
                log::warn!("Reload of {} failed: {:#}", path.display(), err);
                self.status_message = Some(format!("Reload failed: {}", err));
            }
        }
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.table.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        // dialogs are keyboard only
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            log::debug!("action: {}", action);
        }
        if !matches!(action, Action::Tick | Action::Resize(_, _)) {
            self.status_message = None;
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Reload => self.reload(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help);
            }
            Action::OpenPageSizeSelector => {
                self.page_size_dialog.open(self.table.rows_per_page());
                self.modals.push(Modal::PageSize);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::SetRowsPerPage(size) => {
                if self.modals.top() == Some(&Modal::PageSize) {
                    self.modals.pop();
                }
                self.table.update(Action::SetRowsPerPage(size))?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Table (search, sort, pagination, scrolling)
            // ─────────────────────────────────────────────────────────────────
            other => return self.table.update(other),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);

        let mut title = vec![
            Span::styled(
                " datatable-tui ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(self.source_label(), Style::default().fg(Color::DarkGray)),
        ];
        if let Some(message) = &self.status_message {
            title.push(Span::raw("  "));
            title.push(Span::styled(message.clone(), Style::default().fg(Color::Yellow)));
        }
        let title = Line::from(title);
        frame.render_widget(Paragraph::new(title), layout.title);

        self.table.draw(frame, layout.body)?;
        frame.render_widget(Paragraph::new(self.help_line()), layout.help);

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::PageSize => self.page_size_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::PageSize => self.page_size_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    fn help_line(&self) -> Line<'static> {
        let key_style = Style::default().fg(Color::Yellow);
        let pairs: &[(&str, &str)] = if self.table.search_mode {
            &[(" Enter/Esc ", "Done  "), (" Ctrl+u ", "Clear")]
        } else {
            &[
                (" / ", "Search  "),
                (" h/l ", "Column  "),
                (" s ", "Sort  "),
                (" n/p ", "Page  "),
                (" r ", "Rows  "),
                (" R ", "Reload  "),
                (" ? ", "Help  "),
                (" q ", "Quit"),
            ]
        };
        Line::from(
            pairs
                .iter()
                .flat_map(|(key, label)| {
                    [
                        Span::styled(key.to_string(), key_style),
                        Span::raw(label.to_string()),
                    ]
                })
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::io::Write;

    fn demo_app() -> App {
        App::new(Dataset::demo(), RowsPerPage::Ten, None)
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let mut action = app.handle_key_event(key).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    #[test]
    fn test_quit_flow() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_even_in_search() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.table.search_mode);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key_event(ctrl_c).unwrap(), Some(Action::ForceQuit));
    }

    #[test]
    fn test_search_keys_do_not_open_dialogs() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.modals.is_empty());
        assert_eq!(app.table.table().state().search_query, "q?");
    }

    #[test]
    fn test_page_size_selector_applies_choice() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.modals.top(), Some(&Modal::PageSize));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.table.rows_per_page(), RowsPerPage::Fifty);
    }

    #[test]
    fn test_help_toggles() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modals.top(), Some(&Modal::Help));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_draw_with_modal() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('q'));

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap()
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("datatable-tui"));
        assert!(screen.contains("built-in sample"));
        assert!(screen.contains("Close the table and quit?"));
    }

    #[test]
    fn test_reload_picks_up_file_changes() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,age\nJane Smith,25").unwrap();
        let dataset = services::load_dataset(file.path()).unwrap();
        let mut app = App::new(dataset, RowsPerPage::Ten, Some(file.path().to_path_buf()));
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Enter);

        writeln!(file, "Bob Brown,35").unwrap();
        press(&mut app, KeyCode::Char('R'));
        assert_eq!(app.status_message.as_deref(), Some("Reloaded 2 rows"));
        assert_eq!(app.table.table().rows().len(), 2);
        assert_eq!(app.table.table().state().search_query, "o");

        // any later action clears the message
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_reload_failure_keeps_rows() {
        let mut app = App::new(
            Dataset::demo(),
            RowsPerPage::Ten,
            Some(PathBuf::from("/nonexistent/people.csv")),
        );
        press(&mut app, KeyCode::Char('R'));
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Reload failed")));
        assert_eq!(app.table.table().rows().len(), 4);
    }

    #[test]
    fn test_reload_without_file() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('R'));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Built-in sample, nothing to reload")
        );
    }
}
