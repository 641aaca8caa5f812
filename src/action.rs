//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::RowsPerPage;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick with no input
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the page size selector
    OpenPageSizeSelector,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode, keeping the query
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,
    /// Empty the search query
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────
    /// Move header focus right
    FocusNextColumn,
    /// Move header focus left
    FocusPrevColumn,
    /// Sort by the column with this key (header click)
    SortBy(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the page body up one line
    ScrollUp,
    /// Scroll the page body down one line
    ScrollDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Change the page size
    SetRowsPerPage(RowsPerPage),

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Re-read the data file from disk
    Reload,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenPageSizeSelector => write!(f, "OpenPageSizeSelector"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::FocusNextColumn => write!(f, "FocusNextColumn"),
            Action::FocusPrevColumn => write!(f, "FocusPrevColumn"),
            Action::SortBy(key) => write!(f, "SortBy({})", key),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::SetRowsPerPage(size) => write!(f, "SetRowsPerPage({})", size),
            Action::Reload => write!(f, "Reload"),
        }
    }
}
