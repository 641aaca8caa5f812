//! Interaction state - search text, sort, page size, current page
//!
//! The state is created with defaults when the table is mounted and is only
//! mutated through the handlers below. Handlers never fail; a request that
//! cannot be honoured leaves the state untouched and returns `false`.

use super::column::Column;
use std::cmp::Ordering;
use std::fmt;

/// Sort direction of the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowsPerPage {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl RowsPerPage {
    pub const ALL: [RowsPerPage; 4] = [
        RowsPerPage::Ten,
        RowsPerPage::TwentyFive,
        RowsPerPage::Fifty,
        RowsPerPage::Hundred,
    ];

    pub fn value(self) -> usize {
        match self {
            RowsPerPage::Ten => 10,
            RowsPerPage::TwentyFive => 25,
            RowsPerPage::Fifty => 50,
            RowsPerPage::Hundred => 100,
        }
    }

    /// Map a numeric page size onto the allowed set
    pub fn from_value(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.value() == n)
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|size| *size == self).unwrap_or(0)
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Number of pages needed for `row_count` rows; never less than one
pub fn total_pages(row_count: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    row_count.div_ceil(rows_per_page).max(1)
}

/// Interaction state owned by a single table instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub search_query: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    pub rows_per_page: RowsPerPage,
    /// 1-based
    pub current_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new()
    }
}

impl TableState {
    pub fn new() -> Self {
        Self {
            search_query: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            rows_per_page: RowsPerPage::Ten,
            current_page: 1,
        }
    }

    /// Sort by `column`, flipping the direction when it is already active
    ///
    /// Non-sortable columns are ignored.
    pub fn sort_by(&mut self, column: &Column) -> bool {
        if !column.sortable {
            return false;
        }
        if self.sort_key.as_deref() == Some(column.key.as_str()) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = Some(column.key.clone());
            self.sort_direction = SortDirection::Ascending;
        }
        true
    }

    /// Jump to `page` if it lies within `[1, total_pages]`
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        self.rows_per_page = rows_per_page;
        self.current_page = 1;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.current_page = 1;
    }

    /// Pull `current_page` back into `[1, total_pages]`
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}
