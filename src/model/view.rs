//! Renderer-independent view of a table
//!
//! A `TableView` is what ends up on screen: header cells with their sort
//! indicators, the displayed values of the current page, and the pagination
//! footer figures. Building it twice from the same inputs yields equal values.

use super::state::{RowsPerPage, SortDirection};

/// Sort indicator shown on a sortable header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortIndicator {
    pub direction: SortDirection,
    /// Whether this column is the active sort column
    pub active: bool,
}

impl SortIndicator {
    pub fn symbol(&self) -> &'static str {
        self.direction.indicator()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub indicator: Option<SortIndicator>,
}

/// Figures behind the pagination footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// 1-based index of the first entry shown, 0 when nothing is shown
    pub first_entry: usize,
    /// 1-based index of the last entry shown, 0 when nothing is shown
    pub last_entry: usize,
    pub filtered_entries: usize,
    pub total_entries: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl PageSummary {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// "Showing 1 to 4 of 4 entries"
    pub fn entries_label(&self) -> String {
        let mut label = format!(
            "Showing {} to {} of {} entries",
            self.first_entry, self.last_entry, self.filtered_entries
        );
        if self.filtered_entries < self.total_entries {
            label.push_str(&format!(
                " (filtered from {} total entries)",
                self.total_entries
            ));
        }
        label
    }

    /// "Page 1 of 1"
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub search_query: String,
    pub rows_per_page: RowsPerPage,
    pub headers: Vec<HeaderCell>,
    /// Displayed values of the current page, one inner vec per row
    pub rows: Vec<Vec<String>>,
    pub summary: PageSummary,
}

#[cfg(test)]
mod tests {
    use crate::model::dataset::Dataset;
    use crate::model::record::Row;
    use crate::model::state::{RowsPerPage, SortDirection};
    use crate::model::table::DataTable;

    fn demo_table() -> DataTable<Row> {
        let demo = Dataset::demo();
        DataTable::new(demo.rows, demo.columns)
    }

    #[test]
    fn test_footer_for_demo_data() {
        let mut table = demo_table();
        let view = table.view();
        assert_eq!(view.summary.entries_label(), "Showing 1 to 4 of 4 entries");
        assert_eq!(view.summary.page_label(), "Page 1 of 1");
        assert!(!view.summary.has_previous());
        assert!(!view.summary.has_next());
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn test_rows_are_displayed_values() {
        let mut table = demo_table();
        let view = table.view();
        assert_eq!(
            view.rows[0],
            vec!["1", "John Doe", "30", "john@doe", "1/1/1993"]
        );
    }

    #[test]
    fn test_footer_when_filtered() {
        let mut table = demo_table();
        table.set_search_query("jane");
        let view = table.view();
        assert_eq!(
            view.summary.entries_label(),
            "Showing 1 to 1 of 1 entries (filtered from 4 total entries)"
        );
        assert_eq!(view.rows, vec![vec!["2", "Jane Smith", "25", "jane@smith", "2/2/1998"]]);
    }

    #[test]
    fn test_footer_when_nothing_matches() {
        let mut table = demo_table();
        table.set_search_query("nobody");
        let view = table.view();
        assert_eq!(
            view.summary.entries_label(),
            "Showing 0 to 0 of 0 entries (filtered from 4 total entries)"
        );
        assert_eq!(view.summary.page_label(), "Page 1 of 1");
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_footer_on_later_page() {
        let rows: Vec<Row> = (1..=27).map(|i| Row::new().with("id", i as i64)).collect();
        let mut table = DataTable::new(rows, vec![crate::model::column::Column::new("id", "ID")]);
        table.set_rows_per_page(RowsPerPage::TwentyFive);
        table.go_to_page(2);
        let view = table.view();
        assert_eq!(view.summary.entries_label(), "Showing 26 to 27 of 27 entries");
        assert_eq!(view.summary.page_label(), "Page 2 of 2");
        assert!(view.summary.has_previous());
        assert!(!view.summary.has_next());
    }

    #[test]
    fn test_header_indicators() {
        let mut table = demo_table();
        table.sort_by("age");
        table.sort_by("age");
        let view = table.view();

        let age = view.headers.iter().find(|h| h.key == "age").unwrap();
        let indicator = age.indicator.unwrap();
        assert!(indicator.active);
        assert_eq!(indicator.direction, SortDirection::Descending);
        assert_eq!(indicator.symbol(), "▼");

        let name = view.headers.iter().find(|h| h.key == "name").unwrap();
        assert!(!name.indicator.unwrap().active);

        let email = view.headers.iter().find(|h| h.key == "email").unwrap();
        assert!(email.indicator.is_none());
    }

    #[test]
    fn test_view_is_idempotent() {
        let mut table = demo_table();
        table.sort_by("birthdate");
        table.set_search_query("o");
        assert_eq!(table.view(), table.view());
    }
}
