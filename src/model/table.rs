//! DataTable - data, columns and interaction state of one table instance
//!
//! All state changes go through the handler methods, which keep
//! `current_page` inside `[1, total_pages]`. Page count and the footer
//! figures are computed from the filtered row count.

use super::column::Column;
use super::pipeline::{paginate, DerivedRows};
use super::record::Record;
use super::state::{total_pages, RowsPerPage, TableState};
use super::view::{HeaderCell, PageSummary, SortIndicator, TableView};

/// A searchable, sortable, paginated table over records of type `R`
#[derive(Debug)]
pub struct DataTable<R: Record> {
    rows: Vec<R>,
    columns: Vec<Column>,
    /// Bumped whenever rows or columns are replaced
    revision: u64,
    state: TableState,
    derived: DerivedRows,
}

impl<R: Record> DataTable<R> {
    pub fn new(rows: Vec<R>, columns: Vec<Column>) -> Self {
        Self {
            rows,
            columns,
            revision: 0,
            state: TableState::new(),
            derived: DerivedRows::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inputs
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Changes whenever rows or columns are replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the rows, keeping the interaction state
    pub fn set_data(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.bump_revision();
    }

    /// Replace the column schema, keeping the interaction state
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let pages = self.total_pages();
        self.state.clamp_page(pages);
    }

    fn refresh(&mut self) {
        self.derived
            .refresh(self.revision, &self.rows, &self.columns, &self.state);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived Values
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of rows matching the current search
    pub fn filtered_count(&mut self) -> usize {
        self.refresh();
        self.derived.filtered().len()
    }

    pub fn total_pages(&mut self) -> usize {
        let count = self.filtered_count();
        total_pages(count, self.state.rows_per_page.value())
    }

    /// Every record matching the current search, in data order
    pub fn filtered_rows(&mut self) -> Vec<&R> {
        self.refresh();
        self.derived.filtered().iter().map(|&i| &self.rows[i]).collect()
    }

    /// The records on the current page, in display order
    pub fn page_rows(&mut self) -> Vec<&R> {
        self.refresh();
        paginate(
            self.derived.sorted(),
            self.state.rows_per_page.value(),
            self.state.current_page,
        )
        .iter()
        .map(|&i| &self.rows[i])
        .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort by the column with `key`; unknown and non-sortable keys are ignored
    pub fn sort_by(&mut self, key: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            log::debug!("sort ignored: no column '{}'", key);
            return false;
        };
        let changed = self.state.sort_by(column);
        if changed {
            log::debug!(
                "sort by '{}' {:?}",
                key,
                self.state.sort_direction
            );
        } else {
            log::debug!("sort ignored: column '{}' is not sortable", key);
        }
        changed
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let pages = self.total_pages();
        let changed = self.state.go_to_page(page, pages);
        if !changed {
            log::debug!("page {} ignored: {} page(s) available", page, pages);
        }
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        let last = self.total_pages();
        self.go_to_page(last)
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        log::debug!("rows per page set to {}", rows_per_page);
        self.state.set_rows_per_page(rows_per_page);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.set_search_query(query);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────────────────────

    /// Everything a renderer needs to draw the current state
    pub fn view(&mut self) -> TableView {
        let filtered = self.filtered_count();
        let total_entries = self.rows.len();
        let pages = self.total_pages();
        let rows_per_page = self.state.rows_per_page.value();
        let current_page = self.state.current_page;

        let headers = self
            .columns
            .iter()
            .map(|col| HeaderCell {
                key: col.key.clone(),
                label: col.header_label().to_string(),
                sortable: col.sortable,
                indicator: col.sortable.then(|| SortIndicator {
                    direction: self.state.sort_direction,
                    active: self.state.sort_key.as_deref() == Some(col.key.as_str()),
                }),
            })
            .collect();

        let columns = self.columns.clone();
        let rows = self
            .page_rows()
            .into_iter()
            .map(|row| columns.iter().map(|col| row.cell(&col.key).display()).collect())
            .collect::<Vec<Vec<String>>>();

        let (first_entry, last_entry) = if rows.is_empty() {
            (0, 0)
        } else {
            let first = (current_page - 1) * rows_per_page + 1;
            (first, first + rows.len() - 1)
        };

        TableView {
            search_query: self.state.search_query.clone(),
            rows_per_page: self.state.rows_per_page,
            headers,
            rows,
            summary: PageSummary {
                first_entry,
                last_entry,
                filtered_entries: filtered,
                total_entries,
                current_page,
                total_pages: pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::Dataset;
    use crate::model::record::Row;
    use crate::model::state::SortDirection;
    use crate::model::value::CellValue;

    fn demo_table() -> DataTable<Row> {
        let demo = Dataset::demo();
        DataTable::new(demo.rows, demo.columns)
    }

    fn numbered_rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row::new().with("id", i as i64).with("name", format!("row {}", i)))
            .collect()
    }

    fn numbered_table(n: usize) -> DataTable<Row> {
        DataTable::new(
            numbered_rows(n),
            vec![Column::new("id", "ID").sortable(), Column::new("name", "Name")],
        )
    }

    fn page_names(table: &mut DataTable<Row>) -> Vec<String> {
        table
            .page_rows()
            .iter()
            .map(|row| row.cell("name").display())
            .collect()
    }

    #[test]
    fn test_four_rows_fit_one_page() {
        let mut table = demo_table();
        assert_eq!(table.total_pages(), 1);
        assert_eq!(table.page_rows().len(), 4);
    }

    #[test]
    fn test_search_jane() {
        let mut table = demo_table();
        table.set_search_query("jane");
        assert_eq!(page_names(&mut table), vec!["Jane Smith"]);
    }

    #[test]
    fn test_clicking_age_twice() {
        let mut table = demo_table();
        let ages = |table: &mut DataTable<Row>| -> Vec<String> {
            table.page_rows().iter().map(|r| r.cell("age").display()).collect()
        };

        assert!(table.sort_by("age"));
        assert_eq!(ages(&mut table), vec!["25", "28", "30", "35"]);

        assert!(table.sort_by("age"));
        assert_eq!(table.state().sort_direction, SortDirection::Descending);
        assert_eq!(ages(&mut table), vec!["35", "30", "28", "25"]);
    }

    #[test]
    fn test_unsortable_and_unknown_headers_are_noops() {
        let mut table = demo_table();
        let before = table.state().clone();
        assert!(!table.sort_by("email"));
        assert!(!table.sort_by("salary"));
        assert_eq!(table.state(), &before);
    }

    #[test]
    fn test_rows_per_page_25_with_four_rows() {
        let mut table = demo_table();
        table.set_rows_per_page(RowsPerPage::TwentyFive);
        assert_eq!(table.state().current_page, 1);
        assert_eq!(table.total_pages(), 1);
        assert_eq!(table.page_rows().len(), 4);
    }

    #[test]
    fn test_go_to_page_stays_in_bounds() {
        let mut table = numbered_table(23);
        assert_eq!(table.total_pages(), 3);
        for page in [0, 4, 100] {
            assert!(!table.go_to_page(page));
            assert_eq!(table.state().current_page, 1);
        }
        assert!(table.go_to_page(3));
        assert_eq!(page_names(&mut table), vec!["row 21", "row 22", "row 23"]);
        assert!(!table.next_page());
        assert_eq!(table.state().current_page, 3);
    }

    #[test]
    fn test_page_navigation() {
        let mut table = numbered_table(30);
        assert!(!table.previous_page());
        assert!(table.next_page());
        assert_eq!(table.state().current_page, 2);
        assert!(table.last_page());
        assert_eq!(table.state().current_page, 3);
        assert!(table.first_page());
        assert_eq!(table.state().current_page, 1);
    }

    #[test]
    fn test_search_resets_page_and_shrinks_page_count() {
        let mut table = numbered_table(30);
        table.go_to_page(3);
        table.set_search_query("row 1");
        assert_eq!(table.state().current_page, 1);
        // row 1, row 10..row 19
        assert_eq!(table.filtered_count(), 11);
        assert_eq!(table.total_pages(), 2);
    }

    #[test]
    fn test_empty_table_has_one_page() {
        let mut table: DataTable<Row> = DataTable::new(Vec::new(), vec![Column::new("id", "ID")]);
        assert_eq!(table.total_pages(), 1);
        assert!(table.page_rows().is_empty());
        assert!(!table.go_to_page(2));
        assert!(table.go_to_page(1));
    }

    #[test]
    fn test_filtered_rows_span_every_page() {
        let mut table = numbered_table(25);
        table.set_search_query("row 2");
        // "row 2" and "row 20".."row 25"
        assert_eq!(table.filtered_rows().len(), 7);
        assert_eq!(table.page_rows().len(), 7);

        table.set_search_query("");
        assert_eq!(table.filtered_rows().len(), 25);
        assert_eq!(table.page_rows().len(), 10);
    }

    #[test]
    fn test_replacing_inputs_bumps_revision() {
        let mut table = numbered_table(3);
        let revision = table.revision();
        table.set_data(numbered_rows(4));
        assert_ne!(table.revision(), revision);
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.filtered_rows().len(), 4);
    }

    #[test]
    fn test_set_data_clamps_current_page() {
        let mut table = numbered_table(50);
        table.last_page();
        assert_eq!(table.state().current_page, 5);
        table.set_data(numbered_rows(12));
        assert_eq!(table.state().current_page, 2);
        assert_eq!(page_names(&mut table), vec!["row 11", "row 12"]);
    }

    #[test]
    fn test_set_columns_changes_search_scope() {
        let mut table = demo_table();
        table.set_search_query("@");
        assert_eq!(table.filtered_count(), 4);
        table.set_columns(vec![Column::new("name", "Name")]);
        assert_eq!(table.filtered_count(), 0);
    }

    #[test]
    fn test_typed_records() {
        use std::borrow::Cow;

        struct City {
            name: &'static str,
            population: u32,
        }

        impl Record for City {
            fn cell(&self, key: &str) -> Cow<'_, CellValue> {
                Cow::Owned(match key {
                    "name" => CellValue::text(self.name),
                    "population" => CellValue::Number(f64::from(self.population)),
                    _ => CellValue::Empty,
                })
            }
        }

        let mut table = DataTable::new(
            vec![
                City { name: "Lyon", population: 522 },
                City { name: "Brest", population: 139 },
                City { name: "Nice", population: 348 },
            ],
            vec![
                Column::new("name", "City").sortable(),
                Column::new("population", "Population (k)").sortable(),
            ],
        );
        table.sort_by("name");
        let names: Vec<&str> = table.page_rows().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Brest", "Lyon", "Nice"]);
    }

    #[test]
    fn test_current_page_invariant_under_random_handlers() {
        let mut table = numbered_table(57);
        let queries = ["", "1", "row 5", "zzz", "2"];
        for step in 0..200usize {
            match step % 5 {
                0 => {
                    table.go_to_page(step % 9);
                }
                1 => table.set_search_query(queries[step % queries.len()]),
                2 => table.set_rows_per_page(RowsPerPage::ALL[step % 4]),
                3 => {
                    table.next_page();
                }
                _ => {
                    table.sort_by("id");
                }
            }
            let pages = table.total_pages();
            let page = table.state().current_page;
            assert!(page >= 1 && page <= pages, "step {}: page {} of {}", step, page, pages);
        }
    }
}
