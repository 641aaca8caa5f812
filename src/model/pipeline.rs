//! Row derivation pipeline: filter → sort → paginate
//!
//! Every stage is a pure function over row indices into the full dataset,
//! so the rows themselves are never copied or mutated. [`DerivedRows`]
//! caches the filter and sort stages keyed by their inputs.

use super::column::Column;
use super::record::Record;
use super::state::{SortDirection, TableState};
use super::value::{locale_compare, CellValue};
use std::cmp::Ordering;

// ═══════════════════════════════════════════════════════════════════════════════
// Filter
// ═══════════════════════════════════════════════════════════════════════════════

/// Whether any column's displayed value contains `needle` (already lowercased)
fn row_matches<R: Record>(row: &R, columns: &[Column], needle: &str) -> bool {
    columns
        .iter()
        .any(|col| row.cell(&col.key).display().to_lowercase().contains(needle))
}

/// Indices of the rows matching `query` as a case-insensitive substring
///
/// An empty query keeps every row in its original order.
pub fn filter_rows<R: Record>(rows: &[R], columns: &[Column], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(*row, columns, &needle))
        .map(|(i, _)| i)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sort
// ═══════════════════════════════════════════════════════════════════════════════

/// Precomputed comparison key for one cell
enum SortValue {
    /// Milliseconds since the epoch; `None` for values that are not dates
    Time(Option<i64>),
    Text(String),
}

/// Compare two time keys; values that are not valid dates order last
fn compare_times(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_sort_values(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Time(a), SortValue::Time(b)) => compare_times(*a, *b),
        (SortValue::Text(a), SortValue::Text(b)) => locale_compare(a, b),
        // a column is keyed in one mode only
        (SortValue::Time(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Time(_)) => Ordering::Greater,
    }
}

/// Order `indices` by the column `sort_key` in `direction`
///
/// Without a sort key the indices pass through unchanged. When any cell of
/// the column is a date, the whole column compares by time: the other cells
/// go through a generic date parse and those that fail it sort after every
/// valid date (before them when descending). Otherwise cells compare by
/// their displayed value with locale-aware ordering. The sort is stable.
pub fn sort_rows<R: Record>(
    rows: &[R],
    indices: &[usize],
    sort_key: Option<&str>,
    direction: SortDirection,
) -> Vec<usize> {
    let Some(key) = sort_key else {
        return indices.to_vec();
    };

    let cells: Vec<(usize, std::borrow::Cow<'_, CellValue>)> =
        indices.iter().map(|&i| (i, rows[i].cell(key))).collect();

    let by_time = cells.iter().any(|(_, cell)| cell.is_date());
    if by_time {
        let invalid = cells
            .iter()
            .filter(|(_, cell)| cell.timestamp_millis().is_none())
            .count();
        if invalid > 0 {
            log::debug!(
                "sorting '{}' by date with {} value(s) that are not dates",
                key,
                invalid
            );
        }
    }

    let mut keyed: Vec<(usize, SortValue)> = cells
        .into_iter()
        .map(|(i, cell)| {
            let value = if by_time {
                SortValue::Time(cell.timestamp_millis())
            } else {
                SortValue::Text(cell.display())
            };
            (i, value)
        })
        .collect();

    // slice::sort_by is stable, so ties keep their filtered order
    keyed.sort_by(|(_, a), (_, b)| direction.apply(compare_sort_values(a, b)));
    keyed.into_iter().map(|(i, _)| i).collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Paginate
// ═══════════════════════════════════════════════════════════════════════════════

/// The window of `items` shown on the 1-based `current_page`
///
/// Out-of-range pages yield an empty slice rather than panicking.
pub fn paginate<T>(items: &[T], rows_per_page: usize, current_page: usize) -> &[T] {
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(rows_per_page)
        .min(items.len());
    let end = start.saturating_add(rows_per_page).min(items.len());
    &items[start..end]
}

// ═══════════════════════════════════════════════════════════════════════════════
// Memoized Derivation
// ═══════════════════════════════════════════════════════════════════════════════

/// Cached output of the filter and sort stages
///
/// The filter stage is keyed by (data revision, query) and the sort stage by
/// (filter generation, sort key, direction). Re-deriving with unchanged
/// inputs reuses the cached indices.
#[derive(Debug, Default)]
pub struct DerivedRows {
    filter_inputs: Option<(u64, String)>,
    filtered: Vec<usize>,
    filter_generation: u64,
    sort_inputs: Option<(u64, Option<String>, SortDirection)>,
    sorted: Vec<usize>,
}

impl DerivedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache up to date with the current inputs
    pub fn refresh<R: Record>(
        &mut self,
        revision: u64,
        rows: &[R],
        columns: &[Column],
        state: &TableState,
    ) {
        let filter_fresh = self
            .filter_inputs
            .as_ref()
            .is_some_and(|(rev, query)| *rev == revision && *query == state.search_query);
        if !filter_fresh {
            self.filtered = filter_rows(rows, columns, &state.search_query);
            self.filter_inputs = Some((revision, state.search_query.clone()));
            self.filter_generation = self.filter_generation.wrapping_add(1);
            log::debug!(
                "filter '{}' matched {} of {} rows",
                state.search_query,
                self.filtered.len(),
                rows.len()
            );
        }

        let sort_inputs = (
            self.filter_generation,
            state.sort_key.clone(),
            state.sort_direction,
        );
        if self.sort_inputs.as_ref() != Some(&sort_inputs) {
            self.sorted = sort_rows(
                rows,
                &self.filtered,
                state.sort_key.as_deref(),
                state.sort_direction,
            );
            self.sort_inputs = Some(sort_inputs);
        }
    }

    /// Indices surviving the filter, in data order
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Filtered indices in display order
    pub fn sorted(&self) -> &[usize] {
        &self.sorted
    }

    #[cfg(test)]
    pub fn filter_generation(&self) -> u64 {
        self.filter_generation
    }
}
