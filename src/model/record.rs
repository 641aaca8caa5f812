//! Record abstraction over row shapes
//!
//! The table is generic over anything that can hand out a cell by column
//! key. Dynamic rows loaded from files use [`Row`]; typed structs can
//! implement [`Record`] directly and build their cells on demand.

use super::value::CellValue;
use std::borrow::Cow;
use std::collections::HashMap;

/// A displayable record, one table line
pub trait Record {
    /// The value stored under `key`, or `CellValue::Empty` when absent
    fn cell(&self, key: &str) -> Cow<'_, CellValue>;
}

/// A dynamically shaped row keyed by column key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }
}

impl Record for Row {
    fn cell(&self, key: &str) -> Cow<'_, CellValue> {
        match self.cells.get(key) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(CellValue::Empty),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Employee {
        name: &'static str,
        age: u32,
    }

    impl Record for Employee {
        fn cell(&self, key: &str) -> Cow<'_, CellValue> {
            Cow::Owned(match key {
                "name" => CellValue::text(self.name),
                "age" => CellValue::Number(f64::from(self.age)),
                _ => CellValue::Empty,
            })
        }
    }

    #[test]
    fn test_row_lends_cells() {
        let row = Row::new().with("name", "Jane Smith").with("age", 25i64);
        assert_eq!(row.get("name"), Some(&CellValue::text("Jane Smith")));
        assert!(matches!(row.cell("name"), Cow::Borrowed(_)));
        assert_eq!(row.cell("age").display(), "25");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let row = Row::new().with("name", "Jane Smith");
        assert_eq!(*row.cell("email"), CellValue::Empty);
        assert_eq!(row.cell("email").display(), "");
    }

    #[test]
    fn test_typed_record() {
        let employee = Employee { name: "Bob Brown", age: 35 };
        assert_eq!(employee.cell("name").display(), "Bob Brown");
        assert_eq!(employee.cell("age").display(), "35");
        assert_eq!(*employee.cell("salary"), CellValue::Empty);
    }

    #[test]
    fn test_from_iterator() {
        let row: Row = vec![("id", CellValue::Number(1.0))].into_iter().collect();
        assert_eq!(row.get("id"), Some(&CellValue::Number(1.0)));
    }
}
