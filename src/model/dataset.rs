//! Dataset - a column schema plus the rows it describes

use super::column::Column;
use super::record::Row;
use super::value::CellValue;

/// Rows and columns handed to the table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Built-in sample shown when no data file is given
    pub fn demo() -> Self {
        let employee = |id: i64, name: &str, age: i64, email: &str, born: (i32, u32, u32)| {
            Row::new()
                .with("id", id)
                .with("name", name)
                .with("age", age)
                .with("email", email)
                .with("birthdate", CellValue::date(born.0, born.1, born.2))
        };

        Self {
            columns: vec![
                Column::new("id", "ID").sortable(),
                Column::new("name", "Name").sortable(),
                Column::new("age", "Age").sortable(),
                Column::new("email", "Email"),
                Column::new("birthdate", "Birthdate").sortable(),
            ],
            rows: vec![
                employee(1, "John Doe", 30, "john@doe", (1993, 1, 1)),
                employee(2, "Jane Smith", 25, "jane@smith", (1998, 2, 2)),
                employee(3, "Alice Johnson", 28, "alice@johnson", (1995, 3, 3)),
                employee(4, "Bob Brown", 35, "bob@brown", (1988, 4, 4)),
            ],
        }
    }

    /// Columns whose key no row carries; shown as blank cells
    pub fn unknown_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|col| self.rows.iter().all(|row| row.get(&col.key).is_none()))
            .map(|col| col.key.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Record;

    #[test]
    fn test_demo_dataset_shape() {
        let demo = Dataset::demo();
        assert_eq!(demo.rows.len(), 4);
        assert_eq!(demo.columns.len(), 5);
        assert!(!demo.columns[3].sortable);
        assert_eq!(demo.rows[1].cell("birthdate").display(), "2/2/1998");
        assert!(demo.unknown_columns().is_empty());
    }

    #[test]
    fn test_unknown_columns() {
        let mut demo = Dataset::demo();
        demo.columns.push(Column::new("salary", "Salary"));
        assert_eq!(demo.unknown_columns(), vec!["salary"]);
    }

    #[test]
    fn test_unknown_columns_on_empty_rows() {
        let dataset = Dataset::new(vec![Column::new("id", "ID")], Vec::new());
        // every key is unknown when there are no rows
        assert_eq!(dataset.unknown_columns(), vec!["id"]);
    }
}
