//! Dataset loading from JSON, YAML and CSV files
//!
//! JSON and YAML documents are either `{ "columns": [...], "rows": [...] }`
//! or a bare array of row objects. Without a column schema, columns are
//! inferred from the first row and made sortable. CSV headers name the
//! columns. Cell types are resolved here, once per load.

use crate::model::{CellValue, Column, Dataset, Row};
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Supported dataset file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Csv,
}

impl DataFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            "csv" => Some(DataFormat::Csv),
            _ => None,
        }
    }
}

/// Document with an explicit column schema
#[derive(Debug, Deserialize)]
struct TableDocument {
    #[serde(default)]
    columns: Vec<Column>,
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Table(TableDocument),
    Rows(Vec<serde_json::Map<String, serde_json::Value>>),
}

/// Load a dataset, picking the parser from the file extension
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path).ok_or_else(|| {
        anyhow!(
            "Unsupported data file '{}': expected .json, .yaml, .yml or .csv",
            path.display()
        )
    })?;

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let dataset = match format {
        DataFormat::Json => parse_json(&contents),
        DataFormat::Yaml => parse_yaml(&contents),
        DataFormat::Csv => parse_csv(&contents),
    }
    .with_context(|| format!("Failed to parse data file {}", path.display()))?;

    log::info!(
        "loaded {} rows and {} columns from {}",
        dataset.rows.len(),
        dataset.columns.len(),
        path.display()
    );
    if !dataset.rows.is_empty() {
        for key in dataset.unknown_columns() {
            log::warn!("column '{}' does not appear in any row", key);
        }
    }

    Ok(dataset)
}

pub fn parse_json(contents: &str) -> Result<Dataset> {
    let shape: DocumentShape =
        serde_json::from_str(contents).context("Invalid JSON table document")?;
    from_document(shape)
}

pub fn parse_yaml(contents: &str) -> Result<Dataset> {
    // Go through serde_json::Value so YAML and JSON share one row model
    let value: serde_json::Value =
        serde_yaml::from_str(contents).context("Invalid YAML table document")?;
    let shape: DocumentShape =
        serde_json::from_value(value).context("Unexpected YAML table layout")?;
    from_document(shape)
}

pub fn parse_csv(contents: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV file has no header row");
    }

    let columns = headers
        .iter()
        .map(|h| Column::new(h.clone(), h.clone()).sortable())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", line + 1))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, raw)| (key.clone(), CellValue::infer(raw)))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::new(columns, rows))
}

fn from_document(shape: DocumentShape) -> Result<Dataset> {
    let (mut columns, objects) = match shape {
        DocumentShape::Table(doc) => (doc.columns, doc.rows),
        DocumentShape::Rows(rows) => (Vec::new(), rows),
    };

    if columns.is_empty() {
        columns = infer_columns(objects.first());
    }

    if let Some(col) = columns.iter().find(|c| c.key.is_empty()) {
        bail!("Column with label '{}' has an empty key", col.label);
    }

    let rows = objects
        .iter()
        .map(|object| {
            object
                .iter()
                .map(|(key, value)| (key.clone(), CellValue::from_json(value)))
                .collect::<Row>()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn infer_columns(first: Option<&serde_json::Map<String, serde_json::Value>>) -> Vec<Column> {
    first
        .map(|object| {
            object
                .keys()
                .map(|key| Column::new(key.clone(), key.clone()).sortable())
                .collect()
        })
        .unwrap_or_default()
}
