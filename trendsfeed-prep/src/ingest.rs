//! Spreadsheet ingest
//!
//! Turns a worksheet (xlsx/xls/ods via calamine, or CSV) into article records:
//! 1. Trim column headers
//! 2. Forward-fill the keyword column (merged cells leave empty cells below)
//! 3. Drop rows whose required columns are all empty
//! 4. Project each row onto the configured output fields, missing cells as ""
//!
//! Only truly empty cells are filled or counted as missing. A whitespace-only
//! cell is kept verbatim; the ranking core trims keywords and drops the
//! article if nothing is left.
//!
//! A `.json` input is taken to be an existing article artifact and is read as-is.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use trendsfeed_common::artifacts::read_articles;
use trendsfeed_common::config::IngestConfig;
use trendsfeed_common::{ArticleRecord, Error, Result};

/// Header row plus data rows, all cells as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, trimming headers
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    /// Column index by header; first match wins on duplicates
    fn column_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::new();
        for (i, h) in self.headers.iter().enumerate() {
            index.entry(h.as_str()).or_insert(i);
        }
        index
    }
}

/// Supported input kinds, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Workbook,
    Csv,
    Json,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputKind::Workbook),
            "csv" => Ok(InputKind::Csv),
            "json" => Ok(InputKind::Json),
            other => Err(Error::InvalidInput(format!(
                "Unsupported input type '{}' for {} (expected xlsx, xls, ods, csv or json)",
                other,
                path.display()
            ))),
        }
    }
}

/// Render a spreadsheet cell as text
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        // Error cells carry no usable text
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn unavailable(path: &Path, reason: impl ToString) -> Error {
    Error::DataUnavailable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Read one worksheet (default: the first) of a workbook
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(unavailable(path, "file not found"));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::Spreadsheet(format!("Failed to open {}: {}", path.display(), e)))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Error::Spreadsheet(format!("{} has no worksheets", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Spreadsheet(format!("Worksheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(cell_text).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = rows.map(|r| r.iter().map(cell_text).collect()).collect();

    info!(
        "Read worksheet '{}' from {}: {} columns, {} rows",
        sheet_name,
        path.display(),
        headers.len(),
        rows.len()
    );
    Ok(Table::new(headers, rows))
}

/// Read a CSV file with a header row
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| unavailable(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Spreadsheet(format!("{}: {}", path.display(), e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Spreadsheet(format!("{}: {}", path.display(), e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(Table::new(headers, rows))
}

fn is_empty_cell(cell: Option<&String>) -> bool {
    cell.map(|c| c.is_empty()).unwrap_or(true)
}

/// Convert table rows into article records
///
/// Provisional ids are 1-based data row numbers; ranking replaces them.
pub fn table_to_records(table: &Table, config: &IngestConfig, keyword_field: &str) -> Vec<ArticleRecord> {
    let columns = table.column_index();

    let keyword_col = columns.get(keyword_field).copied();
    if keyword_col.is_none() {
        warn!("Keyword column '{}' not found; every keyword will be blank", keyword_field);
    }
    for mapping in &config.fields {
        if !columns.contains_key(mapping.source.as_str()) {
            warn!("Column '{}' not found; '{}' will be empty", mapping.source, mapping.output);
        }
    }

    let required: Vec<usize> = config
        .required_columns
        .iter()
        .filter_map(|c| columns.get(c.as_str()).copied())
        .collect();

    let mut records = Vec::new();
    let mut last_keyword = String::new();
    let mut dropped = 0usize;

    for (i, row) in table.rows.iter().enumerate() {
        // Forward-fill happens before blank rows are dropped
        let keyword = match keyword_col.and_then(|c| row.get(c)) {
            Some(kw) if !kw.is_empty() => {
                last_keyword = kw.clone();
                kw.clone()
            }
            _ => last_keyword.clone(),
        };

        if !required.is_empty() && required.iter().all(|&c| is_empty_cell(row.get(c))) {
            dropped += 1;
            continue;
        }

        let mut fields = Map::new();
        fields.insert(keyword_field.to_string(), Value::String(keyword));
        for mapping in &config.fields {
            let value = columns
                .get(mapping.source.as_str())
                .and_then(|&c| row.get(c))
                .cloned()
                .unwrap_or_default();
            fields.insert(mapping.output.clone(), Value::String(value));
        }

        records.push(ArticleRecord::new(i as u64 + 1, fields));
    }

    debug!("Dropped {} empty rows", dropped);
    records
}

/// Read article records from any supported input file
pub fn read_records(path: &Path, config: &IngestConfig, keyword_field: &str) -> Result<Vec<ArticleRecord>> {
    let table = match InputKind::from_path(path)? {
        InputKind::Json => {
            let records = read_articles(path)?;
            info!("Read {} article records from {}", records.len(), path.display());
            return Ok(records);
        }
        InputKind::Csv => read_csv(path)?,
        InputKind::Workbook => read_workbook(path, config.sheet.as_deref())?,
    };
    Ok(table_to_records(&table, config, keyword_field))
}
