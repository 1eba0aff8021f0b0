// ==========================================
// Catering Execution Hub - spreadsheet parsing
// ==========================================
// Excel (.xlsx/.xls) via calamine, CSV via csv. Rows come back as
// ordered JSON objects keyed by the (trimmed) header row; empty cells
// are null so no column silently disappears.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::path::Path;

/// One parsed spreadsheet row: header -> cell value, in column order.
pub type RawRow = Map<String, Value>;

/// Dispatch on file extension.
pub fn parse_spreadsheet(path: &Path) -> ImportResult<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "xlsx" | "xls" => parse_excel(path),
        "csv" => parse_csv(path),
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}

// ==========================================
// Excel
// ==========================================
pub fn parse_excel(path: &Path) -> ImportResult<Vec<RawRow>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

    // first sheet only, like the source spreadsheets
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ImportError::ExcelParseError("sheet has no header row".to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut records = Vec::new();
    for data_row in rows {
        let mut row_map = Map::new();
        for (col_idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = data_row.get(col_idx).map(cell_to_value).unwrap_or(Value::Null);
            row_map.insert(header.clone(), value);
        }

        if row_is_blank(&row_map) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

/// Cell -> JSON value. Whole floats become integers so "80" round-trips
/// as 80, not 80.0 (rule conditions and sample values are compared as
/// strings downstream).
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                Value::Null
            } else {
                Value::String(s.clone())
            }
        }
        Data::Int(i) => Value::Number(Number::from(*i)),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Value::Number(Number::from(*f as i64))
            } else {
                Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::Error(_) => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ==========================================
// CSV
// ==========================================
pub fn parse_csv(path: &Path) -> ImportResult<Vec<RawRow>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate ragged rows
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row_map = Map::new();
        for (col_idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = match record.get(col_idx).map(str::trim) {
                None | Some("") => Value::Null,
                Some(cell) => Value::String(cell.to_string()),
            };
            row_map.insert(header.clone(), value);
        }

        if row_is_blank(&row_map) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

fn row_is_blank(row: &RawRow) -> bool {
    row.values().all(|v| v.is_null())
}
