//! Readers that turn a tabular file into a [`Table`].
//!
//! Supported inputs, chosen by extension:
//! - `.csv`: header row followed by records; an empty cell is null
//! - `.json`: an array of objects, or a single object
//! - `.jsonl`: one object per non-blank line

use crate::catalog::{Catalog, Table};
use crate::error::CatalogLoadError;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, CatalogLoadError> {
    let path = path.as_ref();
    let unreadable = |reason: String| CatalogLoadError::Unreadable { path: path.to_path_buf(), reason };
    let file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
    let ext = path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
    let table = match ext.as_deref() {
        Some("csv") => read_csv(file),
        Some("json") => read_json(file),
        Some("jsonl") => read_jsonl(file),
        _ => Err("unsupported file extension (expected csv, json or jsonl)".to_string()),
    }
    .map_err(unreadable)?;
    tracing::debug!(path = %path.display(), columns = table.columns.len(), rows = table.rows.len(), "read table");
    Ok(table)
}

impl Catalog {
    /// Read a table from disk and load it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        Catalog::load(read_table(path)?)
    }
}

pub fn read_csv<R: Read>(reader: R) -> Result<Table, String> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().map_err(|e| e.to_string())?;
    let mut table = Table::new(headers.iter().map(str::to_string).collect());
    for record in rdr.records() {
        let record = record.map_err(|e| e.to_string())?;
        let row = (0..table.columns.len())
            .map(|i| record.get(i).filter(|v| !v.is_empty()).map(str::to_string))
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}

pub fn read_json<R: Read>(reader: R) -> Result<Table, String> {
    let json: Value = serde_json::from_reader(BufReader::new(reader)).map_err(|e| e.to_string())?;
    let objects = match json {
        Value::Array(arr) => arr.into_iter().map(into_object).collect::<Result<Vec<_>, _>>()?,
        obj @ Value::Object(_) => vec![into_object(obj)?],
        _ => return Err("expected a JSON array or object".to_string()),
    };
    Ok(objects_to_table(objects))
}

pub fn read_jsonl<R: Read>(reader: R) -> Result<Table, String> {
    let mut objects = Vec::new();
    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() { continue; }
        let value: Value = serde_json::from_str(&line).map_err(|e| format!("line {}: {e}", line_no + 1))?;
        objects.push(into_object(value)?);
    }
    Ok(objects_to_table(objects))
}

fn into_object(value: Value) -> Result<Map<String, Value>, String> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, found {other}")),
    }
}

fn objects_to_table(objects: Vec<Map<String, Value>>) -> Table {
    // Columns are the union of keys. Object keys iterate sorted, so within one object
    // columns are alphabetical; keys first seen in a later object are appended after.
    let mut columns: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !columns.contains(key) { columns.push(key.clone()); }
        }
    }
    let mut table = Table::new(columns);
    for mut obj in objects {
        let row = table.columns.iter().map(|c| obj.remove(c).and_then(cell_text)).collect();
        table.rows.push(row);
    }
    table
}

fn cell_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_empty_cells_are_null() {
        let data = "index,title,genres\n0,Avatar,Action Adventure\n1,Titanic,\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["index", "title", "genres"]);
        assert_eq!(table.rows[1], vec![Some("1".to_string()), Some("Titanic".to_string()), None]);
    }

    #[test]
    fn csv_handles_quoted_commas() {
        let data = "title,cast\n\"Heat\",\"Al Pacino, Robert De Niro\"\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0][1].as_deref(), Some("Al Pacino, Robert De Niro"));
    }

    #[test]
    fn json_array_unions_keys() {
        let data = r#"[{"title": "A", "genres": "Drama"}, {"title": "B", "year": 1999, "genres": null}]"#;
        let table = read_json(data.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["genres", "title", "year"]);
        assert_eq!(table.rows[0], vec![Some("Drama".to_string()), Some("A".to_string()), None]);
        assert_eq!(table.rows[1], vec![None, Some("B".to_string()), Some("1999".to_string())]);
    }

    #[test]
    fn jsonl_skips_blank_lines() {
        let data = "{\"title\": \"A\"}\n\n{\"title\": \"B\"}\n";
        let table = read_jsonl(data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn jsonl_reports_bad_line() {
        let err = read_jsonl("{\"title\": \"A\"}\nnot json\n".as_bytes()).unwrap_err();
        assert!(err.starts_with("line 2"));
    }
}
