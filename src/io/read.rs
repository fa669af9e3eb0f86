// src/io/read.rs

use crate::dataframe::dataframe::{DataFrame, Value};
use crate::errors::TableError;
use crate::io::ReadOptions;
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use regex::Regex;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::io::Read;

fn infer_data_type(field: &str) -> Option<Value> {
    if field.is_empty() {
        None
    } else if let Ok(int_val) = field.parse::<i64>() {
        Some(Value::Integer(int_val))
    } else if let Ok(float_val) = field.parse::<f64>() {
        Some(Value::Float(float_val))
    } else if let Ok(bool_val) = field.parse::<bool>() {
        Some(Value::Boolean(bool_val))
    } else if let Ok(dt) = DateTime::parse_from_rfc3339(field) {
        Some(Value::DateTime(dt.with_timezone(&Utc)))
    } else {
        Some(Value::String(field.to_string()))
    }
}

/// Builds a frame from header names and already-inferred rows. Rows must
/// all have one value per column.
fn assemble(columns: Vec<String>, rows: Vec<Vec<Option<Value>>>) -> Result<DataFrame, TableError> {
    let mut data: HashMap<String, Vec<Option<Value>>> = HashMap::new();
    for column in &columns {
        data.insert(column.clone(), Vec::with_capacity(rows.len()));
    }

    for row in rows {
        if row.len() != columns.len() {
            return Err(TableError::ReadParse(format!(
                "Row has {} fields, expected {}",
                row.len(),
                columns.len()
            )));
        }
        for (idx, value) in row.into_iter().enumerate() {
            if let Some(column_values) = data.get_mut(&columns[idx]) {
                column_values.push(value);
            }
        }
    }

    DataFrame::new(data, columns).map_err(|err| TableError::ReadParse(err.to_string()))
}

/// Reads delimiter-separated text with a header row into a frame.
/// The delimiter and source encoding come from the options.
pub fn read_csv(source: &mut dyn Read, options: &ReadOptions) -> Result<DataFrame, TableError> {
    let mut raw = Vec::new();
    source.read_to_end(&mut raw)?;

    // Decode the content to UTF-8 before handing it to the csv reader
    let (content, _, _) = options.encoding.decode(&raw);

    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(infer_data_type).collect());
    }

    assemble(columns, rows)
}

/// Reads a column-oriented JSON object, `{"col": [values, ...], ...}`,
/// keeping the columns in file order.
pub fn read_json(source: &mut dyn Read, _options: &ReadOptions) -> Result<DataFrame, TableError> {
    let json: Json = serde_json::from_reader(source)?;

    let object = match json {
        Json::Object(object) => object,
        _ => {
            return Err(TableError::ReadParse(
                "Expected a top-level JSON object of columns".to_string(),
            ))
        }
    };

    let mut columns = Vec::with_capacity(object.len());
    let mut data: HashMap<String, Vec<Option<Value>>> = HashMap::new();

    for (name, column) in object {
        let entries = match column {
            Json::Array(entries) => entries,
            _ => {
                return Err(TableError::ReadParse(format!(
                    "Column {} is not a JSON array",
                    name
                )))
            }
        };

        let mut values = Vec::with_capacity(entries.len());
        for entry in entries {
            let value = match entry {
                Json::Null => None,
                Json::Bool(b) => Some(Value::Boolean(b)),
                Json::Number(n) if n.is_i64() => Some(Value::Integer(n.as_i64().unwrap())),
                // Covers both floats and unsigned integers beyond i64 range
                Json::Number(n) => match n.as_f64() {
                    Some(f) => Some(Value::Float(f)),
                    None => {
                        return Err(TableError::ReadParse(format!(
                            "Number in column {} has no f64 form: {}",
                            name, n
                        )))
                    }
                },
                Json::String(s) => match DateTime::parse_from_rfc3339(&s) {
                    Ok(dt) => Some(Value::DateTime(dt.with_timezone(&Utc))),
                    Err(_) => Some(Value::String(s)),
                },
                other => {
                    return Err(TableError::ReadParse(format!(
                        "Unsupported JSON value in column {}: {}",
                        name, other
                    )))
                }
            };
            values.push(value);
        }

        columns.push(name.clone());
        data.insert(name, values);
    }

    DataFrame::new(data, columns).map_err(|err| TableError::ReadParse(err.to_string()))
}

fn unescape_html(cell: &str) -> String {
    cell.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Reads the first `<table>` found in HTML markup. The first row supplies
/// the column names, every later row is data.
pub fn read_html(source: &mut dyn Read, _options: &ReadOptions) -> Result<DataFrame, TableError> {
    let mut content = String::new();
    source.read_to_string(&mut content)?;

    let row_re = Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>")?;
    let cell_re = Regex::new(r"(?s)<t[hd][^>]*>(.*?)</t[hd]>")?;

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for row_match in row_re.captures_iter(&content) {
        let cells: Vec<String> = cell_re
            .captures_iter(&row_match[1])
            .map(|cell| unescape_html(cell[1].trim()))
            .collect();

        match columns {
            None => columns = Some(cells),
            Some(_) => rows.push(cells.iter().map(|cell| infer_data_type(cell)).collect()),
        }
    }

    let columns =
        columns.ok_or_else(|| TableError::ReadParse("No table rows in HTML input".to_string()))?;

    assemble(columns, rows)
}

/// Reads fixed-width text where column boundaries are whitespace runs.
/// The first non-blank line names the columns; tokens on later lines are
/// assigned to columns positionally.
pub fn read_fwf(source: &mut dyn Read, _options: &ReadOptions) -> Result<DataFrame, TableError> {
    let mut content = String::new();
    source.read_to_string(&mut content)?;

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let columns: Vec<String> = match lines.next() {
        Some(header) => header.split_whitespace().map(String::from).collect(),
        None => return Err(TableError::ReadParse("Empty fixed-width input".to_string())),
    };

    let mut rows = Vec::new();
    for line in lines {
        rows.push(line.split_whitespace().map(infer_data_type).collect());
    }

    assemble(columns, rows)
}
