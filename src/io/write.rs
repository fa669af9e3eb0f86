// io/write.rs

use crate::dataframe::dataframe::{DataFrame, Value};
use crate::errors::TableError;
use crate::io::WriteOptions;
use csv::WriterBuilder;
use serde_json::Value as Json;
use std::io::Write;

/// Renders a cell as text. Floats always carry a decimal point (or an
/// exponent) so that e.g. 5.0 comes back as a float, and datetimes use
/// RFC 3339, matching the read-side inference.
fn render_value(value: &Option<Value>) -> String {
    match value {
        Some(Value::Integer(v)) => v.to_string(),
        Some(Value::Float(v)) => format!("{:?}", v),
        Some(Value::Boolean(v)) => v.to_string(),
        Some(Value::String(v)) => v.clone(),
        Some(Value::DateTime(v)) => v.to_rfc3339(),
        None => String::new(),
    }
}

/// Writes the frame as delimiter-separated text with a header row.
/// The destination is flushed but never closed.
pub fn write_csv(
    destination: &mut dyn Write,
    frame: &DataFrame,
    options: &WriteOptions,
) -> Result<(), TableError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(&mut *destination);

    writer.write_record(&frame.columns)?;

    let (num_rows, _) = frame.shape();
    for row in 0..num_rows {
        let record: Vec<String> = frame
            .columns
            .iter()
            .map(|name| render_value(frame.get(row, name).unwrap_or(&None)))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the frame as a column-oriented JSON object,
/// `{"col": [values, ...], ...}`, columns in table order.
pub fn write_json(
    destination: &mut dyn Write,
    frame: &DataFrame,
    options: &WriteOptions,
) -> Result<(), TableError> {
    let mut root = serde_json::Map::with_capacity(frame.columns.len());

    for name in &frame.columns {
        let values = frame.column(name).ok_or_else(|| {
            TableError::Conversion(format!("Column {} is missing from the frame", name))
        })?;

        let mut entries = Vec::with_capacity(values.len());
        for value in values {
            let entry = match value {
                None => Json::Null,
                Some(Value::Integer(v)) => Json::from(*v),
                Some(Value::Float(v)) => serde_json::Number::from_f64(*v)
                    .map(Json::Number)
                    .ok_or_else(|| {
                        TableError::Conversion(format!(
                            "Non-finite float in column {} has no JSON form",
                            name
                        ))
                    })?,
                Some(Value::Boolean(v)) => Json::Bool(*v),
                Some(Value::String(v)) => Json::String(v.clone()),
                Some(Value::DateTime(v)) => Json::String(v.to_rfc3339()),
            };
            entries.push(entry);
        }

        root.insert(name.clone(), Json::Array(entries));
    }

    if options.pretty {
        serde_json::to_writer_pretty(&mut *destination, &Json::Object(root))?;
    } else {
        serde_json::to_writer(&mut *destination, &Json::Object(root))?;
    }

    Ok(())
}

fn escape_html(cell: &str) -> String {
    cell.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Writes the frame as an HTML table with a thead header row and one
/// tbody row per data row.
pub fn write_html(
    destination: &mut dyn Write,
    frame: &DataFrame,
    _options: &WriteOptions,
) -> Result<(), TableError> {
    writeln!(destination, "<table>")?;
    writeln!(destination, "<thead>")?;

    write!(destination, "<tr>")?;
    for name in &frame.columns {
        write!(destination, "<th>{}</th>", escape_html(name))?;
    }
    writeln!(destination, "</tr>")?;
    writeln!(destination, "</thead>")?;
    writeln!(destination, "<tbody>")?;

    let (num_rows, _) = frame.shape();
    for row in 0..num_rows {
        write!(destination, "<tr>")?;
        for name in &frame.columns {
            let cell = render_value(frame.get(row, name).unwrap_or(&None));
            write!(destination, "<td>{}</td>", escape_html(&cell))?;
        }
        writeln!(destination, "</tr>")?;
    }

    writeln!(destination, "</tbody>")?;
    writeln!(destination, "</table>")?;

    Ok(())
}
