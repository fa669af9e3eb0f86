// dataframe/dataframe.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Enum representing the primitive cell types a DataFrame can hold.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    DateTime(DateTime<Utc>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Integer and Float cells compare numerically, so values that
            // changed representation in a round trip still count as equal
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

/// The flat, primitive-only columnar container used as the interchange
/// frame by the format bridge. Created per call and thrown away afterwards;
/// nothing in the crate holds on to one.
#[derive(Debug)]
pub struct DataFrame {
    pub columns: Vec<String>,                     // Column names, in order
    pub data: HashMap<String, Vec<Option<Value>>>, // Columnar data storage
    index: Vec<String>, // generated automatically, callers only ever read it
}

impl DataFrame {
    /// Creates a new DataFrame with specified columns and columnar data,
    /// automatically generating a sequential index.
    pub fn new(
        column_data: HashMap<String, Vec<Option<Value>>>,
        columns: Vec<String>,
    ) -> Result<Self, &'static str> {
        // Every named column must be present in the data
        if columns.iter().any(|name| !column_data.contains_key(name)) {
            return Err("Every column name must have data.");
        }

        // Ensure all columns have the same length
        let lengths: Vec<usize> = column_data.values().map(|col| col.len()).collect();
        if lengths.windows(2).any(|w| w[0] != w[1]) {
            return Err("All columns must have the same length.");
        }

        // Generate a sequential index based on the length of the columns
        let num_rows = lengths.first().cloned().unwrap_or(0);
        let index = (0..num_rows)
            .map(|i| i.to_string())
            .collect::<Vec<String>>();

        Ok(DataFrame {
            data: column_data,
            columns,
            index,
        })
    }

    // user can generate a dataframe easily from rows
    pub fn from_values(
        column_names: Vec<&str>,
        row_values: Vec<Vec<Value>>,
    ) -> Result<Self, &'static str> {
        if row_values.iter().any(|row| row.len() != column_names.len()) {
            return Err("Row values must match the number of columns");
        }

        let mut data: HashMap<String, Vec<Option<Value>>> = HashMap::new();
        let num_rows = row_values.len();

        // Initialize columns in the HashMap
        for &col_name in &column_names {
            data.insert(col_name.to_string(), vec![None; num_rows]);
        }

        // Populate the data
        for (row_idx, row) in row_values.into_iter().enumerate() {
            for (col_idx, value) in row.into_iter().enumerate() {
                let col_name = &column_names[col_idx];
                if let Some(column) = data.get_mut(*col_name) {
                    column[row_idx] = Some(value);
                }
            }
        }

        let index = (0..num_rows).map(|i| i.to_string()).collect();

        Ok(DataFrame {
            columns: column_names
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
            data,
            index,
        })
    }

    /// Returns the values of a column by name, or `None` if the column
    /// does not exist.
    pub fn column(&self, column_name: &str) -> Option<&Vec<Option<Value>>> {
        self.data.get(column_name)
    }

    /// Returns a single value from the DataFrame by specifying a row and a column name.
    pub fn get(&self, row: usize, column_name: &str) -> Option<&Option<Value>> {
        if let Some(column) = self.data.get(column_name) {
            Some(column.get(row).unwrap_or(&None))
        } else {
            // If the column does not exist, return None
            None
        }
    }

    /// to get dataframe index
    pub fn get_index(&self) -> &[String] {
        &self.index
    }

    /// Returns the shape of the DataFrame as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        let num_rows = self
            .columns
            .first()
            .and_then(|name| self.data.get(name))
            .map_or(0, Vec::len);
        (num_rows, self.columns.len())
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        // First, check if the columns match, order included
        if self.columns != other.columns {
            return false;
        }

        // Next, check the values column by column
        self.columns
            .iter()
            .all(|name| self.data.get(name) == other.data.get(name))
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column_width = 20; // Set a constant for uniform column width

        // Display the column names with a header
        write!(f, "{:<width$}", "Index", width = column_width)?;
        for column in &self.columns {
            write!(f, "{:<width$}", column, width = column_width)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat((self.columns.len() + 1) * column_width))?;

        let (row_count, _) = self.shape();

        for row_index in 0..row_count {
            write!(f, "{:<width$}", row_index, width = column_width)?;
            for column in &self.columns {
                let value = self
                    .data
                    .get(column)
                    .and_then(|col| col.get(row_index))
                    .unwrap_or(&None);

                match *value {
                    Some(Value::Integer(val)) => {
                        write!(f, "{:<width$}", val, width = column_width)?
                    }
                    Some(Value::Float(val)) => {
                        write!(f, "{:<width$.2}", val, width = column_width)?
                    }
                    Some(Value::Boolean(val)) => {
                        write!(f, "{:<width$}", val, width = column_width)?
                    }
                    Some(Value::String(ref val)) => {
                        write!(f, "{:<width$}", val, width = column_width)?
                    }
                    Some(Value::DateTime(ref val)) => write!(
                        f,
                        "{:<width$}",
                        val.format("%Y-%m-%d %H:%M:%S"),
                        width = column_width
                    )?,
                    None => write!(f, "{:<width$}", "NA", width = column_width)?,
                };
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DataFrame, Value};
    use std::collections::HashMap;

    /// this is the sample dataframe used throughout the unit testcases
    ///     	ID	    Name	    Score
    /// 	    1	    Alice	    3.5
    /// 	    2	    Bob	        4.0
    /// 	    3	    Charlie	    2.5
    fn setup_test_dataframe() -> DataFrame {
        let columns = vec!["ID".to_string(), "Name".to_string(), "Score".to_string()];

        let mut data: HashMap<String, Vec<Option<Value>>> = HashMap::new();
        data.insert(
            "ID".to_string(),
            vec![
                Some(Value::Integer(1)),
                Some(Value::Integer(2)),
                Some(Value::Integer(3)),
            ],
        );
        data.insert(
            "Name".to_string(),
            vec![
                Some(Value::String("Alice".to_string())),
                Some(Value::String("Bob".to_string())),
                Some(Value::String("Charlie".to_string())),
            ],
        );
        data.insert(
            "Score".to_string(),
            vec![
                Some(Value::Float(3.5)),
                Some(Value::Float(4.0)),
                Some(Value::Float(2.5)),
            ],
        );

        DataFrame::new(data, columns).expect("Failed to create DataFrame")
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let mut data: HashMap<String, Vec<Option<Value>>> = HashMap::new();
        data.insert("a".to_string(), vec![Some(Value::Integer(1))]);
        data.insert(
            "b".to_string(),
            vec![Some(Value::Integer(1)), Some(Value::Integer(2))],
        );

        let result = DataFrame::new(data, vec!["a".to_string(), "b".to_string()]);
        assert!(result.is_err(), "Ragged columns should be rejected");
    }

    #[test]
    fn test_new_rejects_missing_column_data() {
        let mut data: HashMap<String, Vec<Option<Value>>> = HashMap::new();
        data.insert("a".to_string(), vec![Some(Value::Integer(1))]);

        let result = DataFrame::new(data, vec!["a".to_string(), "b".to_string()]);
        assert!(result.is_err(), "Missing column data should be rejected");
    }

    #[test]
    fn test_from_values() {
        let df = DataFrame::from_values(
            vec!["ID", "Name"],
            vec![
                vec![Value::Integer(1), Value::String("Alice".to_string())],
                vec![Value::Integer(2), Value::String("Bob".to_string())],
            ],
        )
        .unwrap();

        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.columns, vec!["ID", "Name"]);
        assert_eq!(df.get(1, "ID"), Some(&Some(Value::Integer(2))));
        assert_eq!(df.get_index(), &["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_numeric_equality_across_types() {
        assert_eq!(Value::Integer(2), Value::Float(2.0));
        assert_eq!(Value::Float(2.0), Value::Integer(2));
        assert_ne!(Value::Integer(2), Value::Float(2.5));
        assert_ne!(Value::Integer(1), Value::String("1".to_string()));
    }

    #[test]
    fn test_dataframe_equality_checks_column_order() {
        let a = DataFrame::from_values(
            vec!["x", "y"],
            vec![vec![Value::Integer(1), Value::Integer(2)]],
        )
        .unwrap();
        let b = DataFrame::from_values(
            vec!["y", "x"],
            vec![vec![Value::Integer(2), Value::Integer(1)]],
        )
        .unwrap();

        assert_ne!(a, b, "Same data under reordered columns is not equal");
    }

    #[test]
    fn test_display_contains_values() {
        let df = setup_test_dataframe();
        let rendered = format!("{}", df);

        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("3.50"));
        assert!(rendered.contains("ID"));
    }
}
