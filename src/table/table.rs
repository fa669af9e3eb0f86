// table/table.rs

use crate::dataframe::dataframe::{DataFrame, Value};
use crate::errors::TableError;
use crate::io::{self, ReadOptions, WriteOptions};
use crate::table::mixins::MixinColumn;
use std::collections::HashMap;
use std::io::{Read, Write};

/// A single table column: either primitive values, or a mixin of rich
/// domain objects that has to be flattened (or dropped) before the table
/// can cross into a flat frame.
#[derive(Debug)]
pub enum Column {
    Values(Vec<Option<Value>>),
    Mixin(Box<dyn MixinColumn>),
}

impl Column {
    pub fn integers(values: Vec<i64>) -> Self {
        Column::Values(values.into_iter().map(|v| Some(Value::Integer(v))).collect())
    }

    pub fn floats(values: Vec<f64>) -> Self {
        Column::Values(values.into_iter().map(|v| Some(Value::Float(v))).collect())
    }

    pub fn booleans(values: Vec<bool>) -> Self {
        Column::Values(values.into_iter().map(|v| Some(Value::Boolean(v))).collect())
    }

    pub fn strings(values: Vec<&str>) -> Self {
        Column::Values(
            values
                .into_iter()
                .map(|v| Some(Value::String(v.to_string())))
                .collect(),
        )
    }

    pub fn mixin<M: MixinColumn + 'static>(mixin: M) -> Self {
        Column::Mixin(Box::new(mixin))
    }

    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Values(values) => values.len(),
            Column::Mixin(mixin) => mixin.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered sequence of named columns with a uniform row count.
///
/// Serialization goes through the generic [`read`](Table::read) /
/// [`write`](Table::write) entry points, which dispatch the format name
/// through the registry in the `io` module.
#[derive(Debug)]
pub struct Table {
    columns: Vec<String>,
    data: HashMap<String, Column>,
}

impl Table {
    /// Creates a new Table from named columns, keeping the given order.
    /// Column names must be unique and every column must have the same
    /// number of rows.
    pub fn from_columns(columns: Vec<(&str, Column)>) -> Result<Self, &'static str> {
        let mut names = Vec::with_capacity(columns.len());
        let mut data = HashMap::new();

        for (name, column) in columns {
            if data.contains_key(name) {
                return Err("Column names must be unique.");
            }
            names.push(name.to_string());
            data.insert(name.to_string(), column);
        }

        let lengths: Vec<usize> = names.iter().map(|name| data[name].len()).collect();
        if lengths.windows(2).any(|w| w[0] != w[1]) {
            return Err("All columns must have the same length.");
        }

        Ok(Table {
            columns: names,
            data,
        })
    }

    /// Column names in order.
    pub fn colnames(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, column_name: &str) -> Option<&Column> {
        self.data.get(column_name)
    }

    pub fn num_rows(&self) -> usize {
        self.columns
            .first()
            .map_or(0, |name| self.data[name].len())
    }

    /// Converts the table into a flat [`DataFrame`].
    ///
    /// Primitive columns are copied as-is. A mixin column with a flattening
    /// rule expands into one flat column per component, named
    /// `<colname>.<component>` (or just `<colname>` for a single unnamed
    /// component). A mixin with no flattening rule is dropped silently,
    /// which loses that column's data.
    pub fn to_dataframe(&self) -> Result<DataFrame, TableError> {
        let num_rows = self.num_rows();
        let mut flat_columns = Vec::new();
        let mut flat_data: HashMap<String, Vec<Option<Value>>> = HashMap::new();

        for name in &self.columns {
            match &self.data[name] {
                Column::Values(values) => {
                    flat_columns.push(name.clone());
                    flat_data.insert(name.clone(), values.clone());
                }
                Column::Mixin(mixin) => {
                    let components = match mixin.flatten() {
                        Some(components) => components,
                        // No primitive representation for this mixin
                        None => continue,
                    };
                    for (component, values) in components {
                        if values.len() != num_rows {
                            return Err(TableError::Conversion(format!(
                                "Component {} of column {} has {} rows, expected {}",
                                component,
                                name,
                                values.len(),
                                num_rows
                            )));
                        }
                        let flat_name = if component.is_empty() {
                            name.clone()
                        } else {
                            format!("{}.{}", name, component)
                        };
                        if flat_data.contains_key(&flat_name) {
                            return Err(TableError::Conversion(format!(
                                "Flattening column {} collides with column {}",
                                name, flat_name
                            )));
                        }
                        flat_columns.push(flat_name.clone());
                        flat_data.insert(flat_name, values);
                    }
                }
            }
        }

        DataFrame::new(flat_data, flat_columns)
            .map_err(|err| TableError::Conversion(err.to_string()))
    }

    /// Builds a Table from a flat frame, preserving the frame's column
    /// order and value types. Every column comes back primitive.
    pub fn from_dataframe(frame: DataFrame) -> Table {
        let DataFrame {
            columns, mut data, ..
        } = frame;

        let table_data = columns
            .iter()
            .filter_map(|name| data.remove(name).map(|values| (name.clone(), Column::Values(values))))
            .collect();

        Table {
            columns,
            data: table_data,
        }
    }

    /// Writes the table to `destination` in the named format, e.g.
    /// `"pandas.csv"`. Options the format's writer does not use are
    /// ignored. The destination is left open; the caller owns it.
    pub fn write<W: Write>(
        &self,
        destination: &mut W,
        format: &str,
        options: &WriteOptions,
    ) -> Result<(), TableError> {
        let entry = io::lookup(format)?;
        let write_fn = entry
            .write
            .ok_or_else(|| TableError::UnsupportedFormat(format!("{} (write)", format)))?;

        let frame = self.to_dataframe()?;
        write_fn(destination, &frame, options)
    }

    /// Reads a table from `source` in the named format.
    pub fn read<R: Read>(
        source: &mut R,
        format: &str,
        options: &ReadOptions,
    ) -> Result<Table, TableError> {
        let entry = io::lookup(format)?;
        let read_fn = entry
            .read
            .ok_or_else(|| TableError::UnsupportedFormat(format!("{} (read)", format)))?;

        let frame = read_fn(source, options)?;
        Ok(Table::from_dataframe(frame))
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        if self.columns != other.columns {
            return false;
        }

        self.columns.iter().all(|name| {
            match (self.data.get(name), other.data.get(name)) {
                (Some(Column::Values(a)), Some(Column::Values(b))) => a == b,
                // Mixins compare through their primitive components
                (Some(Column::Mixin(a)), Some(Column::Mixin(b))) => a.flatten() == b.flatten(),
                _ => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, Table};
    use crate::dataframe::dataframe::{DataFrame, Value};
    use crate::table::mixins::{MixinColumn, QuantityColumn, SkyCoordColumn};

    #[test]
    fn test_rejects_duplicate_column_names() {
        let result = Table::from_columns(vec![
            ("a", Column::integers(vec![1])),
            ("a", Column::integers(vec![2])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Table::from_columns(vec![
            ("a", Column::integers(vec![1, 2])),
            ("b", Column::integers(vec![1])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_dataframe_copies_primitives_in_order() {
        let t = Table::from_columns(vec![
            ("a", Column::integers(vec![1, 2])),
            ("b", Column::floats(vec![1.5, 2.5])),
            ("c", Column::strings(vec!["x", "y"])),
        ])
        .unwrap();

        let frame = t.to_dataframe().unwrap();
        assert_eq!(frame.columns, vec!["a", "b", "c"]);
        assert_eq!(frame.get(0, "b"), Some(&Some(Value::Float(1.5))));
        assert_eq!(frame.shape(), (2, 3));
    }

    #[test]
    fn test_to_dataframe_flattens_mixins() {
        let sc = SkyCoordColumn::new(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        let q = QuantityColumn::new(vec![5.0, 6.0], "m");
        let t = Table::from_columns(vec![
            ("i", Column::integers(vec![1, 2])),
            ("q", Column::mixin(q)),
            ("sc", Column::mixin(sc)),
        ])
        .unwrap();

        let frame = t.to_dataframe().unwrap();
        assert_eq!(frame.columns, vec!["i", "q", "sc.ra", "sc.dec"]);
        assert_eq!(frame.get(0, "q"), Some(&Some(Value::Float(5.0))));
        assert_eq!(frame.get(1, "sc.dec"), Some(&Some(Value::Float(4.0))));
    }

    #[test]
    fn test_to_dataframe_drops_unflattenable_mixins() {
        #[derive(Debug)]
        struct Opaque(usize);

        impl MixinColumn for Opaque {
            fn len(&self) -> usize {
                self.0
            }
        }

        let t = Table::from_columns(vec![
            ("a", Column::integers(vec![1, 2])),
            ("blob", Column::mixin(Opaque(2))),
        ])
        .unwrap();

        let frame = t.to_dataframe().unwrap();
        assert_eq!(frame.columns, vec!["a"], "Unflattenable column is dropped");
    }

    #[test]
    fn test_from_dataframe_preserves_order() {
        let frame = DataFrame::from_values(
            vec!["z", "a", "m"],
            vec![vec![
                Value::Integer(1),
                Value::Float(2.0),
                Value::String("x".to_string()),
            ]],
        )
        .unwrap();

        let t = Table::from_dataframe(frame);
        assert_eq!(t.colnames(), &["z", "a", "m"]);
        assert_eq!(t.num_rows(), 1);
        match t.column("a") {
            Some(Column::Values(values)) => assert_eq!(values[0], Some(Value::Float(2.0))),
            _ => panic!("Column 'a' should be primitive"),
        }
    }

    #[test]
    fn test_table_equality_is_numeric() {
        let a = Table::from_columns(vec![("x", Column::integers(vec![1, 2]))]).unwrap();
        let b = Table::from_columns(vec![("x", Column::floats(vec![1.0, 2.0]))]).unwrap();
        assert_eq!(a, b);
    }
}
