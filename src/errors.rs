// src/errors.rs
use std::fmt;
use std::io;

// Here is a custom error type that can hold every failure the bridge can surface
#[derive(Debug)]
pub enum TableError {
    /// The format name is unknown, or the requested direction (read/write)
    /// is not in the capability table for it.
    UnsupportedFormat(String),
    /// The input text does not parse under the requested format's grammar.
    ReadParse(String),
    /// A column cannot be represented in the flat frame.
    Conversion(String),
    Io(io::Error),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::UnsupportedFormat(fmt_name) => {
                write!(f, "Unsupported format: {}", fmt_name)
            }
            TableError::ReadParse(err) => write!(f, "Parse error: {}", err),
            TableError::Conversion(err) => write!(f, "Conversion error: {}", err),
            TableError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        TableError::Io(err)
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::ReadParse(err.to_string())
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        // Failures of the underlying stream surface as Io, everything else
        // is a grammar problem
        if err.is_io() {
            TableError::Io(err.into())
        } else {
            TableError::ReadParse(err.to_string())
        }
    }
}

impl From<regex::Error> for TableError {
    fn from(err: regex::Error) -> Self {
        TableError::ReadParse(err.to_string())
    }
}
