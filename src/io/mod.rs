// io/mod.rs
pub mod read;
pub mod write;

use crate::dataframe::dataframe::DataFrame;
use crate::errors::TableError;
use encoding_rs::{Encoding, UTF_8};
use std::io::{Read, Write};

pub type ReadFn = fn(&mut dyn Read, &ReadOptions) -> Result<DataFrame, TableError>;
pub type WriteFn = fn(&mut dyn Write, &DataFrame, &WriteOptions) -> Result<(), TableError>;

/// Codec record for one named format. A missing direction means the
/// capability table says no.
pub struct FormatEntry {
    pub read: Option<ReadFn>,
    pub write: Option<WriteFn>,
}

/// Options forwarded to the format readers. Each reader picks the fields
/// that apply to its format and ignores the rest.
#[derive(Clone, Debug)]
pub struct ReadOptions {
    /// Field separator, csv only.
    pub delimiter: u8,
    /// Byte encoding of the source, csv only.
    pub encoding: &'static Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: b',',
            encoding: UTF_8,
        }
    }
}

/// Options forwarded to the format writers, same deal as [`ReadOptions`].
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Field separator, csv only.
    pub delimiter: u8,
    /// Pretty-print the output, json only.
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            delimiter: b',',
            pretty: false,
        }
    }
}

/// Resolves a `"pandas.<fmt>"` format name to its codec record.
///
/// Supported formats:
///
/// | format | read | write |
/// |--------|------|-------|
/// | csv    | yes  | yes   |
/// | json   | yes  | yes   |
/// | html   | yes  | yes   |
/// | fwf    | yes  | no    |
///
/// Anything else fails with [`TableError::UnsupportedFormat`].
pub fn lookup(format: &str) -> Result<FormatEntry, TableError> {
    let fmt = format
        .strip_prefix("pandas.")
        .ok_or_else(|| TableError::UnsupportedFormat(format.to_string()))?;

    let entry = match fmt {
        "csv" => FormatEntry {
            read: Some(read::read_csv as ReadFn),
            write: Some(write::write_csv as WriteFn),
        },
        "json" => FormatEntry {
            read: Some(read::read_json as ReadFn),
            write: Some(write::write_json as WriteFn),
        },
        "html" => FormatEntry {
            read: Some(read::read_html as ReadFn),
            write: Some(write::write_html as WriteFn),
        },
        "fwf" => FormatEntry {
            read: Some(read::read_fwf as ReadFn),
            write: None,
        },
        _ => return Err(TableError::UnsupportedFormat(format.to_string())),
    };

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::lookup;
    use crate::errors::TableError;

    #[test]
    fn test_lookup_rejects_unknown_format() {
        for bad in ["pandas.parquet", "csv", "ascii.csv", ""] {
            match lookup(bad) {
                Err(TableError::UnsupportedFormat(name)) => assert_eq!(name, bad),
                other => panic!("Expected UnsupportedFormat for {:?}, got {:?}", bad, other.is_ok()),
            }
        }
    }

    #[test]
    fn test_capability_table() {
        for (fmt, can_read, can_write) in [
            ("pandas.csv", true, true),
            ("pandas.json", true, true),
            ("pandas.html", true, true),
            ("pandas.fwf", true, false),
        ] {
            let entry = lookup(fmt).unwrap();
            assert_eq!(entry.read.is_some(), can_read, "read capability of {}", fmt);
            assert_eq!(entry.write.is_some(), can_write, "write capability of {}", fmt);
        }
    }
}
