// src/lib.rs

pub mod dataframe;
pub mod errors;
pub mod io;
pub mod table;

pub use crate::dataframe::dataframe::{DataFrame, Value};
pub use crate::errors::TableError;
pub use crate::io::{ReadOptions, WriteOptions};
pub use crate::table::mixins::{MixinColumn, QuantityColumn, SkyCoordColumn};
pub use crate::table::table::{Column, Table};
