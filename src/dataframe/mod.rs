// dataframe/mod.rs
pub mod dataframe;

pub use dataframe::DataFrame;
pub use dataframe::Value;
