// table/mod.rs
pub mod mixins;
pub mod table;

pub use mixins::MixinColumn;
pub use mixins::QuantityColumn;
pub use mixins::SkyCoordColumn;
pub use table::Column;
pub use table::Table;
