mod catalog;
mod convert;
pub mod types;

pub use catalog::{Catalog, ColumnSpec};
pub use convert::{compare, to_binary};
pub use types::{AttrDesc, AttrType, Op, RelDesc};
