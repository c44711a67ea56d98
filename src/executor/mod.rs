mod delete;
mod engine;
mod insert;
mod select;

pub use delete::delete;
pub use engine::Engine;
pub use insert::{insert, AttrValue};
pub use select::{select, FilterAttr, ProjAttr};
