//! Attribute and relation descriptors: the catalog's value types.

/// The closed set of attribute types the catalog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
    Integer,
    Float,
    String,
}

/// Comparison operators accepted by a scan filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Lt,
    Lte,
    Eq,
    Gte,
    Gt,
    Ne,
}

/// A single attribute's physical description within a relation: its type,
/// byte length, and cumulative byte offset within the relation's record
/// layout (assigned in registration order).
#[derive(Debug, Clone)]
pub struct AttrDesc {
    pub rel_name: String,
    pub attr_name: String,
    pub attr_type: AttrType,
    pub attr_len: usize,
    pub attr_offset: usize,
}

/// A relation's top-level description.
#[derive(Debug, Clone)]
pub struct RelDesc {
    pub rel_name: String,
    pub attr_cnt: usize,
    pub rec_len: usize,
}
