//! `Insert`: schema-checked record assembly, grounded on
//! `original_source/CS564_stage6/insert.C`'s `QU_Insert`. No defaults — the
//! caller must supply every attribute by name, in any order.

use crate::catalog::to_binary;
use crate::common::{DbError, Result};
use crate::heapfile::{HeapFile, InsertFileScan};

use super::engine::Engine;

/// One `name = value` pair supplied by the caller, value as a string to be
/// converted per the attribute's declared type.
pub struct AttrValue {
    pub attr_name: String,
    pub value: String,
}

impl AttrValue {
    pub fn new(attr_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attr_name: attr_name.into(),
            value: value.into(),
        }
    }
}

/// `QU_Insert(relation, attrCnt, attrList)`.
pub fn insert(engine: &mut Engine, relation: &str, attrs: &[AttrValue]) -> Result<()> {
    let rel_info = engine.catalog.get_rel_info(relation)?.to_vec();

    if attrs.len() != rel_info.len() {
        return Err(DbError::AttrCountMismatch {
            expected: rel_info.len(),
            actual: attrs.len(),
        });
    }

    let mut record = vec![0u8; rel_info.iter().map(|a| a.attr_len).sum()];
    for desc in &rel_info {
        let supplied = attrs
            .iter()
            .find(|a| a.attr_name == desc.attr_name)
            .ok_or_else(|| DbError::AttrNotFound(desc.attr_name.clone()))?;
        let binary = to_binary(&supplied.value, desc.attr_type, desc.attr_len)?;
        record[desc.attr_offset..desc.attr_offset + desc.attr_len].copy_from_slice(&binary);
    }

    crate::heapfile::create_heap_file(&mut engine.bm, relation)?;
    let mut heap = HeapFile::open(&mut engine.bm, relation)?;
    {
        let mut ins = InsertFileScan::new(&mut heap);
        ins.insert_record(&mut engine.bm, &record)?;
    }
    heap.close(&mut engine.bm);
    Ok(())
}
