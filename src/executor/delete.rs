//! `Delete`: filtered scan + per-tuple erase, grounded on
//! `original_source/CS564_stage6/delete.C`'s `QU_Delete`.

use crate::catalog::{to_binary, AttrType, Op};
use crate::common::{DbError, Result};
use crate::heapfile::{HeapFile, HeapFileScan};

use super::engine::Engine;

/// `QU_Delete(relation, attrName, op, type, attrValue)`. `attr_name` empty
/// means an unfiltered scan that deletes every tuple.
pub fn delete(
    engine: &mut Engine,
    relation: &str,
    filter: Option<(&str, Op, &str)>,
) -> Result<usize> {
    let mut heap = HeapFile::open(&mut engine.bm, relation)?;
    let mut deleted = 0usize;
    {
        let mut scan = HeapFileScan::new(&mut heap);

        match filter {
            Some((attr_name, op, value)) => {
                let desc = engine.catalog.get_attr_info(relation, attr_name)?.clone();
                let binary = to_binary(value, desc.attr_type, desc.attr_len)?;
                scan.start_scan(desc.attr_offset, desc.attr_len, desc.attr_type, Some(&binary), op)?;
            }
            None => {
                scan.start_scan(0, 0, AttrType::String, None, Op::Eq)?;
            }
        }

        loop {
            match scan.scan_next(&mut engine.bm) {
                Ok(_) => {
                    scan.delete_record()?;
                    deleted += 1;
                }
                Err(DbError::FileEOF) => break,
                Err(e) => return Err(e),
            }
        }
    }
    heap.close(&mut engine.bm);
    Ok(deleted)
}
