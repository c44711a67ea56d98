//! `Select`: the `SELECT` entry point — scan + project + insert-into-result,
//! grounded literally on `original_source/CS564_stage6/select.C`'s
//! `QU_Select`/`ScanSelect`, including opening a fresh `InsertFileScan` on
//! the result relation inside the scan loop for every matching record.

use crate::catalog::{to_binary, AttrType, Op};
use crate::common::Result;
use crate::heapfile::{HeapFile, HeapFileScan, InsertFileScan};

use super::engine::Engine;

/// One projected attribute: which relation and attribute name to pull from
/// the source scan.
pub struct ProjAttr {
    pub rel_name: String,
    pub attr_name: String,
}

impl ProjAttr {
    pub fn new(rel_name: impl Into<String>, attr_name: impl Into<String>) -> Self {
        Self {
            rel_name: rel_name.into(),
            attr_name: attr_name.into(),
        }
    }
}

/// An optional scan filter: `relName.attrName OP value`.
pub struct FilterAttr {
    pub rel_name: String,
    pub attr_name: String,
    pub op: Op,
    pub value: String,
}

/// `QU_Select(result, projCnt, projNames, attr, op, attrValue)`.
pub fn select(
    engine: &mut Engine,
    result: &str,
    proj_names: &[ProjAttr],
    filter: Option<&FilterAttr>,
) -> Result<()> {
    let proj_attrs: Vec<_> = proj_names
        .iter()
        .map(|p| engine.catalog.get_attr_info(&p.rel_name, &p.attr_name).map(|a| a.clone()))
        .collect::<Result<Vec<_>>>()?;

    let reclen: usize = proj_attrs.iter().map(|a| a.attr_len).sum();

    crate::heapfile::create_heap_file(&mut engine.bm, result)?;

    let scan_rel = &proj_names[0].rel_name;
    let mut src = HeapFile::open(&mut engine.bm, scan_rel)?;
    {
        let mut hfs = HeapFileScan::new(&mut src);

        match filter {
            Some(f) => {
                let attr_desc = engine.catalog.get_attr_info(&f.rel_name, &f.attr_name)?.clone();
                let binary = to_binary(&f.value, attr_desc.attr_type, attr_desc.attr_len)?;
                hfs.start_scan(attr_desc.attr_offset, attr_desc.attr_len, attr_desc.attr_type, Some(&binary), f.op)?;
            }
            None => {
                hfs.start_scan(0, 0, AttrType::String, None, Op::Eq)?;
            }
        }

        loop {
            let rid = match hfs.scan_next(&mut engine.bm) {
                Ok(rid) => rid,
                Err(crate::common::DbError::FileEOF) => break,
                Err(e) => return Err(e),
            };
            let _ = rid;
            let record = hfs.get_record()?;

            let mut projected = vec![0u8; reclen];
            let mut offset = 0usize;
            for attr in &proj_attrs {
                let slice = &record[attr.attr_offset..attr.attr_offset + attr.attr_len];
                projected[offset..offset + attr.attr_len].copy_from_slice(slice);
                offset += attr.attr_len;
            }

            let mut result_file = HeapFile::open(&mut engine.bm, result)?;
            {
                let mut ins = InsertFileScan::new(&mut result_file);
                ins.insert_record(&mut engine.bm, &projected)?;
            }
            result_file.close(&mut engine.bm);
        }
    }
    src.close(&mut engine.bm);
    Ok(())
}
