//! In-memory system catalog: relation and attribute metadata registry.
//! Stands in for `relCat`/`attrCat` (`spec.md` §6's "consumed from
//! catalogs" interface), reimplemented from scratch since the spec treats
//! them as an opaque external collaborator. Attribute offsets are assigned
//! as a cumulative sum in registration order — an original implementation
//! of the fixed `attrOffset` layout that
//! `original_source/CS564_stage4/heapfile.C` assumes records already have.

use std::collections::HashMap;

use crate::catalog::types::{AttrDesc, AttrType, RelDesc};
use crate::common::{DbError, Result};

/// A column to register when creating a relation: name, type, and length.
/// `attr_len` is ignored (and may be zero) for `Integer`/`Float`, which are
/// always 4 bytes.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub attr_type: AttrType,
    pub attr_len: usize,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, attr_type: AttrType, attr_len: usize) -> Self {
        Self {
            name: name.into(),
            attr_type,
            attr_len,
        }
    }
}

fn physical_len(attr_type: AttrType, declared_len: usize) -> usize {
    match attr_type {
        AttrType::Integer | AttrType::Float => 4,
        AttrType::String => declared_len,
    }
}

/// The catalog: one entry per relation, each owning its attributes in
/// declaration order.
pub struct Catalog {
    relations: HashMap<String, RelDesc>,
    attributes: HashMap<String, Vec<AttrDesc>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            relations: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Registers a new relation with the given columns. Fails with
    /// `RelAlreadyExists` if the name is taken.
    pub fn create_relation(&mut self, rel_name: &str, columns: &[ColumnSpec]) -> Result<()> {
        if self.relations.contains_key(rel_name) {
            return Err(DbError::RelAlreadyExists(rel_name.to_string()));
        }

        let mut attrs = Vec::with_capacity(columns.len());
        let mut offset = 0usize;
        for col in columns {
            let len = physical_len(col.attr_type, col.attr_len);
            attrs.push(AttrDesc {
                rel_name: rel_name.to_string(),
                attr_name: col.name.clone(),
                attr_type: col.attr_type,
                attr_len: len,
                attr_offset: offset,
            });
            offset += len;
        }

        self.relations.insert(
            rel_name.to_string(),
            RelDesc {
                rel_name: rel_name.to_string(),
                attr_cnt: attrs.len(),
                rec_len: offset,
            },
        );
        self.attributes.insert(rel_name.to_string(), attrs);
        Ok(())
    }

    /// `relCat.getInfo` equivalent.
    pub fn get_rel_desc(&self, rel_name: &str) -> Result<&RelDesc> {
        self.relations
            .get(rel_name)
            .ok_or_else(|| DbError::RelNotFound(rel_name.to_string()))
    }

    /// `attrCat.getInfo(rel, attr)` equivalent.
    pub fn get_attr_info(&self, rel_name: &str, attr_name: &str) -> Result<&AttrDesc> {
        self.attributes
            .get(rel_name)
            .ok_or_else(|| DbError::RelNotFound(rel_name.to_string()))?
            .iter()
            .find(|a| a.attr_name == attr_name)
            .ok_or_else(|| DbError::AttrNotFound(attr_name.to_string()))
    }

    /// `attrCat.getRelInfo(rel)` equivalent: every attribute of `rel_name`
    /// in registration order.
    pub fn get_rel_info(&self, rel_name: &str) -> Result<&[AttrDesc]> {
        self.attributes
            .get(rel_name)
            .map(|v| v.as_slice())
            .ok_or_else(|| DbError::RelNotFound(rel_name.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accumulate_in_declaration_order() {
        let mut cat = Catalog::new();
        cat.create_relation(
            "R",
            &[
                ColumnSpec::new("id", AttrType::Integer, 0),
                ColumnSpec::new("name", AttrType::String, 10),
            ],
        )
        .unwrap();

        let id = cat.get_attr_info("R", "id").unwrap();
        let name = cat.get_attr_info("R", "name").unwrap();
        assert_eq!(id.attr_offset, 0);
        assert_eq!(id.attr_len, 4);
        assert_eq!(name.attr_offset, 4);
        assert_eq!(name.attr_len, 10);

        let rel = cat.get_rel_desc("R").unwrap();
        assert_eq!(rel.rec_len, 14);
        assert_eq!(rel.attr_cnt, 2);
    }

    #[test]
    fn duplicate_relation_fails() {
        let mut cat = Catalog::new();
        cat.create_relation("R", &[]).unwrap();
        assert!(matches!(
            cat.create_relation("R", &[]),
            Err(DbError::RelAlreadyExists(_))
        ));
    }

    #[test]
    fn unknown_attribute_fails() {
        let mut cat = Catalog::new();
        cat.create_relation("R", &[ColumnSpec::new("id", AttrType::Integer, 0)])
            .unwrap();
        assert!(matches!(
            cat.get_attr_info("R", "missing"),
            Err(DbError::AttrNotFound(_))
        ));
    }

    #[test]
    fn unknown_relation_fails() {
        let cat = Catalog::new();
        assert!(matches!(
            cat.get_rel_info("Nope"),
            Err(DbError::RelNotFound(_))
        ));
    }
}
