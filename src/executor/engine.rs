//! `Engine`: the explicit context `spec.md` §9 calls for in place of the
//! source's process-wide `bufMgr`/`db`/`relCat`/`attrCat` singletons.
//! Construction order mirrors the source: directory access is implicit
//! (paged files are opened per-heap-file), buffer manager first, catalog
//! second.

use crate::buffer::BufMgr;
use crate::catalog::Catalog;

/// Owns the buffer manager and catalog for one database session. Every
/// query entry point (`select`/`insert`/`delete`) takes an `&mut Engine`
/// rather than reaching for ambient global state.
pub struct Engine {
    pub bm: BufMgr,
    pub catalog: Catalog,
}

impl Engine {
    pub fn new(num_bufs: usize) -> Self {
        Self {
            bm: BufMgr::new(num_bufs),
            catalog: Catalog::new(),
        }
    }
}
