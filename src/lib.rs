//! clockbase - a teaching-grade relational storage engine
//!
//! Three layers, leaves first:
//!
//! - **Hash directory** (`hashdir`): maps `(file, pageNo)` to a buffer
//!   frame index.
//! - **Buffer manager** (`buffer`): a fixed pool of page-sized frames with
//!   clock (second-chance) replacement, served through RAII `PageGuard`s.
//! - **Heap file & scans** (`heapfile`): `HeapFile` (random access by
//!   `RID`), `HeapFileScan` (forward scan with optional predicate, mark/
//!   reset, in-place delete), `InsertFileScan` (append with page
//!   allocation on overflow).
//! - **Catalog** (`catalog`): an in-memory relation/attribute metadata
//!   registry.
//! - **Query executor** (`executor`): `select`/`insert`/`delete` gluing the
//!   above together behind an explicit `Engine` context, in place of the
//!   originating system's process-wide singletons.
//!
//! Concurrency across OS threads, transactions, crash recovery, indexes,
//! query optimization, and multi-relation joins are out of scope — this is
//! a single-threaded, cooperative engine (see `common` for the shared
//! types and error set all layers build on).
//!
//! # Example
//!
//! ```rust,no_run
//! use clockbase::executor::{insert, select, AttrValue, Engine, FilterAttr, ProjAttr};
//! use clockbase::catalog::{AttrType, ColumnSpec, Op};
//!
//! let mut engine = Engine::new(10);
//! engine
//!     .catalog
//!     .create_relation(
//!         "people",
//!         &[
//!             ColumnSpec::new("id", AttrType::Integer, 0),
//!             ColumnSpec::new("name", AttrType::String, 10),
//!         ],
//!     )
//!     .unwrap();
//!
//! insert(
//!     &mut engine,
//!     "people",
//!     &[AttrValue::new("id", "7"), AttrValue::new("name", "alice")],
//! )
//! .unwrap();
//!
//! select(
//!     &mut engine,
//!     "names",
//!     &[ProjAttr::new("people", "name")],
//!     None::<&FilterAttr>,
//! )
//! .unwrap();
//! ```

pub mod buffer;
pub mod catalog;
pub mod common;
pub mod executor;
pub mod hashdir;
pub mod heapfile;
pub mod storage;

pub use common::{DbError, Result, Rid};
