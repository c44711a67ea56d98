use thiserror::Error;

use super::types::Rid;

/// The closed set of status values the engine can return. `OK` is modeled
/// as `Ok(T)` rather than a variant here — every fallible operation returns
/// `Result<T>`.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("all buffer frames are pinned, cannot allocate a victim")]
    BufferExceeded,

    #[error("hash directory error: {0}")]
    HashTblError(&'static str),

    #[error("unpin against a frame with pinCnt <= 0")]
    PageNotPinned,

    #[error("flushFile with outstanding pins against the file")]
    PagePinned,

    #[error("internal inconsistency: invalid frame claims a file")]
    BadBuffer,

    #[error("I/O error: {0}")]
    UnixErr(#[from] std::io::Error),

    #[error("malformed record id {0}")]
    BadRID(Rid),

    #[error("invalid scan argument combination: {0}")]
    BadScanParm(&'static str),

    #[error("record of length {len} exceeds page capacity {capacity}")]
    InvalidRecLen { len: usize, capacity: usize },

    #[error("page has no space for the record")]
    NoSpace,

    #[error("no more records on this page")]
    EndOfPage,

    #[error("page holds no records")]
    NoRecords,

    #[error("scan exhausted")]
    FileEOF,

    #[error("attribute {0:?} not found")]
    AttrNotFound(String),

    #[error("relation {0:?} not found")]
    RelNotFound(String),

    #[error("relation {0:?} already exists")]
    RelAlreadyExists(String),

    #[error("attribute count mismatch: relation has {expected}, got {actual}")]
    AttrCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DbError>;
