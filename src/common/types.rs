use std::fmt;

/// A unique handle identifying an open file. Two `openFile` calls against the
/// same name on disk yield distinct `FileId`s — identity is by handle, not
/// by name, matching the hash directory's "pointer identity of `file`"
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

/// Page number within a file. Non-negative; `-1` is reserved as the
/// "no such page" sentinel used for end-of-list and "no current page"
/// markers.
pub type PageNo = i32;

/// Index of a buffer frame in the pool.
pub type FrameNo = usize;

/// Slot number within a page's slot directory.
pub type SlotNo = i32;

/// Record identifier: a `(pageNo, slotNo)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rid {
    pub page_no: PageNo,
    pub slot_no: SlotNo,
}

impl Rid {
    pub const fn new(page_no: PageNo, slot_no: SlotNo) -> Self {
        Self { page_no, slot_no }
    }

    pub fn is_null(&self) -> bool {
        *self == NULL_RID
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page_no, self.slot_no)
    }
}

/// Sentinel meaning "no current record".
pub const NULL_RID: Rid = Rid::new(-1, -1);
