//! Per-frame descriptor plus its backing page bytes — `BufDesc` and the
//! corresponding slot of `bufPool` from `spec.md` §3, merged into one
//! struct since nothing else addresses frame bytes independently of their
//! descriptor in this single-threaded engine. Grounded on the teacher's
//! `buffer/frame_header.rs`, with the atomics and `RwLock`s stripped: there
//! is exactly one cooperative thread of control here, so plain fields
//! suffice.

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::{FrameNo, PageNo, INVALID_PAGE_NO};
use crate::storage::{File, Page};

/// One buffer-pool frame: its descriptor fields plus the page it currently
/// holds (valid or not).
pub struct Frame {
    pub frame_no: FrameNo,
    pub file: Option<Rc<RefCell<File>>>,
    pub page_no: PageNo,
    pub pin_cnt: u32,
    pub dirty: bool,
    pub valid: bool,
    pub refbit: bool,
    pub page: Page,
}

impl Frame {
    pub fn new(frame_no: FrameNo) -> Self {
        Self {
            frame_no,
            file: None,
            page_no: INVALID_PAGE_NO,
            pin_cnt: 0,
            dirty: false,
            valid: false,
            refbit: false,
            page: Page::zeroed(),
        }
    }

    /// Populates the descriptor for a freshly loaded page, per the
    /// original `BufDesc::Set`.
    pub fn set(&mut self, file: Rc<RefCell<File>>, page_no: PageNo) {
        self.file = Some(file);
        self.page_no = page_no;
        self.pin_cnt = 1;
        self.dirty = false;
        self.valid = true;
        self.refbit = true;
    }

    /// Resets the descriptor to its empty state, per `BufDesc::Clear`.
    pub fn clear(&mut self) {
        self.file = None;
        self.page_no = INVALID_PAGE_NO;
        self.pin_cnt = 0;
        self.dirty = false;
        self.valid = false;
        self.refbit = false;
    }

    /// True if this frame currently belongs to `file` (by handle identity).
    pub fn belongs_to(&self, file: &Rc<RefCell<File>>) -> bool {
        match &self.file {
            Some(f) => Rc::ptr_eq(f, file),
            None => false,
        }
    }
}
