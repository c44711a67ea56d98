//! RAII handle over a pinned frame. Grounded on the teacher's
//! `buffer/page_guard.rs` `ReadPageGuard`/`WritePageGuard` pair, collapsed
//! into a single type: this engine is single-threaded (per `spec.md` §5,
//! no internal locking), so there is no reader/writer distinction to
//! enforce and no need for the teacher's `unsafe` lifetime transmute that
//! exists solely to let a guard outlive a borrow of a `parking_lot` lock —
//! here the guard simply shares ownership of the frame via `Rc<RefCell<_>>`.
//!
//! Per the design note in `spec.md` §9, this is the "scoped handle that
//! auto-unpins on drop and carries a dirty flag setter" the raw
//! `readPage`/`allocPage` pointer return should be wrapped in.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::common::PageNo;
use crate::storage::Page;

use super::frame::Frame;

pub struct PageGuard {
    frame: Rc<RefCell<Frame>>,
    page_no: PageNo,
    dirty_on_drop: bool,
}

impl PageGuard {
    pub(crate) fn new(frame: Rc<RefCell<Frame>>, page_no: PageNo) -> Self {
        Self {
            frame,
            page_no,
            dirty_on_drop: false,
        }
    }

    pub fn page_no(&self) -> PageNo {
        self.page_no
    }

    /// Borrows the page for reading.
    pub fn page(&self) -> Ref<'_, Page> {
        Ref::map(self.frame.borrow(), |f| &f.page)
    }

    /// Borrows the page for writing. Does not by itself mark the frame
    /// dirty — callers track their own dirty-flag discipline (the
    /// heap-file layer's `curDirtyFlag`) and call `set_dirty`/`unpin`
    /// explicitly, matching `spec.md`'s description of dirty tracking as
    /// cursor state rather than an automatic side effect of mutation.
    pub fn page_mut(&mut self) -> RefMut<'_, Page> {
        RefMut::map(self.frame.borrow_mut(), |f| &mut f.page)
    }

    /// Sets whether this pin should be reported dirty when it is released.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty_on_drop = dirty;
    }

    /// Releases the pin immediately with the given dirty flag, instead of
    /// waiting for the guard to go out of scope. Useful where a caller
    /// needs the unpin to happen strictly before some other operation that
    /// might itself need a free frame (see the heap-file cursor's
    /// unpin-then-pin ordering at page-boundary crossings).
    pub fn unpin(mut self, dirty: bool) {
        self.dirty_on_drop = dirty;
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        let mut frame = self.frame.borrow_mut();
        if self.dirty_on_drop {
            frame.dirty = true;
        }
        frame.pin_cnt = frame.pin_cnt.saturating_sub(1);
    }
}
