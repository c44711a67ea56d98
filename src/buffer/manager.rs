//! The clock-replacement buffer manager. Grounded on the teacher's
//! `buffer/buffer_pool_manager.rs` for overall shape (a fixed `Vec` of
//! frames plus a hash directory) but with the LRU-K replacer
//! (`buffer/lru_k_replacer.rs`) replaced by the mandatory clock sweep of
//! `spec.md` §4.2, and every `parking_lot`/`Arc`/atomic dropped in favor of
//! plain fields behind `Rc<RefCell<_>>` — this engine serves one
//! cooperative caller at a time (`spec.md` §5).
//!
//! Exact algorithm grounded on `examples/original_source/CS564_stage3/buf.C`.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::common::{DbError, FrameNo, PageNo, Result, PAGE_SIZE};
use crate::storage::{File, Page};

use super::frame::Frame;
use super::guard::PageGuard;
use crate::hashdir::HashDirectory;

pub struct BufMgr {
    frames: Vec<Rc<RefCell<Frame>>>,
    hash: HashDirectory,
    clock_hand: usize,
}

impl BufMgr {
    /// Creates a buffer pool of `num_bufs` frames, all initially empty.
    pub fn new(num_bufs: usize) -> Self {
        assert!(num_bufs > 0, "buffer pool must have at least one frame");
        let frames = (0..num_bufs).map(|i| Rc::new(RefCell::new(Frame::new(i)))).collect();
        Self {
            frames,
            hash: HashDirectory::new(num_bufs),
            clock_hand: num_bufs - 1,
        }
    }

    pub fn num_bufs(&self) -> usize {
        self.frames.len()
    }

    /// Selects a victim frame via the clock (second-chance) algorithm.
    fn alloc_buf(&mut self) -> Result<FrameNo> {
        let num_bufs = self.frames.len();
        loop {
            let mut attempts = 0;
            let mut cleared_ref_bits = false;

            while attempts < num_bufs {
                self.clock_hand = (self.clock_hand + 1) % num_bufs;
                let frame_rc = self.frames[self.clock_hand].clone();

                {
                    let frame = frame_rc.borrow();
                    if !frame.valid {
                        trace!("alloc_buf: frame {} is free", self.clock_hand);
                        return Ok(self.clock_hand);
                    }
                    if frame.pin_cnt > 0 {
                        attempts += 1;
                        continue;
                    }
                    if frame.refbit {
                        drop(frame);
                        frame_rc.borrow_mut().refbit = false;
                        cleared_ref_bits = true;
                        attempts += 1;
                        continue;
                    }
                }

                // Candidate victim: unpinned, refbit already cleared.
                let (needs_writeback, file, page_no) = {
                    let frame = frame_rc.borrow();
                    (frame.dirty, frame.file.clone(), frame.page_no)
                };
                if needs_writeback {
                    let file = file.expect("dirty frame must have an owning file");
                    debug!("alloc_buf: writing back dirty page {} from frame {}", page_no, self.clock_hand);
                    let frame = frame_rc.borrow();
                    file.borrow_mut().write_page(page_no, &frame.page.data)?;
                    drop(frame);
                    frame_rc.borrow_mut().dirty = false;
                }

                let file_id = frame_rc.borrow().file.as_ref().map(|f| f.borrow().id());
                if let Some(file_id) = file_id {
                    self.hash.remove(file_id, page_no)?;
                }
                frame_rc.borrow_mut().clear();
                return Ok(self.clock_hand);
            }

            if cleared_ref_bits {
                continue;
            }
            return Err(DbError::BufferExceeded);
        }
    }

    /// Pins and returns page `page_no` of `file`, loading it from disk if
    /// it is not already resident.
    pub fn read_page(&mut self, file: &Rc<RefCell<File>>, page_no: PageNo) -> Result<PageGuard> {
        let file_id = file.borrow().id();

        if let Ok(frame_no) = self.hash.lookup(file_id, page_no) {
            let frame_rc = self.frames[frame_no].clone();
            {
                let mut frame = frame_rc.borrow_mut();
                frame.pin_cnt += 1;
                frame.refbit = true;
            }
            return Ok(PageGuard::new(frame_rc, page_no));
        }

        let frame_no = self.alloc_buf()?;
        let mut bytes = [0u8; PAGE_SIZE];
        file.borrow_mut().read_page(page_no, &mut bytes)?;

        {
            let mut frame = self.frames[frame_no].borrow_mut();
            frame.page = Page::from_bytes(bytes);
            frame.set(file.clone(), page_no);
        }
        self.hash.insert(file_id, page_no, frame_no)?;

        Ok(PageGuard::new(self.frames[frame_no].clone(), page_no))
    }

    /// Unpins `page_no`, optionally marking it dirty. Provided for parity
    /// with `spec.md`'s named interface and for tests that want to exercise
    /// pin-discipline errors directly; ordinary callers should prefer
    /// letting a `PageGuard` go out of scope.
    pub fn unpin_page(&mut self, file: &Rc<RefCell<File>>, page_no: PageNo, dirty: bool) -> Result<()> {
        let file_id = file.borrow().id();
        let frame_no = self.hash.lookup(file_id, page_no)?;
        let mut frame = self.frames[frame_no].borrow_mut();
        if frame.pin_cnt == 0 {
            return Err(DbError::PageNotPinned);
        }
        frame.pin_cnt -= 1;
        if dirty {
            frame.dirty = true;
        }
        Ok(())
    }

    /// Allocates a fresh on-disk page in `file` and pins it. The frame's
    /// bytes are whatever the reused frame last held — callers that need a
    /// zeroed/initialized page must call `page_mut().init(page_no)`.
    pub fn alloc_page(&mut self, file: &Rc<RefCell<File>>) -> Result<(PageNo, PageGuard)> {
        let page_no = file.borrow_mut().allocate_page()?;
        let frame_no = self.alloc_buf()?;
        self.hash.insert(file.borrow().id(), page_no, frame_no)?;
        {
            let mut frame = self.frames[frame_no].borrow_mut();
            frame.set(file.clone(), page_no);
        }
        Ok((page_no, PageGuard::new(self.frames[frame_no].clone(), page_no)))
    }

    /// Discards a page from the buffer pool (without write-back, even if
    /// dirty) and deallocates it on disk. Callers assert the page's
    /// contents are no longer wanted.
    pub fn dispose_page(&mut self, file: &Rc<RefCell<File>>, page_no: PageNo) -> Result<()> {
        let file_id = file.borrow().id();
        if let Ok(frame_no) = self.hash.lookup(file_id, page_no) {
            self.frames[frame_no].borrow_mut().clear();
        }
        let _ = self.hash.remove(file_id, page_no);
        file.borrow_mut().dispose_page(page_no)
    }

    /// Writes back every dirty frame belonging to `file` and evicts them
    /// from the pool. Fails with `PagePinned` if any matching frame still
    /// has outstanding pins.
    pub fn flush_file(&mut self, file: &Rc<RefCell<File>>) -> Result<()> {
        let file_id = file.borrow().id();

        for frame_no in 0..self.frames.len() {
            let frame_rc = self.frames[frame_no].clone();

            let matches = {
                let f = frame_rc.borrow();
                f.valid && f.file.as_ref().map(|ff| ff.borrow().id() == file_id).unwrap_or(false)
            };
            if !matches {
                continue;
            }

            let (pin_cnt, dirty, page_no) = {
                let f = frame_rc.borrow();
                (f.pin_cnt, f.dirty, f.page_no)
            };
            if pin_cnt > 0 {
                return Err(DbError::PagePinned);
            }
            if dirty {
                let f = frame_rc.borrow();
                file.borrow_mut().write_page(page_no, &f.page.data)?;
                drop(f);
                frame_rc.borrow_mut().dirty = false;
            }

            self.hash.remove(file_id, page_no)?;
            frame_rc.borrow_mut().clear();
        }
        Ok(())
    }
}

impl Drop for BufMgr {
    /// Writes back every valid, dirty frame. Does not require pin counts
    /// to be zero (teaching-grade best effort, per `spec.md` §4.2.7); a
    /// frame still pinned at shutdown is logged rather than treated as
    /// fatal.
    fn drop(&mut self) {
        for frame_rc in &self.frames {
            let frame = frame_rc.borrow();
            if frame.valid && frame.dirty {
                if let Some(file) = &frame.file {
                    if let Err(e) = file.borrow_mut().write_page(frame.page_no, &frame.page.data) {
                        warn!("BufMgr::drop: failed to flush frame {}: {}", frame.frame_no, e);
                    }
                }
            }
            if frame.pin_cnt > 0 {
                warn!(
                    "BufMgr::drop: frame {} dropped with {} outstanding pin(s) on page {}",
                    frame.frame_no, frame.pin_cnt, frame.page_no
                );
            }
        }
    }
}
