//! `HeapFile`: random-access-by-`RID` collection of records stored as a
//! singly-linked list of data pages with a header page. Grounded on
//! `original_source/CS564_stage4/heapfile.C`'s `HeapFile` constructor/
//! destructor/`getRecord`, restructured per `spec.md` §9's "thread an
//! explicit context" note: there is no process-wide `bufMgr`/`db` singleton
//! here, each `HeapFile` is handed its buffer manager and backing file
//! explicitly at construction.

use std::cell::RefCell;
use std::rc::Rc;

use crate::buffer::{BufMgr, PageGuard};
use crate::common::{DbError, PageNo, Result, Rid, FILENAME_FIELD_WIDTH};
use crate::storage::{Db, File};

use super::header::FileHdrPage;

/// Creates a new heap file named `name`. A no-op returning success if the
/// file already exists, per `spec.md` §4.3.1.
pub fn create_heap_file(bm: &mut BufMgr, name: &str) -> Result<()> {
    use std::path::Path;
    if Path::new(name).exists() {
        return Ok(());
    }

    Db::create_file(name)?;
    let file = Rc::new(RefCell::new(Db::open_file(name)?));

    let (hdr_page_no, mut hdr_guard) = bm.alloc_page(&file)?;
    let (data_page_no, mut data_guard) = bm.alloc_page(&file)?;
    data_guard.page_mut().init(data_page_no);

    {
        let mut page = hdr_guard.page_mut();
        FileHdrPage::write(
            &mut page.data,
            &name[..name.len().min(FILENAME_FIELD_WIDTH)],
            data_page_no,
            data_page_no,
            1,
            0,
        );
    }

    hdr_guard.unpin(true);
    data_guard.unpin(true);
    let _ = hdr_page_no;
    Ok(())
}

/// An open heap file: its header page and current data page are pinned for
/// the file's entire lifetime (`spec.md` §5's "two long-lived pins").
pub struct HeapFile {
    file: Rc<RefCell<File>>,
    hdr_page_no: PageNo,
    hdr_guard: Option<PageGuard>,
    hdr_dirty: bool,

    cur_page: Option<PageGuard>,
    cur_page_no: PageNo,
    cur_dirty: bool,
    cur_rec: Rid,
}

impl HeapFile {
    /// Opens an existing heap file, pinning its header and first data page.
    pub fn open(bm: &mut BufMgr, name: &str) -> Result<Self> {
        let file = Rc::new(RefCell::new(Db::open_file(name)?));
        let hdr_page_no = file.borrow().get_first_page()?;
        let hdr_guard = bm.read_page(&file, hdr_page_no)?;
        let first_data_page = FileHdrPage::first_page(&hdr_guard.page().data);

        let cur_guard = match bm.read_page(&file, first_data_page) {
            Ok(g) => g,
            Err(e) => {
                hdr_guard.unpin(false);
                return Err(e);
            }
        };

        Ok(Self {
            file,
            hdr_page_no,
            hdr_guard: Some(hdr_guard),
            hdr_dirty: false,
            cur_page: Some(cur_guard),
            cur_page_no: first_data_page,
            cur_dirty: false,
            cur_rec: crate::common::NULL_RID,
        })
    }

    pub fn file(&self) -> &Rc<RefCell<File>> {
        &self.file
    }

    pub fn rec_cnt(&self) -> i32 {
        FileHdrPage::rec_cnt(&self.hdr_guard().page().data)
    }

    fn hdr_guard(&self) -> &PageGuard {
        self.hdr_guard.as_ref().expect("heap file always holds its header pin while open")
    }

    pub(crate) fn hdr_bytes_mut(&mut self) -> std::cell::RefMut<'_, crate::storage::Page> {
        self.hdr_dirty = true;
        self.hdr_guard.as_mut().expect("heap file always holds its header pin while open").page_mut()
    }

    pub(crate) fn mark_hdr_dirty(&mut self) {
        self.hdr_dirty = true;
    }

    pub(crate) fn bm_file(&self) -> Rc<RefCell<File>> {
        self.file.clone()
    }

    /// Moves the cursor to `page_no`, pinning it as the new current page
    /// and unpinning the old one first (`spec.md` §1.1's required
    /// unpin-before-pin ordering at page-boundary crossings).
    pub(crate) fn move_to_page(&mut self, bm: &mut BufMgr, page_no: PageNo) -> Result<()> {
        if self.cur_page_no == page_no && self.cur_page.is_some() {
            return Ok(());
        }
        if let Some(guard) = self.cur_page.take() {
            guard.unpin(self.cur_dirty);
        }
        let guard = bm.read_page(&self.file, page_no)?;
        self.cur_page = Some(guard);
        self.cur_page_no = page_no;
        self.cur_dirty = false;
        Ok(())
    }

    pub(crate) fn cur_page(&self) -> &PageGuard {
        self.cur_page.as_ref().expect("heap file cursor always holds a pinned page")
    }

    pub(crate) fn cur_page_mut(&mut self) -> &mut PageGuard {
        self.cur_dirty = true;
        self.cur_page.as_mut().expect("heap file cursor always holds a pinned page")
    }

    pub(crate) fn cur_page_no(&self) -> PageNo {
        self.cur_page_no
    }

    pub(crate) fn cur_rec(&self) -> Rid {
        self.cur_rec
    }

    pub(crate) fn set_cur_rec(&mut self, rid: Rid) {
        self.cur_rec = rid;
    }

    pub(crate) fn set_cur_dirty(&mut self, dirty: bool) {
        self.cur_dirty = dirty;
    }

    pub(crate) fn cur_dirty(&self) -> bool {
        self.cur_dirty
    }

    /// `getRecord`: reads `rid`, moving the cursor there first if needed.
    pub fn get_record(&mut self, bm: &mut BufMgr, rid: Rid) -> Result<Vec<u8>> {
        if rid.page_no < 0 || rid.slot_no < 0 {
            return Err(DbError::BadRID(rid));
        }
        if self.cur_page_no != rid.page_no {
            self.move_to_page(bm, rid.page_no)?;
        }
        let rec = self.cur_page().page().get_record(rid)?.to_vec();
        self.cur_rec = rid;
        Ok(rec)
    }

    /// Closes the heap file: unpins both long-lived pages with their
    /// respective dirty flags. Errors are logged, never propagated — this
    /// mirrors the source's destructor, which cannot fail (`spec.md`
    /// §4.3.4).
    pub fn close(mut self, bm: &mut BufMgr) {
        if let Some(guard) = self.cur_page.take() {
            guard.unpin(self.cur_dirty);
        }
        if let Some(guard) = self.hdr_guard.take() {
            guard.unpin(self.hdr_dirty);
        }
        let _ = bm;
        let _ = self.hdr_page_no;
    }
}
