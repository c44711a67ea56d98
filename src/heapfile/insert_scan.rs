//! `InsertFileScan`: appends records at the heap file's tail, allocating
//! and linking a new page on overflow. Grounded on
//! `original_source/CS564_stage4/heapfile.C`'s `InsertFileScan::insertRecord`.

use crate::buffer::BufMgr;
use crate::common::{DbError, Result, Rid, DPFIXED, PAGE_SIZE};

use super::header::FileHdrPage;
use super::heap_file::HeapFile;

pub struct InsertFileScan<'a> {
    heap: &'a mut HeapFile,
}

impl<'a> InsertFileScan<'a> {
    pub fn new(heap: &'a mut HeapFile) -> Self {
        Self { heap }
    }

    /// Inserts `rec`, returning its `RID`. Allocates and links a fresh page
    /// if the current tail page has no room (`spec.md` §4.5.1).
    pub fn insert_record(&mut self, bm: &mut BufMgr, rec: &[u8]) -> Result<Rid> {
        if rec.len() > PAGE_SIZE - DPFIXED {
            return Err(DbError::InvalidRecLen {
                len: rec.len(),
                capacity: PAGE_SIZE - DPFIXED,
            });
        }

        let last_page = FileHdrPage::last_page(&self.heap.hdr_bytes_mut().data);
        if self.heap.cur_page_no() != last_page {
            self.heap.move_to_page(bm, last_page)?;
        }

        match self.heap.cur_page_mut().page_mut().insert_record(rec) {
            Ok(rid) => {
                self.bump_rec_cnt();
                Ok(rid)
            }
            Err(DbError::NoSpace) => {
                let (new_page_no, mut new_guard) = bm.alloc_page(self.heap.file())?;
                new_guard.page_mut().init(new_page_no);
                new_guard.unpin(true);

                self.heap.cur_page_mut().page_mut().set_next_page(new_page_no);
                self.heap.move_to_page(bm, new_page_no)?;

                {
                    let mut hdr = self.heap.hdr_bytes_mut();
                    FileHdrPage::set_last_page(&mut hdr.data, new_page_no);
                    let page_cnt = FileHdrPage::page_cnt(&hdr.data) + 1;
                    FileHdrPage::set_page_cnt(&mut hdr.data, page_cnt);
                }

                let rid = self.heap.cur_page_mut().page_mut().insert_record(rec)?;
                self.bump_rec_cnt();
                Ok(rid)
            }
            Err(e) => Err(e),
        }
    }

    fn bump_rec_cnt(&mut self) {
        let rec_cnt = FileHdrPage::rec_cnt(&self.heap.hdr_bytes_mut().data) + 1;
        FileHdrPage::set_rec_cnt(&mut self.heap.hdr_bytes_mut().data, rec_cnt);
    }
}
