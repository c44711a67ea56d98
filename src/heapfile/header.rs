//! The heap file's first page: `FileHdrPage` from `spec.md` §3, serialized
//! into the same fixed-size `Page` type everything else uses (its own
//! header/slot-directory region is simply unused). Grounded on the
//! teacher's `storage/page/table_page.rs` header-field pattern, fields
//! renamed to match `original_source/CS564_stage4/heapfile.C`'s
//! `FileHdrPage`.

use crate::common::{FILENAME_FIELD_WIDTH, PageNo};

const FILE_NAME_OFFSET: usize = 0;
const FIRST_PAGE_OFFSET: usize = FILE_NAME_OFFSET + FILENAME_FIELD_WIDTH;
const LAST_PAGE_OFFSET: usize = FIRST_PAGE_OFFSET + 4;
const PAGE_CNT_OFFSET: usize = LAST_PAGE_OFFSET + 4;
const REC_CNT_OFFSET: usize = PAGE_CNT_OFFSET + 4;
pub(crate) const HEADER_PAYLOAD_SIZE: usize = REC_CNT_OFFSET + 4;

/// A view over the header page's bytes. Carries no page of its own; callers
/// read/write through a `PageGuard`'s raw bytes via `raw()`/`raw_mut()`.
pub struct FileHdrPage;

impl FileHdrPage {
    pub fn write(
        bytes: &mut [u8],
        file_name: &str,
        first_page: PageNo,
        last_page: PageNo,
        page_cnt: i32,
        rec_cnt: i32,
    ) {
        let name_bytes = file_name.as_bytes();
        let n = name_bytes.len().min(FILENAME_FIELD_WIDTH);
        bytes[FILE_NAME_OFFSET..FILE_NAME_OFFSET + FILENAME_FIELD_WIDTH].fill(0);
        bytes[FILE_NAME_OFFSET..FILE_NAME_OFFSET + n].copy_from_slice(&name_bytes[..n]);
        bytes[FIRST_PAGE_OFFSET..FIRST_PAGE_OFFSET + 4].copy_from_slice(&first_page.to_le_bytes());
        bytes[LAST_PAGE_OFFSET..LAST_PAGE_OFFSET + 4].copy_from_slice(&last_page.to_le_bytes());
        bytes[PAGE_CNT_OFFSET..PAGE_CNT_OFFSET + 4].copy_from_slice(&page_cnt.to_le_bytes());
        bytes[REC_CNT_OFFSET..REC_CNT_OFFSET + 4].copy_from_slice(&rec_cnt.to_le_bytes());
    }

    pub fn file_name(bytes: &[u8]) -> String {
        let raw = &bytes[FILE_NAME_OFFSET..FILE_NAME_OFFSET + FILENAME_FIELD_WIDTH];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }

    pub fn first_page(bytes: &[u8]) -> PageNo {
        i32::from_le_bytes(bytes[FIRST_PAGE_OFFSET..FIRST_PAGE_OFFSET + 4].try_into().unwrap())
    }

    pub fn last_page(bytes: &[u8]) -> PageNo {
        i32::from_le_bytes(bytes[LAST_PAGE_OFFSET..LAST_PAGE_OFFSET + 4].try_into().unwrap())
    }

    pub fn set_last_page(bytes: &mut [u8], page_no: PageNo) {
        bytes[LAST_PAGE_OFFSET..LAST_PAGE_OFFSET + 4].copy_from_slice(&page_no.to_le_bytes());
    }

    pub fn page_cnt(bytes: &[u8]) -> i32 {
        i32::from_le_bytes(bytes[PAGE_CNT_OFFSET..PAGE_CNT_OFFSET + 4].try_into().unwrap())
    }

    pub fn set_page_cnt(bytes: &mut [u8], cnt: i32) {
        bytes[PAGE_CNT_OFFSET..PAGE_CNT_OFFSET + 4].copy_from_slice(&cnt.to_le_bytes());
    }

    pub fn rec_cnt(bytes: &[u8]) -> i32 {
        i32::from_le_bytes(bytes[REC_CNT_OFFSET..REC_CNT_OFFSET + 4].try_into().unwrap())
    }

    pub fn set_rec_cnt(bytes: &mut [u8], cnt: i32) {
        bytes[REC_CNT_OFFSET..REC_CNT_OFFSET + 4].copy_from_slice(&cnt.to_le_bytes());
    }
}
