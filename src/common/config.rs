//! Construction-time constants. There is no runtime config layer: buffer
//! pool size and page size are fixed at construction, matching the
//! underlying teaching system's treatment of these as compile/construct-time
//! parameters rather than deployment configuration.

/// Size of a page in bytes.
pub const PAGE_SIZE: usize = 4096;

/// Fixed header size reserved on every page for slot-directory bookkeeping
/// and the next-page link. Records must fit within `PAGE_SIZE - DPFIXED`.
pub const DPFIXED: usize = 16;

/// Sentinel page number meaning "no such page" (end of list, absent header
/// pointer, etc).
pub const INVALID_PAGE_NO: i32 = -1;

/// Default number of frames in a freshly constructed buffer pool.
pub const DEFAULT_BUFFER_POOL_SIZE: usize = 10;

/// Width, in bytes, of the `fileName` field stored in a heap file's header
/// page. Names longer than this are truncated at `createHeapFile` time.
pub const FILENAME_FIELD_WIDTH: usize = 64;

/// Computes the chained hash-directory bucket count for a buffer pool of
/// `num_bufs` frames: `((num_bufs * 1.2) as int) + 1`, the same formula the
/// original buffer manager uses to size its hash table.
pub fn hash_table_size(num_bufs: usize) -> usize {
    (((num_bufs as f64) * 1.2) as usize) + 1
}
