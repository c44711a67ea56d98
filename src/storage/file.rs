//! The paged-file layer: `Db` (the database directory) and `File` (a single
//! on-disk paged file). Treated by `spec.md` as an external collaborator
//! the core merely consumes — this is a from-scratch, intentionally thin
//! reimplementation grounded on the teacher's `storage/disk/disk_manager.rs`
//! read/write/allocate pattern, stripped of its multi-segment extent
//! allocator and async disk scheduler (neither of which this single-
//! threaded, single-file-per-relation engine needs).

use std::fs::{File as FsFile, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::{DbError, FileId, PageNo, Result, PAGE_SIZE};

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

fn fresh_file_id() -> FileId {
    FileId(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
}

/// The database directory: creates, opens, closes, and destroys named
/// paged files on disk.
pub struct Db;

impl Db {
    /// Creates a new, empty paged file. Fails if `name` already exists.
    pub fn create_file(name: impl AsRef<Path>) -> Result<()> {
        let name = name.as_ref();
        if name.exists() {
            return Err(DbError::UnixErr(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("file {:?} already exists", name),
            )));
        }
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(name)?;
        Ok(())
    }

    /// Opens an existing paged file, returning a fresh handle. Two opens of
    /// the same name yield distinct `File`s with distinct identity.
    pub fn open_file(name: impl AsRef<Path>) -> Result<File> {
        let path = name.as_ref().to_path_buf();
        let fd = OpenOptions::new().read(true).write(true).open(&path)?;
        let len = fd.metadata()?.len();
        let num_pages = (len as usize) / PAGE_SIZE;
        Ok(File {
            id: fresh_file_id(),
            path,
            fd,
            num_pages,
        })
    }

    /// Closes a file handle. A no-op beyond dropping it — there is no
    /// buffering at this layer to flush.
    pub fn close_file(_file: File) -> Result<()> {
        Ok(())
    }

    /// Removes a paged file from disk entirely.
    pub fn destroy_file(name: impl AsRef<Path>) -> Result<()> {
        std::fs::remove_file(name)?;
        Ok(())
    }
}

/// A single open paged file. Identity (`id`) is assigned per open handle,
/// not derived from the path, so the hash directory's "pointer identity of
/// file" contract holds even across repeated opens of one name.
pub struct File {
    id: FileId,
    path: PathBuf,
    fd: FsFile,
    num_pages: usize,
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for File {}

impl File {
    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn offset_of(&self, page_no: PageNo) -> u64 {
        (page_no as u64) * (PAGE_SIZE as u64)
    }

    /// Reads page `page_no` into `buf`, which must be exactly `PAGE_SIZE`
    /// bytes.
    pub fn read_page(&mut self, page_no: PageNo, buf: &mut [u8; PAGE_SIZE]) -> Result<()> {
        self.fd.seek(SeekFrom::Start(self.offset_of(page_no)))?;
        self.fd.read_exact(buf)?;
        Ok(())
    }

    /// Writes `buf` (exactly `PAGE_SIZE` bytes) to page `page_no`.
    pub fn write_page(&mut self, page_no: PageNo, buf: &[u8; PAGE_SIZE]) -> Result<()> {
        self.fd.seek(SeekFrom::Start(self.offset_of(page_no)))?;
        self.fd.write_all(buf)?;
        Ok(())
    }

    /// Extends the file by one zeroed page, returning its page number.
    pub fn allocate_page(&mut self) -> Result<PageNo> {
        let page_no = self.num_pages as PageNo;
        self.write_page(page_no, &[0u8; PAGE_SIZE])?;
        self.num_pages += 1;
        Ok(page_no)
    }

    /// Releases a page. This engine does not reclaim on-disk space or
    /// maintain a free list — `disposePage` exists so the buffer manager's
    /// contract is complete, but the physical hole is left in place. Safe
    /// because nothing re-reads a disposed page number; only `disposePage`
    /// callers who have already severed every link to it call this.
    pub fn dispose_page(&mut self, _page_no: PageNo) -> Result<()> {
        Ok(())
    }

    /// Returns the file's first page number. Every file created through
    /// `createHeapFile` allocates its header page first, so this is always
    /// page 0.
    pub fn get_first_page(&self) -> Result<PageNo> {
        Ok(0)
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }
}
