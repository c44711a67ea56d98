//! Integration coverage for the clock-replacement buffer manager's pin
//! discipline and write-back behavior (`spec.md` §8 properties P1-P5, B1,
//! and end-to-end scenarios 2-3, 6).

use std::cell::RefCell;
use std::rc::Rc;

use clockbase::buffer::BufMgr;
use clockbase::common::DbError;
use clockbase::storage::Db;

fn scratch_path() -> std::path::PathBuf {
    let f = tempfile::NamedTempFile::new().unwrap();
    let path = f.path().to_path_buf();
    drop(f);
    std::fs::remove_file(&path).ok();
    path
}

#[test]
fn n_plus_one_distinct_pins_fail_with_buffer_exceeded() {
    let path = scratch_path();
    Db::create_file(&path).unwrap();
    let file = Rc::new(RefCell::new(Db::open_file(&path).unwrap()));
    let mut bm = BufMgr::new(3);

    let mut guards = Vec::new();
    for _ in 0..3 {
        let (_pn, g) = bm.alloc_page(&file).unwrap();
        guards.push(g);
    }
    assert!(matches!(bm.alloc_page(&file), Err(DbError::BufferExceeded)));

    drop(guards);
    std::fs::remove_file(&path).ok();
}

#[test]
fn unpinning_one_page_frees_a_frame_for_reuse() {
    let path = scratch_path();
    Db::create_file(&path).unwrap();
    let file = Rc::new(RefCell::new(Db::open_file(&path).unwrap()));
    let mut bm = BufMgr::new(3);

    let (p0, g0) = bm.alloc_page(&file).unwrap();
    let (p1, g1) = bm.alloc_page(&file).unwrap();
    let (p2, g2) = bm.alloc_page(&file).unwrap();
    g1.unpin(false);

    let (p3, g3) = bm.alloc_page(&file).unwrap();
    assert_ne!(p3, p0);
    assert_ne!(p3, p1);
    assert_ne!(p3, p2);

    drop(g0);
    drop(g2);
    drop(g3);
    std::fs::remove_file(&path).ok();
}

#[test]
fn dirty_page_is_written_back_and_re_readable() {
    let path = scratch_path();
    Db::create_file(&path).unwrap();
    let file = Rc::new(RefCell::new(Db::open_file(&path).unwrap()));
    let mut bm = BufMgr::new(1);

    let (p0, mut g0) = bm.alloc_page(&file).unwrap();
    g0.page_mut().init(p0);
    let rid = g0.page_mut().insert_record(b"dirty bytes").unwrap();
    g0.unpin(true);

    // force eviction of the only frame by allocating another page.
    let (p1, g1) = bm.alloc_page(&file).unwrap();
    assert_ne!(p0, p1);
    g1.unpin(false);

    let g0_again = bm.read_page(&file, p0).unwrap();
    assert_eq!(g0_again.page().get_record(rid).unwrap(), b"dirty bytes");
    g0_again.unpin(false);

    std::fs::remove_file(&path).ok();
}

#[test]
fn flush_file_then_second_flush_is_a_noop() {
    let path = scratch_path();
    Db::create_file(&path).unwrap();
    let file = Rc::new(RefCell::new(Db::open_file(&path).unwrap()));
    let mut bm = BufMgr::new(2);

    let (p0, mut g0) = bm.alloc_page(&file).unwrap();
    g0.page_mut().init(p0);
    g0.unpin(true);

    bm.flush_file(&file).unwrap();
    bm.flush_file(&file).unwrap();

    std::fs::remove_file(&path).ok();
}
