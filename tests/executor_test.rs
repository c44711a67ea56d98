//! End-to-end coverage of the query executor against the heap-file and
//! buffer layers (`spec.md` §8 scenarios 1, 4, 5).

use clockbase::catalog::{AttrType, ColumnSpec, Op};
use clockbase::executor::{delete, insert, select, AttrValue, Engine, FilterAttr, ProjAttr};

fn cleanup(names: &[&str]) {
    for n in names {
        std::fs::remove_file(n).ok();
    }
}

#[test]
fn insert_then_select_projects_nul_padded_string() {
    let rel = "exec_test_r_scenario1";
    let result = "exec_test_r2_scenario1";
    cleanup(&[rel, result]);

    let mut engine = Engine::new(5);
    engine
        .catalog
        .create_relation(
            rel,
            &[
                ColumnSpec::new("id", AttrType::Integer, 0),
                ColumnSpec::new("name", AttrType::String, 10),
            ],
        )
        .unwrap();

    insert(
        &mut engine,
        rel,
        &[AttrValue::new("id", "7"), AttrValue::new("name", "alice")],
    )
    .unwrap();

    select(&mut engine, result, &[ProjAttr::new(rel, "name")], None).unwrap();

    let mut heap = clockbase::heapfile::HeapFile::open(&mut engine.bm, result).unwrap();
    let rid = {
        let mut scan = clockbase::heapfile::HeapFileScan::new(&mut heap);
        scan.start_scan(0, 0, AttrType::String, None, Op::Eq).unwrap();
        scan.scan_next(&mut engine.bm).unwrap()
    };
    let rec = heap.get_record(&mut engine.bm, rid).unwrap();
    assert_eq!(rec.len(), 10);
    assert_eq!(&rec[..5], b"alice");
    assert_eq!(&rec[5..], &[0u8; 5]);
    heap.close(&mut engine.bm);

    cleanup(&[rel, result]);
}

#[test]
fn filtered_delete_removes_only_matching_records() {
    let rel = "exec_test_r_scenario4";
    cleanup(&[rel]);

    let mut engine = Engine::new(5);
    engine
        .catalog
        .create_relation(rel, &[ColumnSpec::new("id", AttrType::Integer, 0)])
        .unwrap();

    for id in [1, 6, 9, 2, 10] {
        insert(&mut engine, rel, &[AttrValue::new("id", &id.to_string())]).unwrap();
    }

    let deleted = delete(&mut engine, rel, Some(("id", Op::Gt, "5"))).unwrap();
    assert_eq!(deleted, 3);

    let remaining = delete(&mut engine, rel, None).unwrap();
    assert_eq!(remaining, 2);

    let none_left = delete(&mut engine, rel, None).unwrap();
    assert_eq!(none_left, 0);

    cleanup(&[rel]);
}

#[test]
fn insert_overflowing_a_page_links_a_new_one() {
    let rel = "exec_test_r_scenario5";
    cleanup(&[rel]);

    let mut engine = Engine::new(5);
    engine
        .catalog
        .create_relation(rel, &[ColumnSpec::new("blob", AttrType::String, 500)])
        .unwrap();

    let payload = "x".repeat(500);
    for _ in 0..20 {
        insert(&mut engine, rel, &[AttrValue::new("blob", &payload)]).unwrap();
    }

    let mut seen = 0;
    let mut heap = clockbase::heapfile::HeapFile::open(&mut engine.bm, rel).unwrap();
    {
        let mut scan = clockbase::heapfile::HeapFileScan::new(&mut heap);
        scan.start_scan(0, 0, AttrType::String, None, Op::Eq).unwrap();
        loop {
            match scan.scan_next(&mut engine.bm) {
                Ok(_) => seen += 1,
                Err(clockbase::DbError::FileEOF) => break,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }
    heap.close(&mut engine.bm);
    assert_eq!(seen, 20);

    cleanup(&[rel]);
}

#[test]
fn insert_with_missing_attribute_fails() {
    let rel = "exec_test_r_missing_attr";
    cleanup(&[rel]);

    let mut engine = Engine::new(5);
    engine
        .catalog
        .create_relation(
            rel,
            &[
                ColumnSpec::new("id", AttrType::Integer, 0),
                ColumnSpec::new("name", AttrType::String, 10),
            ],
        )
        .unwrap();

    let result = insert(&mut engine, rel, &[AttrValue::new("id", "1")]);
    assert!(matches!(
        result,
        Err(clockbase::DbError::AttrCountMismatch { .. })
    ));

    cleanup(&[rel]);
}

#[test]
fn filtered_select_projects_only_matching_rows() {
    let rel = "exec_test_r_filtered_select";
    let result = "exec_test_r2_filtered_select";
    cleanup(&[rel, result]);

    let mut engine = Engine::new(5);
    engine
        .catalog
        .create_relation(
            rel,
            &[
                ColumnSpec::new("id", AttrType::Integer, 0),
                ColumnSpec::new("name", AttrType::String, 10),
            ],
        )
        .unwrap();

    for (id, name) in [("1", "alice"), ("2", "bob"), ("3", "carol")] {
        insert(
            &mut engine,
            rel,
            &[AttrValue::new("id", id), AttrValue::new("name", name)],
        )
        .unwrap();
    }

    select(
        &mut engine,
        result,
        &[ProjAttr::new(rel, "name")],
        Some(&FilterAttr {
            rel_name: rel.to_string(),
            attr_name: "id".to_string(),
            op: Op::Gt,
            value: "1".to_string(),
        }),
    )
    .unwrap();

    let mut heap = clockbase::heapfile::HeapFile::open(&mut engine.bm, result).unwrap();
    let mut scan = clockbase::heapfile::HeapFileScan::new(&mut heap);
    scan.start_scan(0, 0, AttrType::String, None, Op::Eq).unwrap();
    let mut names = Vec::new();
    loop {
        match scan.scan_next(&mut engine.bm) {
            Ok(rid) => {
                let rec = heap.get_record(&mut engine.bm, rid).unwrap();
                let trimmed = rec.iter().take_while(|&&b| b != 0).copied().collect();
                names.push(String::from_utf8(trimmed).unwrap());
            }
            Err(clockbase::DbError::FileEOF) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    names.sort();
    assert_eq!(names, vec!["bob".to_string(), "carol".to_string()]);
    heap.close(&mut engine.bm);

    cleanup(&[rel, result]);
}
