use clockbase::catalog::{AttrType, ColumnSpec, Op};
use clockbase::executor::{delete, insert, select, AttrValue, Engine, FilterAttr, ProjAttr};

fn main() {
    env_logger::init();

    println!("clockbase - a teaching-grade relational storage engine");
    println!("========================================================\n");

    let demo_path = "people";
    let result_path = "young_people";
    std::fs::remove_file(demo_path).ok();
    std::fs::remove_file(result_path).ok();

    let mut engine = Engine::new(10);
    engine
        .catalog
        .create_relation(
            "people",
            &[
                ColumnSpec::new("id", AttrType::Integer, 0),
                ColumnSpec::new("name", AttrType::String, 10),
            ],
        )
        .expect("failed to register relation");

    for (id, name) in [("1", "alice"), ("2", "bob"), ("3", "carol")] {
        insert(
            &mut engine,
            "people",
            &[AttrValue::new("id", id), AttrValue::new("name", name)],
        )
        .expect("insert failed");
        println!("Inserted ({id}, {name})");
    }

    select(
        &mut engine,
        result_path,
        &[ProjAttr::new("people", "name")],
        Some(&FilterAttr {
            rel_name: "people".to_string(),
            attr_name: "id".to_string(),
            op: Op::Lt,
            value: "3".to_string(),
        }),
    )
    .expect("select failed");
    println!("\nSelected names of people with id < 3 into '{result_path}'");

    let deleted = delete(
        &mut engine,
        "people",
        Some(("id", Op::Eq, "2")),
    )
    .expect("delete failed");
    println!("Deleted {deleted} record(s) with id = 2");

    std::fs::remove_file(demo_path).ok();
    std::fs::remove_file(result_path).ok();
    println!("\nDemo completed successfully!");
}
