use exd2csv_core::{ColumnDefinition, ColumnType, SchemaField, SheetSchema};
use exd2csv_schema::{ColumnInfo, bind_columns};

fn col(column_type: ColumnType, offset: u16) -> ColumnDefinition {
    ColumnDefinition::new(column_type, offset)
}

fn names(infos: &[ColumnInfo]) -> Vec<&str> {
    infos.iter().map(|c| c.display_name.as_str()).collect()
}

/// Header order differs from byte order: String@0 is declared last.
fn shuffled_columns() -> Vec<ColumnDefinition> {
    vec![
        col(ColumnType::UInt32, 8),
        col(ColumnType::UInt16, 4),
        col(ColumnType::String, 0),
    ]
}

#[test]
fn no_schema_names_by_original_index() {
    let infos = bind_columns(&shuffled_columns(), None);
    assert_eq!(names(&infos), ["0", "1", "2"]);
    assert!(infos.iter().all(|c| c.is_unknown));

    let empty = SheetSchema::new("Item", vec![]);
    let infos = bind_columns(&shuffled_columns(), Some(&empty));
    assert_eq!(names(&infos), ["0", "1", "2"]);
    assert!(infos.iter().all(|c| c.is_unknown));
}

#[test]
fn names_are_matched_by_offset_and_returned_in_header_order() {
    let schema = SheetSchema::new(
        "Item",
        vec![
            SchemaField::scalar("Name"),
            SchemaField::scalar("Level"),
            SchemaField::scalar("Price"),
        ],
    );
    let infos = bind_columns(&shuffled_columns(), Some(&schema));

    assert_eq!(names(&infos), ["Price", "Level", "Name"]);
    assert_eq!(
        infos.iter().map(|c| c.original_index).collect::<Vec<_>>(),
        [0, 1, 2]
    );
    assert_eq!(infos[2].definition, col(ColumnType::String, 0));
    assert!(infos.iter().all(|c| !c.is_unknown));
}

#[test]
fn short_schema_falls_back_to_unknown_original_index() {
    let schema = SheetSchema::new("Item", vec![SchemaField::scalar("Name")]);
    let infos = bind_columns(&shuffled_columns(), Some(&schema));

    assert_eq!(names(&infos), ["Unknown0", "Unknown1", "Name"]);
    assert_eq!(
        infos.iter().map(|c| c.is_unknown).collect::<Vec<_>>(),
        [true, true, false]
    );
}

#[test]
fn long_schema_is_truncated() {
    let schema = SheetSchema::new("Item", vec![SchemaField::array("Value", 10, vec![])]);
    let infos = bind_columns(&shuffled_columns(), Some(&schema));
    assert_eq!(infos.len(), 3);
    assert_eq!(names(&infos), ["Value[2]", "Value[1]", "Value[0]"]);
}

#[test]
fn unknown_prefix_is_case_insensitive() {
    let schema = SheetSchema::new(
        "Item",
        vec![
            SchemaField::scalar("unknownFlag"),
            SchemaField::scalar("UNKNOWN"),
            SchemaField::scalar("Known"),
        ],
    );
    let columns = vec![
        col(ColumnType::Bool, 0),
        col(ColumnType::Bool, 1),
        col(ColumnType::Bool, 2),
    ];
    let infos = bind_columns(&columns, Some(&schema));
    assert_eq!(
        infos.iter().map(|c| c.is_unknown).collect::<Vec<_>>(),
        [true, true, false]
    );
}

#[test]
fn packed_bools_sharing_an_offset_keep_header_order() {
    let columns = vec![
        col(ColumnType::PackedBool1, 4),
        col(ColumnType::Int32, 0),
        col(ColumnType::PackedBool0, 4),
    ];
    let schema = SheetSchema::new(
        "Item",
        vec![
            SchemaField::scalar("Id"),
            SchemaField::scalar("FlagA"),
            SchemaField::scalar("FlagB"),
        ],
    );
    let infos = bind_columns(&columns, Some(&schema));
    assert_eq!(names(&infos), ["FlagA", "Id", "FlagB"]);
}

#[test]
fn original_indices_form_a_permutation() {
    let columns: Vec<_> = (0..20u16)
        .map(|i| col(ColumnType::UInt8, (i * 7) % 20))
        .collect();
    let schema = SheetSchema::new("Item", vec![SchemaField::array("V", 12, vec![])]);
    let infos = bind_columns(&columns, Some(&schema));

    let indices: Vec<_> = infos.iter().map(|c| c.original_index).collect();
    assert_eq!(indices, (0..20).collect::<Vec<_>>());
    assert_eq!(infos.iter().filter(|c| c.is_unknown).count(), 8);
}
