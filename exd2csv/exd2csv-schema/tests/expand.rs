use exd2csv_core::SchemaField;
use exd2csv_schema::expand_field_names;

#[test]
fn scalar_array_expands_to_indexed_names() {
    let fields = vec![SchemaField::array("Foo", 3, vec![])];
    assert_eq!(expand_field_names(&fields), ["Foo[0]", "Foo[1]", "Foo[2]"]);
}

#[test]
fn struct_array_expands_element_by_element() {
    let fields = vec![SchemaField::array(
        "Bar",
        2,
        vec![SchemaField::scalar("X"), SchemaField::scalar("Y")],
    )];
    assert_eq!(
        expand_field_names(&fields),
        ["Bar[0].X", "Bar[0].Y", "Bar[1].X", "Bar[1].Y"]
    );
}

#[test]
fn single_child_array_is_not_dotted() {
    let fields = vec![SchemaField::array("Param", 2, vec![SchemaField::scalar("Value")])];
    assert_eq!(expand_field_names(&fields), ["Param[0]", "Param[1]"]);
}

#[test]
fn unnamed_children_get_positional_field_names() {
    let fields = vec![SchemaField::array(
        "Pair",
        1,
        vec![SchemaField::unnamed(), SchemaField::scalar("Second")],
    )];
    assert_eq!(expand_field_names(&fields), ["Pair[0].Field0", "Pair[0].Second"]);
}

#[test]
fn unnamed_scalars_use_running_index() {
    let fields = vec![
        SchemaField::scalar("Name"),
        SchemaField::array("Slot", 2, vec![]),
        SchemaField::unnamed(),
        SchemaField::scalar("Icon"),
    ];
    assert_eq!(
        expand_field_names(&fields),
        ["Name", "Slot[0]", "Slot[1]", "Unknown3", "Icon"]
    );
}

#[test]
fn zero_count_array_counts_as_one_column() {
    let fields = vec![SchemaField::array("Empty", 0, vec![]), SchemaField::scalar("Next")];
    assert_eq!(expand_field_names(&fields), ["Empty", "Next"]);
}

#[test]
fn empty_schema_yields_no_names() {
    assert!(expand_field_names(&[]).is_empty());
}
