
use exd2csv::{
    ExportError, SheetLayout, SheetSerializer,
    core::{
        ColumnDefinition, ColumnType, DataPage, Language, SchemaField, SheetHeader, SheetSchema,
        SheetVariant, Utf8TextDecoder,
    },
    schema::{ColumnInfo, bind_columns},
};
use test_helpers::*;

// ── helpers ─────────────────────────────────────────────────────────────────

fn serialize(
    header: &SheetHeader,
    columns: &[ColumnInfo],
    pages: &[DataPage],
) -> Result<(String, usize), ExportError> {
    let layout = SheetLayout {
        sheet: "Test",
        header,
        columns,
        silent: true,
    };
    let mut text = Utf8TextDecoder;
    let mut serializer = SheetSerializer::start(layout, &mut text, Vec::new())?;
    for page in pages {
        serializer.write_page(page)?;
    }
    let (out, rows) = serializer.finish()?;
    Ok((String::from_utf8(out).unwrap(), rows))
}

fn flat_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new(ColumnType::Int32, 0),
        ColumnDefinition::new(ColumnType::String, 4),
        ColumnDefinition::new(ColumnType::Bool, 8),
        ColumnDefinition::new(ColumnType::PackedBool1, 9),
    ]
}

fn flat_schema() -> SheetSchema {
    SheetSchema::new(
        "Test",
        vec![
            SchemaField::scalar("Id"),
            SchemaField::scalar("Name"),
            SchemaField::scalar("Flag"),
            SchemaField::scalar("Bit"),
        ],
    )
}

// ── header block ────────────────────────────────────────────────────────────

#[test]
fn header_block_is_written_even_without_rows() {
    let header = header(SheetVariant::Flat, 10, flat_columns(), vec![Language::None]);
    let schema = flat_schema();
    let columns = bind_columns(&header.columns, Some(&schema));

    let (out, rows) = serialize(&header, &columns, &[]).unwrap();

    assert_eq!(rows, 0);
    assert_eq!(
        out,
        "key,0,1,2,3\r\n\
         #,Id,Name,Flag,Bit\r\n\
         offset,0,4,8,9\r\n\
         Int32,Int32,String,Bool,PackedBool1\r\n"
    );
}

#[test]
fn unknown_columns_have_empty_names() {
    let header = header(SheetVariant::Flat, 10, flat_columns(), vec![Language::None]);
    let columns = bind_columns(&header.columns, None);

    let (out, _) = serialize(&header, &columns, &[]).unwrap();

    assert_eq!(lines(&out)[1], "#,,,,");
}

#[test]
fn unknown_type_row_shows_raw_tag() {
    let header = header(
        SheetVariant::Flat,
        1,
        vec![ColumnDefinition::new(ColumnType::Unknown(0x42), 0)],
        vec![Language::None],
    );
    let columns = bind_columns(&header.columns, None);

    let (out, _) = serialize(&header, &columns, &[]).unwrap();

    assert_eq!(lines(&out)[3], "Int32,66");
}

// ── flat rows ───────────────────────────────────────────────────────────────

#[test]
fn flat_rows_decode_every_column() {
    let header = header(SheetVariant::Flat, 10, flat_columns(), vec![Language::None]);
    let schema = flat_schema();
    let columns = bind_columns(&header.columns, Some(&schema));
    let page = PageBuilder::new(3)
        .flat_row(
            3,
            &fixed(&[&(-5i32).to_be_bytes(), &0u32.to_be_bytes(), &[1], &[0b10]]),
            b"Hello, \"world\"\0",
        )
        .flat_row(
            4,
            &fixed(&[&7i32.to_be_bytes(), &0u32.to_be_bytes(), &[0], &[0b01]]),
            b"\0",
        )
        .build();

    let (out, rows) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(rows, 2);
    let lines = lines(&out);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], "3,-5,\"Hello, \"\"world\"\"\",true,true");
    assert_eq!(lines[5], "4,7,\"\",false,false");
}

#[test]
fn rows_follow_page_order_then_pointer_order() {
    let columns_def = vec![ColumnDefinition::new(ColumnType::UInt8, 0)];
    let header = header(SheetVariant::Flat, 1, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    let first = PageBuilder::new(0)
        .flat_row(10, &[1], b"")
        .flat_row(5, &[2], b"")
        .build();
    let second = PageBuilder::new(0).flat_row(1, &[3], b"").build();

    let (out, rows) = serialize(&header, &columns, &[first, second]).unwrap();

    assert_eq!(rows, 3);
    assert_eq!(&lines(&out)[4..], ["10,1", "5,2", "1,3"]);
}

#[test]
fn float_cells_use_shortest_decimal_form() {
    let columns_def = vec![ColumnDefinition::new(ColumnType::Float32, 0)];
    let header = header(SheetVariant::Flat, 4, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    let page = PageBuilder::new(0)
        .flat_row(0, &1.5f32.to_be_bytes(), b"")
        .flat_row(1, &(-0.25f32).to_be_bytes(), b"")
        .build();

    let (out, _) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(&lines(&out)[4..], ["0,1.5", "1,-0.25"]);
}

#[test]
fn failed_cell_is_empty_and_row_is_kept() {
    let columns_def = vec![
        ColumnDefinition::new(ColumnType::Int32, 0),
        ColumnDefinition::new(ColumnType::UInt32, 4),
    ];
    let header = header(SheetVariant::Flat, 8, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    // Only the first column's bytes exist before the page ends.
    let page = PageBuilder::new(0)
        .flat_row(9, &1i32.to_be_bytes(), b"")
        .build();

    let (out, rows) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(rows, 1);
    assert_eq!(lines(&out)[4], "9,1,");
}

#[test]
fn flat_row_past_page_end_yields_empty_cells() {
    let columns_def = vec![
        ColumnDefinition::new(ColumnType::Int32, 0),
        ColumnDefinition::new(ColumnType::String, 4),
    ];
    let header = header(SheetVariant::Flat, 8, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    let page = PageBuilder::new(4).dangling_row(2, 1_000).build();

    let (out, _) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(lines(&out)[4], "2,,\"\"");
}

// ── sub-rows ────────────────────────────────────────────────────────────────

#[test]
fn subrows_are_addressed_after_their_ids() {
    let columns_def = vec![
        ColumnDefinition::new(ColumnType::UInt16, 0),
        ColumnDefinition::new(ColumnType::Int16, 2),
    ];
    let header = header(SheetVariant::Subrows, 4, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    let page = PageBuilder::new(3)
        .subrow_row(7, &[&[0, 1, 0, 2], &[0, 3, 0xFF, 0xFE], &[0, 5, 0, 6]], b"")
        .subrow_row(8, &[&[0, 9, 0, 9]], b"")
        .build();

    let (out, rows) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(rows, 4);
    assert_eq!(&lines(&out)[4..], ["7.0,1,2", "7.1,3,-2", "7.2,5,6", "8.0,9,9"]);
}

#[test]
fn subrow_strings_are_relative_to_the_subrow() {
    let columns_def = vec![ColumnDefinition::new(ColumnType::String, 0)];
    let header = header(SheetVariant::Subrows, 4, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    // Sub-row 1 ends where the string block starts; sub-row 0 ends 6 bytes
    // earlier (its own data plus sub-row 1's id and data).
    let page = PageBuilder::new(0)
        .subrow_row(
            1,
            &[&6u32.to_be_bytes(), &0u32.to_be_bytes()],
            b"abc\0",
        )
        .build();

    let (out, _) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(&lines(&out)[4..], ["1.0,\"abc\"", "1.1,\"abc\""]);
}

#[test]
fn zero_subrows_write_no_records() {
    let columns_def = vec![ColumnDefinition::new(ColumnType::UInt8, 0)];
    let header = header(SheetVariant::Subrows, 1, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    let page = PageBuilder::new(0).subrow_row(4, &[], b"").build();

    let (out, rows) = serialize(&header, &columns, &[page]).unwrap();

    assert_eq!(rows, 0);
    assert_eq!(lines(&out).len(), 4);
}

#[test]
fn subrow_prologue_out_of_bounds_is_an_error() {
    let columns_def = vec![ColumnDefinition::new(ColumnType::UInt8, 0)];
    let header = header(SheetVariant::Subrows, 1, columns_def, vec![Language::None]);
    let columns = bind_columns(&header.columns, None);
    let page = PageBuilder::new(8).dangling_row(12, 1_000).build();

    let err = serialize(&header, &columns, &[page]).unwrap_err();

    assert!(matches!(
        err,
        ExportError::RowOutOfBounds {
            row_id: 12,
            offset: 1_000,
            ..
        }
    ));
    assert!(err.to_string().contains("0x3E8"));
}
