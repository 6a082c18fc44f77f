use exd2csv_core::SchemaField;

use crate::bind::UNKNOWN_PREFIX;

/// Flatten top-level schema fields into one display name per column.
///
/// - scalar fields yield their name, or `Unknown{n}` where `n` is the number
///   of names produced so far
/// - `Name` arrays of `count` scalars yield `Name[0]` … `Name[count-1]`
/// - arrays with a single element field yield the same `Name[i]` names
/// - arrays with several element fields yield `Name[i].Child` for every child
///   (`Name[i].Field{j}` for unnamed children), element by element
///
/// The result is not truncated or padded to any column count.
pub fn expand_field_names(fields: &[SchemaField]) -> Vec<String> {
    let mut names = Vec::with_capacity(fields.len());

    for field in fields {
        if field.is_array() && field.count > 0 {
            expand_array(field, &mut names);
        } else {
            let name = match &field.name {
                Some(name) => name.clone(),
                None => format!("{UNKNOWN_PREFIX}{}", names.len()),
            };
            names.push(name);
        }
    }

    names
}

fn expand_array(field: &SchemaField, names: &mut Vec<String>) {
    let base = field.name.as_deref().unwrap_or_default();
    let children = &field.fields;

    for i in 0..field.count {
        if children.len() > 1 {
            for (j, child) in children.iter().enumerate() {
                match &child.name {
                    Some(child_name) => names.push(format!("{base}[{i}].{child_name}")),
                    None => names.push(format!("{base}[{i}].Field{j}")),
                }
            }
        } else {
            names.push(format!("{base}[{i}]"));
        }
    }
}
