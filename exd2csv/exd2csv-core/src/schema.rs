//! In-memory schema tree describing how physical columns are named.

use std::{collections::HashMap, sync::Arc};

/// One node of a sheet schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaField {
    pub name: Option<String>,
    /// Scalar type name, or `"array"` for repeated fields.
    pub field_type: Option<String>,
    /// Element count; only meaningful for array fields.
    pub count: usize,
    /// Element structure of an array field, in declaration order.
    pub fields: Vec<SchemaField>,
}

impl SchemaField {
    pub const ARRAY_TYPE: &'static str = "array";

    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn array(name: impl Into<String>, count: usize, fields: Vec<SchemaField>) -> Self {
        Self {
            name: Some(name.into()),
            field_type: Some(Self::ARRAY_TYPE.to_string()),
            count,
            fields,
        }
    }

    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn is_array(&self) -> bool {
        self.field_type.as_deref() == Some(Self::ARRAY_TYPE)
    }
}

/// Schema of one sheet: its name and top-level fields in byte-layout order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetSchema {
    pub name: Option<String>,
    pub fields: Vec<SchemaField>,
}

impl SheetSchema {
    pub fn new(name: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            name: Some(name.into()),
            fields,
        }
    }
}

/// Schemas of one schema version, looked up case-insensitively by sheet base name.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    by_name: HashMap<String, Arc<SheetSchema>>,
}

impl SchemaSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema under its own name. Unnamed schemas are ignored and the
    /// first schema registered under a name wins; returns whether it was added.
    pub fn insert(&mut self, schema: SheetSchema) -> bool {
        let Some(key) = schema.name.as_deref().map(str::to_lowercase) else {
            return false;
        };
        if self.by_name.contains_key(&key) {
            return false;
        }
        self.by_name.insert(key, Arc::new(schema));
        true
    }

    pub fn get(&self, sheet_base_name: &str) -> Option<&SheetSchema> {
        self.by_name
            .get(&sheet_base_name.to_lowercase())
            .map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<SheetSchema> for SchemaSet {
    fn from_iter<T: IntoIterator<Item = SheetSchema>>(iter: T) -> Self {
        let mut set = Self::new();
        for schema in iter {
            set.insert(schema);
        }
        set
    }
}
