use std::fmt::{Display, Formatter, Result};

/// Storage type of a physical column.
///
/// Discriminants follow the on-disk type tags. Tags outside the known set are
/// kept as [`ColumnType::Unknown`] so a sheet with an unexpected column still
/// exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Int64,
    UInt64,
    PackedBool0,
    PackedBool1,
    PackedBool2,
    PackedBool3,
    PackedBool4,
    PackedBool5,
    PackedBool6,
    PackedBool7,
    Unknown(u16),
}

impl ColumnType {
    const PACKED_BOOL_BASE: u16 = 0x19;

    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0x00 => ColumnType::String,
            0x01 => ColumnType::Bool,
            0x02 => ColumnType::Int8,
            0x03 => ColumnType::UInt8,
            0x04 => ColumnType::Int16,
            0x05 => ColumnType::UInt16,
            0x06 => ColumnType::Int32,
            0x07 => ColumnType::UInt32,
            0x09 => ColumnType::Float32,
            0x0A => ColumnType::Int64,
            0x0B => ColumnType::UInt64,
            0x19 => ColumnType::PackedBool0,
            0x1A => ColumnType::PackedBool1,
            0x1B => ColumnType::PackedBool2,
            0x1C => ColumnType::PackedBool3,
            0x1D => ColumnType::PackedBool4,
            0x1E => ColumnType::PackedBool5,
            0x1F => ColumnType::PackedBool6,
            0x20 => ColumnType::PackedBool7,
            other => ColumnType::Unknown(other),
        }
    }

    pub fn raw(&self) -> u16 {
        match self {
            ColumnType::String => 0x00,
            ColumnType::Bool => 0x01,
            ColumnType::Int8 => 0x02,
            ColumnType::UInt8 => 0x03,
            ColumnType::Int16 => 0x04,
            ColumnType::UInt16 => 0x05,
            ColumnType::Int32 => 0x06,
            ColumnType::UInt32 => 0x07,
            ColumnType::Float32 => 0x09,
            ColumnType::Int64 => 0x0A,
            ColumnType::UInt64 => 0x0B,
            ColumnType::Unknown(raw) => *raw,
            packed => Self::PACKED_BOOL_BASE + u16::from(packed.packed_bit().unwrap_or_default()),
        }
    }

    /// Bit index tested by a packed bool variant, `None` for every other type.
    pub fn packed_bit(&self) -> Option<u8> {
        match self {
            ColumnType::PackedBool0 => Some(0),
            ColumnType::PackedBool1 => Some(1),
            ColumnType::PackedBool2 => Some(2),
            ColumnType::PackedBool3 => Some(3),
            ColumnType::PackedBool4 => Some(4),
            ColumnType::PackedBool5 => Some(5),
            ColumnType::PackedBool6 => Some(6),
            ColumnType::PackedBool7 => Some(7),
            _ => None,
        }
    }

    /// Packed bool variant testing bit `bit` (0..=7).
    pub fn packed_bool(bit: u8) -> Option<Self> {
        (bit < 8).then(|| Self::from_raw(Self::PACKED_BOOL_BASE + u16::from(bit)))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String)
    }

    /// Name written to the type row of an exported sheet.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Bool => "Bool",
            ColumnType::Int8 => "Int8",
            ColumnType::UInt8 => "UInt8",
            ColumnType::Int16 => "Int16",
            ColumnType::UInt16 => "UInt16",
            ColumnType::Int32 => "Int32",
            ColumnType::UInt32 => "UInt32",
            ColumnType::Float32 => "Float32",
            ColumnType::Int64 => "Int64",
            ColumnType::UInt64 => "UInt64",
            ColumnType::PackedBool0 => "PackedBool0",
            ColumnType::PackedBool1 => "PackedBool1",
            ColumnType::PackedBool2 => "PackedBool2",
            ColumnType::PackedBool3 => "PackedBool3",
            ColumnType::PackedBool4 => "PackedBool4",
            ColumnType::PackedBool5 => "PackedBool5",
            ColumnType::PackedBool6 => "PackedBool6",
            ColumnType::PackedBool7 => "PackedBool7",
            ColumnType::Unknown(_) => "Unknown",
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            // Unknown tags have no name; the raw tag is the most useful thing to show.
            ColumnType::Unknown(raw) => write!(f, "{raw}"),
            known => f.write_str(known.type_name()),
        }
    }
}

/// Physical column descriptor from a sheet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnDefinition {
    pub column_type: ColumnType,
    /// Byte offset of the column inside one physical row.
    pub offset: u16,
}

impl ColumnDefinition {
    pub fn new(column_type: ColumnType, offset: u16) -> Self {
        Self {
            column_type,
            offset,
        }
    }
}
