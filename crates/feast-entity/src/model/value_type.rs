//! Scalar type tags for join keys.
//!
//! The numbering is the registry's `feast.types.ValueType.Enum`; the same
//! enum is used by the wire binding and by the entity model.

use std::fmt;

/// Value type of a join key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ValueType {
    Unspecified = 0,
    Bytes = 1,
    String = 2,
    Int32 = 3,
    Int64 = 4,
    Double = 5,
    Float = 6,
    Bool = 7,
    UnixTimestamp = 8,
    BytesList = 11,
    StringList = 12,
    Int32List = 13,
    Int64List = 14,
    DoubleList = 15,
    FloatList = 16,
    BoolList = 17,
    UnixTimestampList = 18,
    Null = 19,
}

impl ValueType {
    /// Returns true for the `*_LIST` variants.
    pub fn is_list(self) -> bool {
        self.element_type() != self
    }

    /// Returns the scalar element type of a list type, or `self` for scalars.
    pub fn element_type(self) -> ValueType {
        match self {
            ValueType::BytesList => ValueType::Bytes,
            ValueType::StringList => ValueType::String,
            ValueType::Int32List => ValueType::Int32,
            ValueType::Int64List => ValueType::Int64,
            ValueType::DoubleList => ValueType::Double,
            ValueType::FloatList => ValueType::Float,
            ValueType::BoolList => ValueType::Bool,
            ValueType::UnixTimestampList => ValueType::UnixTimestamp,
            other => other,
        }
    }

    /// Registry name of the variant (`"INT64"`, `"STRING_LIST"`, ...).
    pub fn as_str_name(self) -> &'static str {
        match self {
            ValueType::Unspecified => "INVALID",
            ValueType::Bytes => "BYTES",
            ValueType::String => "STRING",
            ValueType::Int32 => "INT32",
            ValueType::Int64 => "INT64",
            ValueType::Double => "DOUBLE",
            ValueType::Float => "FLOAT",
            ValueType::Bool => "BOOL",
            ValueType::UnixTimestamp => "UNIX_TIMESTAMP",
            ValueType::BytesList => "BYTES_LIST",
            ValueType::StringList => "STRING_LIST",
            ValueType::Int32List => "INT32_LIST",
            ValueType::Int64List => "INT64_LIST",
            ValueType::DoubleList => "DOUBLE_LIST",
            ValueType::FloatList => "FLOAT_LIST",
            ValueType::BoolList => "BOOL_LIST",
            ValueType::UnixTimestampList => "UNIX_TIMESTAMP_LIST",
            ValueType::Null => "NULL",
        }
    }

    /// Parses a registry name. `"UNKNOWN"` is accepted as an alias of
    /// `Unspecified`, which is how SDK-side dumps spell it.
    pub fn from_str_name(name: &str) -> Option<ValueType> {
        let value_type = match name {
            "INVALID" | "UNKNOWN" => ValueType::Unspecified,
            "BYTES" => ValueType::Bytes,
            "STRING" => ValueType::String,
            "INT32" => ValueType::Int32,
            "INT64" => ValueType::Int64,
            "DOUBLE" => ValueType::Double,
            "FLOAT" => ValueType::Float,
            "BOOL" => ValueType::Bool,
            "UNIX_TIMESTAMP" => ValueType::UnixTimestamp,
            "BYTES_LIST" => ValueType::BytesList,
            "STRING_LIST" => ValueType::StringList,
            "INT32_LIST" => ValueType::Int32List,
            "INT64_LIST" => ValueType::Int64List,
            "DOUBLE_LIST" => ValueType::DoubleList,
            "FLOAT_LIST" => ValueType::FloatList,
            "BOOL_LIST" => ValueType::BoolList,
            "UNIX_TIMESTAMP_LIST" => ValueType::UnixTimestampList,
            "NULL" => ValueType::Null,
            _ => return None,
        };
        Some(value_type)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}
