//! Property value types for source graph records
//!
//! Values arrive from the source graph runtime-typed: scalars, or
//! collections that are only nominally homogeneous. The [`Value`] enum is
//! decided at construction time from the source data, so downstream code
//! matches on variants instead of re-inspecting shapes at every use site.
//! The typed array variants are the coerced, store-ready form of
//! collections; [`Value::List`] is the raw source-side form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single property value as observed in the source graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Byte(i8),
    Short(i16),
    /// Raw source collection; may be heterogeneous until coerced.
    List(Vec<Value>),
    StringArray(Vec<String>),
    BooleanArray(Vec<bool>),
    IntegerArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    ByteArray(Vec<i8>),
    ShortArray(Vec<i16>),
}

/// Runtime type descriptor for observed values, used by the per-label
/// schema scan. Collections carry the component type of the first
/// non-null element, if any was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    String,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Byte,
    Short,
    List(Option<Box<ValueType>>),
}

impl Value {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is a raw (uncoerced) collection
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get long value if this is a long
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get double value if this is a double
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Runtime type of this value, `None` for null.
    ///
    /// A collection's component type is taken from its first non-null
    /// element; a collection with no such element has an unknown
    /// component type.
    pub fn value_type(&self) -> Option<ValueType> {
        let vt = match self {
            Value::Null => return None,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Long(_) => ValueType::Long,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::Byte(_) => ValueType::Byte,
            Value::Short(_) => ValueType::Short,
            Value::List(items) => ValueType::List(
                items
                    .iter()
                    .find_map(|item| item.value_type())
                    .map(Box::new),
            ),
            Value::StringArray(_) => ValueType::List(Some(Box::new(ValueType::String))),
            Value::BooleanArray(_) => ValueType::List(Some(Box::new(ValueType::Boolean))),
            Value::IntegerArray(_) => ValueType::List(Some(Box::new(ValueType::Integer))),
            Value::LongArray(_) => ValueType::List(Some(Box::new(ValueType::Long))),
            Value::FloatArray(_) => ValueType::List(Some(Box::new(ValueType::Float))),
            Value::DoubleArray(_) => ValueType::List(Some(Box::new(ValueType::Double))),
            Value::ByteArray(_) => ValueType::List(Some(Box::new(ValueType::Byte))),
            Value::ShortArray(_) => ValueType::List(Some(Box::new(ValueType::Short))),
        };
        Some(vt)
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::List(_) => "list",
            Value::StringArray(_) => "string[]",
            Value::BooleanArray(_) => "boolean[]",
            Value::IntegerArray(_) => "integer[]",
            Value::LongArray(_) => "long[]",
            Value::FloatArray(_) => "float[]",
            Value::DoubleArray(_) => "double[]",
            Value::ByteArray(_) => "byte[]",
            Value::ShortArray(_) => "short[]",
        }
    }
}

fn write_items<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Long(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::List(items) => write_items(f, items),
            Value::StringArray(items) => write_items(f, items),
            Value::BooleanArray(items) => write_items(f, items),
            Value::IntegerArray(items) => write_items(f, items),
            Value::LongArray(items) => write_items(f, items),
            Value::FloatArray(items) => write_items(f, items),
            Value::DoubleArray(items) => write_items(f, items),
            Value::ByteArray(items) => write_items(f, items),
            Value::ShortArray(items) => write_items(f, items),
        }
    }
}

// Convenience conversions
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Long(i)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(Value::from).collect())
    }
}
