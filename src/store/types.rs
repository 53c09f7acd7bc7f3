//! Core type definitions for the embedded store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a class holds vertices or edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Vertex,
    Edge,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::Vertex => write!(f, "vertex"),
            ClassKind::Edge => write!(f, "edge"),
        }
    }
}

/// Primitive types the store can hold in a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Byte,
    Short,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::String => "string",
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::Long => "long",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::Byte => "byte",
            ScalarType::Short => "short",
        };
        write!(f, "{}", name)
    }
}

/// Declared type of a class property: a scalar, or a homogeneous array of
/// one scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Scalar(ScalarType),
    Array(ScalarType),
}

impl PropertyType {
    /// The store-side type of a runtime value, or `None` when the value is
    /// not representable (null, or an uncoerced collection).
    pub fn of(value: &crate::source::Value) -> Option<PropertyType> {
        use crate::source::Value;
        Some(match value {
            Value::Null | Value::List(_) => return None,
            Value::String(_) => PropertyType::Scalar(ScalarType::String),
            Value::Boolean(_) => PropertyType::Scalar(ScalarType::Boolean),
            Value::Integer(_) => PropertyType::Scalar(ScalarType::Integer),
            Value::Long(_) => PropertyType::Scalar(ScalarType::Long),
            Value::Float(_) => PropertyType::Scalar(ScalarType::Float),
            Value::Double(_) => PropertyType::Scalar(ScalarType::Double),
            Value::Byte(_) => PropertyType::Scalar(ScalarType::Byte),
            Value::Short(_) => PropertyType::Scalar(ScalarType::Short),
            Value::StringArray(_) => PropertyType::Array(ScalarType::String),
            Value::BooleanArray(_) => PropertyType::Array(ScalarType::Boolean),
            Value::IntegerArray(_) => PropertyType::Array(ScalarType::Integer),
            Value::LongArray(_) => PropertyType::Array(ScalarType::Long),
            Value::FloatArray(_) => PropertyType::Array(ScalarType::Float),
            Value::DoubleArray(_) => PropertyType::Array(ScalarType::Double),
            Value::ByteArray(_) => PropertyType::Array(ScalarType::Byte),
            Value::ShortArray(_) => PropertyType::Array(ScalarType::Short),
        })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, PropertyType::Array(_))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Scalar(scalar) => write!(f, "{}", scalar),
            PropertyType::Array(scalar) => write!(f, "{}[]", scalar),
        }
    }
}

/// Native record identity: the class cluster plus the position within it.
///
/// Assigned by the store at record creation and stable for the lifetime of
/// the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RecordId {
    pub cluster: u32,
    pub position: u64,
}

impl RecordId {
    pub fn new(cluster: u32, position: u64) -> Self {
        RecordId { cluster, position }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.cluster, self.position)
    }
}
