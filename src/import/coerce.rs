//! Coercion of runtime-typed source values into store-representable ones
//!
//! Scalars pass through unchanged. A raw collection becomes a typed array
//! whose element type is decided by the first non-null element; the
//! remaining elements must match it exactly (a mixed collection fails
//! that one property, not the record). A collection with no non-null
//! element, or one whose first element is itself a collection, falls back
//! to a string array built by stringifying every element. Nulls are
//! dropped, never written.

use crate::source::{Value, ValueType};
use crate::store::{PropertyType, ScalarType};
use thiserror::Error;

/// A single property value that cannot be represented in the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("collection element {index} has type {actual}, expected {expected}")]
    MixedCollection {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Coerce a source value into a store-representable one.
///
/// Returns `Ok(None)` for null values, which are dropped rather than
/// written. Coercing an already-representable value returns it unchanged.
pub fn coerce(value: Value) -> Result<Option<Value>, CoercionError> {
    match value {
        Value::Null => Ok(None),
        Value::List(items) => convert_list(items).map(Some),
        scalar_or_array => Ok(Some(scalar_or_array)),
    }
}

/// Target type for an observed source type, as used by the schema scan.
///
/// Collections of unknown or non-primitive component type map to string
/// arrays, mirroring the stringification fallback of [`coerce`].
pub fn target_type(observed: &ValueType) -> PropertyType {
    match observed {
        ValueType::String => PropertyType::Scalar(ScalarType::String),
        ValueType::Boolean => PropertyType::Scalar(ScalarType::Boolean),
        ValueType::Integer => PropertyType::Scalar(ScalarType::Integer),
        ValueType::Long => PropertyType::Scalar(ScalarType::Long),
        ValueType::Float => PropertyType::Scalar(ScalarType::Float),
        ValueType::Double => PropertyType::Scalar(ScalarType::Double),
        ValueType::Byte => PropertyType::Scalar(ScalarType::Byte),
        ValueType::Short => PropertyType::Scalar(ScalarType::Short),
        ValueType::List(Some(component)) => PropertyType::Array(component_scalar(component)),
        ValueType::List(None) => PropertyType::Array(ScalarType::String),
    }
}

fn component_scalar(component: &ValueType) -> ScalarType {
    match component {
        ValueType::String => ScalarType::String,
        ValueType::Boolean => ScalarType::Boolean,
        ValueType::Integer => ScalarType::Integer,
        ValueType::Long => ScalarType::Long,
        ValueType::Float => ScalarType::Float,
        ValueType::Double => ScalarType::Double,
        ValueType::Byte => ScalarType::Byte,
        ValueType::Short => ScalarType::Short,
        ValueType::List(_) => ScalarType::String,
    }
}

fn convert_list(items: Vec<Value>) -> Result<Value, CoercionError> {
    let kind = items
        .iter()
        .find(|item| !item.is_null())
        .and_then(|item| match item {
            Value::String(_) => Some(ScalarType::String),
            Value::Boolean(_) => Some(ScalarType::Boolean),
            Value::Integer(_) => Some(ScalarType::Integer),
            Value::Long(_) => Some(ScalarType::Long),
            Value::Float(_) => Some(ScalarType::Float),
            Value::Double(_) => Some(ScalarType::Double),
            Value::Byte(_) => Some(ScalarType::Byte),
            Value::Short(_) => Some(ScalarType::Short),
            _ => None,
        });

    let array = match kind {
        Some(ScalarType::String) => Value::StringArray(collect(items, "string", |item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })?),
        Some(ScalarType::Boolean) => {
            Value::BooleanArray(collect(items, "boolean", |item| match item {
                Value::Boolean(b) => Some(b),
                _ => None,
            })?)
        }
        Some(ScalarType::Integer) => {
            Value::IntegerArray(collect(items, "integer", |item| match item {
                Value::Integer(i) => Some(i),
                _ => None,
            })?)
        }
        Some(ScalarType::Long) => Value::LongArray(collect(items, "long", |item| match item {
            Value::Long(i) => Some(i),
            _ => None,
        })?),
        Some(ScalarType::Float) => Value::FloatArray(collect(items, "float", |item| match item {
            Value::Float(v) => Some(v),
            _ => None,
        })?),
        Some(ScalarType::Double) => Value::DoubleArray(collect(items, "double", |item| match item {
            Value::Double(v) => Some(v),
            _ => None,
        })?),
        Some(ScalarType::Byte) => Value::ByteArray(collect(items, "byte", |item| match item {
            Value::Byte(v) => Some(v),
            _ => None,
        })?),
        Some(ScalarType::Short) => Value::ShortArray(collect(items, "short", |item| match item {
            Value::Short(v) => Some(v),
            _ => None,
        })?),
        None => Value::StringArray(items.iter().map(Value::to_string).collect()),
    };
    Ok(array)
}

fn collect<T>(
    items: Vec<Value>,
    expected: &'static str,
    extract: fn(Value) -> Option<T>,
) -> Result<Vec<T>, CoercionError> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if item.is_null() {
            continue;
        }
        let actual = item.type_name();
        match extract(item) {
            Some(element) => out.push(element),
            None => {
                return Err(CoercionError::MixedCollection {
                    index,
                    expected,
                    actual,
                })
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_pass_through_unchanged() {
        for value in [
            Value::from("TP53"),
            Value::from(true),
            Value::from(42i64),
            Value::from(0.5f64),
            Value::Byte(1),
            Value::Short(2),
        ] {
            assert_eq!(coerce(value.clone()).unwrap(), Some(value));
        }
    }

    #[test]
    fn test_null_is_dropped() {
        assert_eq!(coerce(Value::Null).unwrap(), None);
    }

    #[test]
    fn test_homogeneous_list_becomes_typed_array() {
        let list = Value::List(vec![Value::from("p53"), Value::from("TRP53")]);
        assert_eq!(
            coerce(list).unwrap(),
            Some(Value::StringArray(vec!["p53".into(), "TRP53".into()]))
        );

        let longs = Value::List(vec![Value::Long(1), Value::Long(2)]);
        assert_eq!(coerce(longs).unwrap(), Some(Value::LongArray(vec![1, 2])));
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let list = Value::List(vec![Value::from("a"), Value::from("b")]);
        let once = coerce(list).unwrap().unwrap();
        let twice = coerce(once.clone()).unwrap().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_first_non_null_element_decides_the_type() {
        let list = Value::List(vec![Value::Null, Value::Long(7), Value::Long(8)]);
        assert_eq!(coerce(list).unwrap(), Some(Value::LongArray(vec![7, 8])));
    }

    #[test]
    fn test_null_elements_are_dropped_from_typed_arrays() {
        let list = Value::List(vec![Value::from("a"), Value::Null, Value::from("b")]);
        assert_eq!(
            coerce(list).unwrap(),
            Some(Value::StringArray(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn test_mixed_collection_fails_fast() {
        let list = Value::List(vec![Value::Long(1), Value::from("x")]);
        assert_eq!(
            coerce(list),
            Err(CoercionError::MixedCollection {
                index: 1,
                expected: "long",
                actual: "string",
            })
        );

        // Numeric widths do not mix either
        let widths = Value::List(vec![Value::Long(1), Value::Integer(2)]);
        assert!(coerce(widths).is_err());
    }

    #[test]
    fn test_empty_and_all_null_lists_fall_back_to_strings() {
        assert_eq!(
            coerce(Value::List(vec![])).unwrap(),
            Some(Value::StringArray(vec![]))
        );
        assert_eq!(
            coerce(Value::List(vec![Value::Null, Value::Null])).unwrap(),
            Some(Value::StringArray(vec!["null".into(), "null".into()]))
        );
    }

    #[test]
    fn test_nested_lists_are_stringified() {
        let nested = Value::List(vec![Value::List(vec![Value::Long(1), Value::Long(2)])]);
        assert_eq!(
            coerce(nested).unwrap(),
            Some(Value::StringArray(vec!["[1, 2]".into()]))
        );
    }

    #[test]
    fn test_target_type_mapping() {
        assert_eq!(
            target_type(&ValueType::String),
            PropertyType::Scalar(ScalarType::String)
        );
        assert_eq!(
            target_type(&ValueType::List(Some(Box::new(ValueType::Long)))),
            PropertyType::Array(ScalarType::Long)
        );
        assert_eq!(
            target_type(&ValueType::List(None)),
            PropertyType::Array(ScalarType::String)
        );
        assert_eq!(
            target_type(&ValueType::List(Some(Box::new(ValueType::List(None))))),
            PropertyType::Array(ScalarType::String)
        );
    }
}
