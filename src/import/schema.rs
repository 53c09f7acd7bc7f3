//! Per-label class definition from the source schema scan

use super::coerce;
use crate::source::ValueType;
use crate::store::{ClassKind, Database, StoreResult};
use indexmap::IndexMap;

/// Create the class for a label and declare one property per observed,
/// non-ignored key.
///
/// Property types follow the schema scan's first-value-wins inference
/// through the coercion type mapping. Both the class and its properties
/// tolerate re-declaration, so labels shared between passes (or between
/// multi-label nodes) converge on one definition.
pub fn define_class(
    db: &mut Database,
    label: &str,
    kind: ClassKind,
    key_types: &IndexMap<String, ValueType>,
    ignored: &[&str],
) -> StoreResult<()> {
    db.create_class(label, kind)?;
    for (key, observed) in key_types {
        if ignored.contains(&key.as_str()) {
            continue;
        }
        db.declare_property(label, key, coerce::target_type(observed))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::NODE_IGNORED_FIELDS;
    use crate::store::{PropertyType, ScalarType};

    #[test]
    fn test_define_class_declares_observed_keys() {
        let mut db = Database::new();
        let mut key_types = IndexMap::new();
        key_types.insert("name".to_string(), ValueType::String);
        key_types.insert(
            "aliases".to_string(),
            ValueType::List(Some(Box::new(ValueType::String))),
        );
        key_types.insert("__id".to_string(), ValueType::Long);

        define_class(
            &mut db,
            "Gene",
            ClassKind::Vertex,
            &key_types,
            &NODE_IGNORED_FIELDS,
        )
        .unwrap();

        let class = db.class("Gene").unwrap();
        assert_eq!(
            class.property_type("name"),
            Some(PropertyType::Scalar(ScalarType::String))
        );
        assert_eq!(
            class.property_type("aliases"),
            Some(PropertyType::Array(ScalarType::String))
        );
        // Bookkeeping keys are never declared
        assert!(!class.has_property("__id"));
    }

    #[test]
    fn test_define_class_twice_is_stable() {
        let mut db = Database::new();
        let mut key_types = IndexMap::new();
        key_types.insert("name".to_string(), ValueType::String);

        define_class(&mut db, "Gene", ClassKind::Vertex, &key_types, &[]).unwrap();
        key_types.insert("name".to_string(), ValueType::Long);
        define_class(&mut db, "Gene", ClassKind::Vertex, &key_types, &[]).unwrap();

        assert_eq!(
            db.class("Gene").unwrap().property_type("name"),
            Some(PropertyType::Scalar(ScalarType::String))
        );
    }
}
