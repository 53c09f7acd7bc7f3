//! Embedded property-graph database
//!
//! Records live in per-class clusters and are addressed by their
//! [`RecordId`]. Writes go through a create / set-property / save cycle:
//! `save` is the point where live indices are maintained and uniqueness is
//! enforced. The whole database can be persisted as a single snapshot
//! file and loaded back.

use super::index::{IndexKey, PropertyIndex};
use super::record::Record;
use super::schema::ClassDefinition;
use super::types::{ClassKind, PropertyType, RecordId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("class '{0}' is not defined")]
    UnknownClass(String),

    #[error("class '{name}' is a {actual} class, expected {expected}")]
    ClassKindMismatch {
        name: String,
        expected: ClassKind,
        actual: ClassKind,
    },

    #[error("record {0} not found")]
    RecordNotFound(RecordId),

    #[error("property '{property}' is not declared on class '{class}'")]
    UnknownProperty { class: String, property: String },

    #[error("value for '{class}.{property}' has type {actual} but is declared as {declared}")]
    TypeMismatch {
        class: String,
        property: String,
        declared: PropertyType,
        actual: PropertyType,
    },

    #[error("value for '{class}.{property}' is not representable in the store")]
    UnsupportedValue { class: String, property: String },

    #[error("duplicate value '{value}' for unique index '{index}', already held by {existing}")]
    DuplicateValue {
        index: String,
        value: String,
        existing: RecordId,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory embedded database with snapshot persistence.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Database {
    classes: IndexMap<String, ClassDefinition>,
    clusters: Vec<Vec<Record>>,
    indexes: IndexMap<String, PropertyIndex>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a class of the given kind, allocating its cluster.
    ///
    /// Creating an already-existing class of the same kind is a no-op.
    pub fn create_class(&mut self, name: &str, kind: ClassKind) -> StoreResult<()> {
        if let Some(existing) = self.classes.get(name) {
            if existing.kind == kind {
                return Ok(());
            }
            return Err(StoreError::ClassKindMismatch {
                name: name.to_string(),
                expected: kind,
                actual: existing.kind,
            });
        }
        let cluster = self.clusters.len() as u32;
        self.clusters.push(Vec::new());
        self.classes
            .insert(name.to_string(), ClassDefinition::new(name, kind, cluster));
        debug!("Created {} class '{}'", kind, name);
        Ok(())
    }

    /// Declare a property on a class; re-declaration is a no-op.
    pub fn declare_property(
        &mut self,
        class: &str,
        key: &str,
        property_type: PropertyType,
    ) -> StoreResult<()> {
        let definition = self
            .classes
            .get_mut(class)
            .ok_or_else(|| StoreError::UnknownClass(class.to_string()))?;
        definition.declare_property(key, property_type);
        Ok(())
    }

    /// Class definition by name
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    /// All class definitions, in creation order
    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    /// Create an empty vertex record; its identity is assigned here.
    pub fn create_vertex(&mut self, class: &str) -> StoreResult<RecordId> {
        let definition = self.class_of_kind(class, ClassKind::Vertex)?;
        let id = self.next_record_id(definition.cluster);
        self.clusters[id.cluster as usize].push(Record::new_vertex(id, class));
        Ok(id)
    }

    /// Create an edge record between two existing records.
    pub fn create_edge(&mut self, class: &str, from: RecordId, to: RecordId) -> StoreResult<RecordId> {
        let definition = self.class_of_kind(class, ClassKind::Edge)?;
        let cluster = definition.cluster;
        if self.record(from).is_none() {
            return Err(StoreError::RecordNotFound(from));
        }
        if self.record(to).is_none() {
            return Err(StoreError::RecordNotFound(to));
        }
        let id = self.next_record_id(cluster);
        self.clusters[id.cluster as usize].push(Record::new_edge(id, class, from, to));
        Ok(id)
    }

    /// Set a property on a record.
    ///
    /// Fails with a typed error when the value conflicts with the class's
    /// declared property type, or when the value is not representable
    /// (null, or an uncoerced collection). Undeclared properties are
    /// accepted as-is.
    pub fn set_property(&mut self, record: RecordId, key: &str, value: crate::source::Value) -> StoreResult<()> {
        let class_name = self
            .record(record)
            .ok_or(StoreError::RecordNotFound(record))?
            .class
            .clone();
        let Some(actual) = PropertyType::of(&value) else {
            return Err(StoreError::UnsupportedValue {
                class: class_name,
                property: key.to_string(),
            });
        };
        if let Some(definition) = self.classes.get(&class_name) {
            if let Some(declared) = definition.property_type(key) {
                if declared != actual {
                    return Err(StoreError::TypeMismatch {
                        class: class_name,
                        property: key.to_string(),
                        declared,
                        actual,
                    });
                }
            }
        }
        let stored = self
            .record_mut(record)
            .ok_or(StoreError::RecordNotFound(record))?;
        stored.properties.insert(key.to_string(), value);
        Ok(())
    }

    /// Persist a record's current state into the live indices.
    ///
    /// Uniqueness is validated across all affected indices before any of
    /// them is touched, so a rejected save leaves the indices unchanged.
    pub fn save(&mut self, record: RecordId) -> StoreResult<()> {
        let stored = self
            .record(record)
            .ok_or(StoreError::RecordNotFound(record))?;
        let class = stored.class.clone();

        let mut updates: Vec<(String, Option<IndexKey>)> = Vec::new();
        for (name, index) in &self.indexes {
            if index.class != class {
                continue;
            }
            let value = stored.property(&index.property).filter(|v| !v.is_null());
            let key = match value.and_then(IndexKey::from_value) {
                Some(key) => Some(key),
                None if index.ignore_nulls => None,
                None => Some(IndexKey::Null),
            };
            if let Some(ref key) = key {
                if let Some(existing) = index.conflict(key, record) {
                    return Err(StoreError::DuplicateValue {
                        index: name.clone(),
                        value: key.to_string(),
                        existing,
                    });
                }
            }
            updates.push((name.clone(), key));
        }
        for (name, key) in updates {
            if let Some(index) = self.indexes.get_mut(&name) {
                match key {
                    Some(key) => index.insert(key, record),
                    None => index.remove(record),
                }
            }
        }
        Ok(())
    }

    /// Fetch a record by its identity
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.clusters
            .get(id.cluster as usize)?
            .get(id.position as usize)
    }

    /// Records of a class, in creation order
    pub fn records<'a>(&'a self, class: &str) -> Box<dyn Iterator<Item = &'a Record> + 'a> {
        match self.classes.get(class) {
            Some(definition) => Box::new(self.clusters[definition.cluster as usize].iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Number of records stored under a class
    pub fn record_count(&self, class: &str) -> usize {
        self.classes
            .get(class)
            .map(|definition| self.clusters[definition.cluster as usize].len())
            .unwrap_or(0)
    }

    /// Total vertex count across classes
    pub fn vertex_count(&self) -> usize {
        self.count_kind(ClassKind::Vertex)
    }

    /// Total edge count across classes
    pub fn edge_count(&self) -> usize {
        self.count_kind(ClassKind::Edge)
    }

    /// Create an index over a declared property, building it from the
    /// records already stored under the class.
    ///
    /// With `ignore_nulls`, records lacking the property are excluded
    /// rather than indexed under null. Re-creating an existing index is a
    /// no-op. A uniqueness violation among existing records fails the
    /// build and leaves no index behind.
    pub fn create_index(
        &mut self,
        class: &str,
        property: &str,
        unique: bool,
        ignore_nulls: bool,
    ) -> StoreResult<()> {
        let definition = self
            .classes
            .get(class)
            .ok_or_else(|| StoreError::UnknownClass(class.to_string()))?;
        if !definition.has_property(property) {
            return Err(StoreError::UnknownProperty {
                class: class.to_string(),
                property: property.to_string(),
            });
        }
        let mut index = PropertyIndex::new(class, property, unique, ignore_nulls);
        let name = index.name();
        if self.indexes.contains_key(&name) {
            return Ok(());
        }
        for record in &self.clusters[definition.cluster as usize] {
            let value = record.property(property).filter(|v| !v.is_null());
            let key = match value.and_then(IndexKey::from_value) {
                Some(key) => key,
                None if ignore_nulls => continue,
                None => IndexKey::Null,
            };
            if let Some(existing) = index.conflict(&key, record.id) {
                return Err(StoreError::DuplicateValue {
                    index: name,
                    value: key.to_string(),
                    existing,
                });
            }
            index.insert(key, record.id);
        }
        debug!("Created index '{}' over {} records", name, index.len());
        self.indexes.insert(name, index);
        Ok(())
    }

    /// Index by name (`Class.property`)
    pub fn index(&self, name: &str) -> Option<&PropertyIndex> {
        self.indexes.get(name)
    }

    /// All indices, in creation order
    pub fn indexes(&self) -> impl Iterator<Item = &PropertyIndex> {
        self.indexes.values()
    }

    /// Write the database to a snapshot file, whole or not at all.
    pub fn save_to(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = bincode::serialize(self)?;
        std::fs::write(path, bytes)?;
        info!("Saved database snapshot to '{}'", path.display());
        Ok(())
    }

    /// Load a database from a snapshot file.
    pub fn load_from(path: impl AsRef<Path>) -> StoreResult<Database> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let database = bincode::deserialize(&bytes)?;
        info!("Loaded database snapshot from '{}'", path.display());
        Ok(database)
    }

    fn class_of_kind(&self, name: &str, kind: ClassKind) -> StoreResult<&ClassDefinition> {
        let definition = self
            .classes
            .get(name)
            .ok_or_else(|| StoreError::UnknownClass(name.to_string()))?;
        if definition.kind != kind {
            return Err(StoreError::ClassKindMismatch {
                name: name.to_string(),
                expected: kind,
                actual: definition.kind,
            });
        }
        Ok(definition)
    }

    fn next_record_id(&self, cluster: u32) -> RecordId {
        RecordId::new(cluster, self.clusters[cluster as usize].len() as u64)
    }

    fn count_kind(&self, kind: ClassKind) -> usize {
        self.classes
            .values()
            .filter(|definition| definition.kind == kind)
            .map(|definition| self.clusters[definition.cluster as usize].len())
            .sum()
    }

    fn record_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.clusters
            .get_mut(id.cluster as usize)?
            .get_mut(id.position as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Value;
    use crate::store::types::ScalarType;

    fn gene_db() -> Database {
        let mut db = Database::new();
        db.create_class("Gene", ClassKind::Vertex).unwrap();
        db.declare_property("Gene", "name", PropertyType::Scalar(ScalarType::String))
            .unwrap();
        db
    }

    #[test]
    fn test_create_class_is_idempotent() {
        let mut db = gene_db();
        db.create_class("Gene", ClassKind::Vertex).unwrap();
        assert!(matches!(
            db.create_class("Gene", ClassKind::Edge),
            Err(StoreError::ClassKindMismatch { .. })
        ));
    }

    #[test]
    fn test_vertex_identity_assignment() {
        let mut db = gene_db();
        let first = db.create_vertex("Gene").unwrap();
        let second = db.create_vertex("Gene").unwrap();
        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert_eq!(first.cluster, second.cluster);
        assert!(db.record(first).is_some());
    }

    #[test]
    fn test_create_vertex_requires_class() {
        let mut db = Database::new();
        assert!(matches!(
            db.create_vertex("Gene"),
            Err(StoreError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_set_property_type_check() {
        let mut db = gene_db();
        let rid = db.create_vertex("Gene").unwrap();
        db.set_property(rid, "name", Value::from("TP53")).unwrap();

        assert!(matches!(
            db.set_property(rid, "name", Value::Long(7)),
            Err(StoreError::TypeMismatch { .. })
        ));
        assert!(matches!(
            db.set_property(rid, "name", Value::Null),
            Err(StoreError::UnsupportedValue { .. })
        ));
        // Undeclared properties are accepted without a declared-type check
        db.set_property(rid, "symbol", Value::Long(7)).unwrap();
    }

    #[test]
    fn test_edge_endpoints_must_exist() {
        let mut db = gene_db();
        db.create_class("INTERACTS_WITH", ClassKind::Edge).unwrap();
        let from = db.create_vertex("Gene").unwrap();
        let missing = RecordId::new(9, 9);

        assert!(matches!(
            db.create_edge("INTERACTS_WITH", from, missing),
            Err(StoreError::RecordNotFound(_))
        ));

        let to = db.create_vertex("Gene").unwrap();
        let edge = db.create_edge("INTERACTS_WITH", from, to).unwrap();
        assert!(db.record(edge).map(Record::is_edge).unwrap_or(false));
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.vertex_count(), 2);
    }

    #[test]
    fn test_index_build_and_uniqueness() {
        let mut db = gene_db();
        let first = db.create_vertex("Gene").unwrap();
        db.set_property(first, "name", Value::from("TP53")).unwrap();
        db.save(first).unwrap();

        db.create_index("Gene", "name", true, true).unwrap();

        let second = db.create_vertex("Gene").unwrap();
        db.set_property(second, "name", Value::from("TP53")).unwrap();
        let err = db.save(second).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateValue { .. }));

        // A distinct value is accepted
        db.set_property(second, "name", Value::from("EGFR")).unwrap();
        db.save(second).unwrap();
    }

    #[test]
    fn test_index_build_fails_on_existing_duplicates() {
        let mut db = gene_db();
        for _ in 0..2 {
            let rid = db.create_vertex("Gene").unwrap();
            db.set_property(rid, "name", Value::from("TP53")).unwrap();
            db.save(rid).unwrap();
        }
        assert!(matches!(
            db.create_index("Gene", "name", true, true),
            Err(StoreError::DuplicateValue { .. })
        ));
        assert!(db.index("Gene.name").is_none());
    }

    #[test]
    fn test_index_requires_declared_property() {
        let mut db = gene_db();
        assert!(matches!(
            db.create_index("Gene", "missing", false, true),
            Err(StoreError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_index_ignores_missing_properties() {
        let mut db = gene_db();
        let with_name = db.create_vertex("Gene").unwrap();
        db.set_property(with_name, "name", Value::from("TP53")).unwrap();
        db.save(with_name).unwrap();
        let without_name = db.create_vertex("Gene").unwrap();
        db.save(without_name).unwrap();

        db.create_index("Gene", "name", false, true).unwrap();
        let index = db.index("Gene.name").unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut db = gene_db();
        let rid = db.create_vertex("Gene").unwrap();
        db.set_property(rid, "name", Value::from("TP53")).unwrap();
        db.set_property(rid, "aliases", Value::StringArray(vec!["p53".into()]))
            .unwrap();
        db.save(rid).unwrap();
        db.create_index("Gene", "name", true, true).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.db");
        db.save_to(&path).unwrap();

        let restored = Database::load_from(&path).unwrap();
        assert_eq!(restored.record_count("Gene"), 1);
        assert_eq!(
            restored.record(rid).and_then(|r| r.property("name")),
            Some(&Value::from("TP53"))
        );
        let index = restored.index("Gene.name").unwrap();
        assert!(index.unique);
        assert_eq!(index.len(), 1);
    }
}
