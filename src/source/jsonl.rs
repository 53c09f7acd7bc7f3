//! JSON-Lines reader for workspace source graphs
//!
//! The workspace's merged graph is a `.jsonl` file with one record per
//! line. A line is classified by its reserved keys:
//!
//! - node: `{"__id": 1, "__label": "Gene", "name": "TP53", ...}`
//!   (or `"__label": ["Gene", "Protein"]` for multi-label nodes)
//! - edge: `{"__id": 5, "__label": "INTERACTS_WITH", "__from_id": 1,
//!   "__to_id": 2, ...}`
//! - index declaration: `{"__index": {"target": "node", "label": "Gene",
//!   "property": "name", "type": "unique", "array": false}}`
//!
//! Integral JSON numbers map to longs and fractional ones to doubles;
//! narrower numeric widths only enter a graph through programmatic
//! construction. Any malformed line is fatal: a half-read graph must not
//! reach the importer.

use super::model::{Edge, IndexDescription, IndexTarget, IndexType, Node};
use super::model::{FROM_ID_FIELD, ID_FIELD, LABEL_FIELD, TO_ID_FIELD};
use super::reader::MemoryGraph;
use super::{SourceError, SourceResult};
use crate::source::value::Value;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

const INDEX_FIELD: &str = "__index";

#[derive(Debug, Deserialize)]
struct IndexLine {
    target: String,
    label: String,
    property: String,
    #[serde(rename = "type")]
    index_type: String,
    #[serde(default)]
    array: bool,
}

/// Read a JSONL source graph file into a [`MemoryGraph`].
pub fn load(path: impl AsRef<Path>) -> SourceResult<MemoryGraph> {
    let path = path.as_ref();
    info!("Reading source graph '{}'...", path.display());
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut graph = MemoryGraph::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line_number = number + 1;
        let line = line.map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let json: serde_json::Value =
            serde_json::from_str(&line).map_err(|source| SourceError::Json {
                line: line_number,
                source,
            })?;
        parse_line(&mut graph, json, line_number)?;
    }
    info!(
        "Read {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn parse_line(
    graph: &mut MemoryGraph,
    json: serde_json::Value,
    line: usize,
) -> SourceResult<()> {
    let serde_json::Value::Object(mut fields) = json else {
        return Err(SourceError::Record {
            line,
            reason: "expected a JSON object".to_string(),
        });
    };

    if let Some(index) = fields.remove(INDEX_FIELD) {
        let index: IndexLine =
            serde_json::from_value(index).map_err(|source| SourceError::Json { line, source })?;
        graph.declare_index(parse_index(index, line)?);
        return Ok(());
    }

    let id = take_id(&mut fields, ID_FIELD, line)?;
    let labels = take_labels(&mut fields, line)?;

    if fields.contains_key(FROM_ID_FIELD) || fields.contains_key(TO_ID_FIELD) {
        let from_id = take_id(&mut fields, FROM_ID_FIELD, line)?;
        let to_id = take_id(&mut fields, TO_ID_FIELD, line)?;
        let label = labels.into_iter().next().ok_or_else(|| SourceError::Record {
            line,
            reason: "edge is missing a label".to_string(),
        })?;
        let mut edge = Edge::new(id, label, from_id, to_id);
        for (key, value) in fields {
            edge.set_property(key, convert_json(value, line)?);
        }
        graph.add_edge(edge);
    } else {
        if labels.is_empty() {
            return Err(SourceError::Record {
                line,
                reason: "node is missing a label".to_string(),
            });
        }
        let mut node = Node::with_labels(id, labels);
        for (key, value) in fields {
            node.set_property(key, convert_json(value, line)?);
        }
        graph.add_node(node);
    }
    Ok(())
}

fn parse_index(index: IndexLine, line: usize) -> SourceResult<IndexDescription> {
    let target = match index.target.as_str() {
        "node" => IndexTarget::Node,
        "edge" => IndexTarget::Edge,
        other => {
            return Err(SourceError::Record {
                line,
                reason: format!("unknown index target '{}'", other),
            })
        }
    };
    let index_type = match index.index_type.as_str() {
        "unique" => IndexType::Unique,
        "non_unique" => IndexType::NonUnique,
        other => {
            return Err(SourceError::Record {
                line,
                reason: format!("unknown index type '{}'", other),
            })
        }
    };
    let mut description = IndexDescription::new(target, index.label, index.property, index_type);
    if index.array {
        description = description.array();
    }
    Ok(description)
}

fn take_id(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    field: &'static str,
    line: usize,
) -> SourceResult<u64> {
    fields
        .remove(field)
        .and_then(|value| value.as_u64())
        .ok_or(SourceError::MissingField { line, field })
}

fn take_labels(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    line: usize,
) -> SourceResult<Vec<String>> {
    match fields.remove(LABEL_FIELD) {
        Some(serde_json::Value::String(label)) => Ok(vec![label]),
        Some(serde_json::Value::Array(labels)) => labels
            .into_iter()
            .map(|label| match label {
                serde_json::Value::String(label) => Ok(label),
                _ => Err(SourceError::Record {
                    line,
                    reason: "labels must be strings".to_string(),
                }),
            })
            .collect(),
        Some(_) => Err(SourceError::Record {
            line,
            reason: "labels must be strings".to_string(),
        }),
        None => Err(SourceError::MissingField {
            line,
            field: LABEL_FIELD,
        }),
    }
}

fn convert_json(value: serde_json::Value, line: usize) -> SourceResult<Value> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(i) => Value::Long(i),
            None => Value::Double(number.as_f64().ok_or_else(|| SourceError::Record {
                line,
                reason: format!("number '{}' is out of range", number),
            })?),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::List(
            items
                .into_iter()
                .map(|item| convert_json(item, line))
                .collect::<SourceResult<Vec<Value>>>()?,
        ),
        serde_json::Value::Object(_) => {
            return Err(SourceError::Record {
                line,
                reason: "nested objects are not supported as property values".to_string(),
            })
        }
    })
}
