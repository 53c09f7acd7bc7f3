//! Node import: one target vertex per source node

use super::{apply_properties, IdentityMap, ImportReport, ImportResult};
use crate::import::schema::define_class;
use crate::source::{SourceGraph, NODE_IGNORED_FIELDS};
use crate::store::{ClassKind, Database};
use tracing::{error, info};

/// Import all nodes, label by label, recording each created vertex in the
/// identity map.
///
/// A node's vertex is created under its primary class (first label). A
/// vertex that fails to persist is counted and left out of the identity
/// map, so edges referencing it later fail explicitly rather than
/// silently.
pub(super) fn import_nodes<G: SourceGraph>(
    source: &G,
    db: &mut Database,
    identities: &mut IdentityMap,
    report: &mut ImportReport,
) -> ImportResult<()> {
    let labels = source.node_labels();
    for (i, label) in labels.iter().enumerate() {
        info!(
            "Creating vertices with label '{}' ({}/{})...",
            label,
            i + 1,
            labels.len()
        );
        define_class(
            db,
            label,
            ClassKind::Vertex,
            &source.node_key_types(label),
            &NODE_IGNORED_FIELDS,
        )?;
        for node in source.nodes(label) {
            let record = match db.create_vertex(label) {
                Ok(record) => record,
                Err(e) => {
                    error!("Failed to create vertex for node '{}[:{}]': {}", node.id, label, e);
                    report.nodes_failed += 1;
                    continue;
                }
            };
            apply_properties(
                db,
                record,
                node.id,
                label,
                &node.properties,
                &NODE_IGNORED_FIELDS,
                report,
            );
            match db.save(record) {
                Ok(()) => {
                    identities.insert(node.id, record)?;
                    report.nodes_created += 1;
                }
                Err(e) => {
                    error!("Failed to persist vertex for node '{}[:{}]': {}", node.id, label, e);
                    report.nodes_failed += 1;
                }
            }
        }
    }
    Ok(())
}
