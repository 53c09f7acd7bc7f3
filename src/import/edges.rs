//! Edge import: endpoint resolution through the identity map

use super::{apply_properties, IdentityMap, ImportReport, ImportResult};
use crate::import::schema::define_class;
use crate::source::{SourceGraph, EDGE_IGNORED_FIELDS};
use crate::store::{ClassKind, Database};
use tracing::{error, info};

/// Import all edges, label by label.
///
/// Endpoints resolve through the identity map built during node import.
/// A miss means the referenced node failed to import or never existed;
/// that edge is reported explicitly and skipped, never silently dropped.
pub(super) fn import_edges<G: SourceGraph>(
    source: &G,
    db: &mut Database,
    identities: &IdentityMap,
    report: &mut ImportReport,
) -> ImportResult<()> {
    let labels = source.edge_labels();
    for (i, label) in labels.iter().enumerate() {
        info!(
            "Creating edges with label '{}' ({}/{})...",
            label,
            i + 1,
            labels.len()
        );
        define_class(
            db,
            label,
            ClassKind::Edge,
            &source.edge_key_types(label),
            &EDGE_IGNORED_FIELDS,
        )?;
        for edge in source.edges(label) {
            let (from, to) = match (identities.get(edge.from_id), identities.get(edge.to_id)) {
                (Some(from), Some(to)) => (from, to),
                (from, to) => {
                    let missing = if from.is_none() { edge.from_id } else { edge.to_id };
                    error!(
                        "Edge '{}[:{}]' references node '{}' which was not imported",
                        edge.id, label, missing
                    );
                    report.edges_unresolved += 1;
                    continue;
                }
            };
            let record = match db.create_edge(label, from, to) {
                Ok(record) => record,
                Err(e) => {
                    error!("Failed to create edge '{}[:{}]': {}", edge.id, label, e);
                    report.edges_failed += 1;
                    continue;
                }
            };
            apply_properties(
                db,
                record,
                edge.id,
                label,
                &edge.properties,
                &EDGE_IGNORED_FIELDS,
                report,
            );
            match db.save(record) {
                Ok(()) => report.edges_created += 1,
                Err(e) => {
                    error!("Failed to persist edge '{}[:{}]': {}", edge.id, label, e);
                    report.edges_failed += 1;
                }
            }
        }
    }
    Ok(())
}
