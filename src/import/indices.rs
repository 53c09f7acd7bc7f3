//! Index creation from declared index descriptions

use super::{ImportReport, ImportResult};
use crate::source::{IndexType, SourceGraph};
use crate::store::Database;
use tracing::{error, info, warn};

/// Apply the source graph's declared indices to the populated classes.
///
/// Index creation is independent per description: a failure is reported
/// and the remaining indices are still attempted. Array-valued properties
/// are not indexable and are skipped with a warning. All indices are
/// built with null-ignoring semantics, so records lacking the property
/// stay out of the index.
pub(super) fn build_indices<G: SourceGraph>(
    source: &G,
    db: &mut Database,
    report: &mut ImportReport,
) -> ImportResult<()> {
    let descriptions = source.index_descriptions();
    if descriptions.is_empty() {
        return Ok(());
    }
    info!("Creating indices...");
    for description in &descriptions {
        info!(
            "Creating {} index on '{}' property for {} label '{}'...",
            description.index_type, description.property, description.target, description.label
        );
        if description.array_property {
            warn!(
                "Skipping index on array property '{}.{}'; array values are not indexable",
                description.label, description.property
            );
            report.indices_skipped += 1;
            continue;
        }
        let declared = db
            .class(&description.label)
            .map(|class| class.has_property(&description.property))
            .unwrap_or(false);
        if !declared {
            error!(
                "Cannot create index on undefined property '{}.{}'",
                description.label, description.property
            );
            report.indices_failed += 1;
            continue;
        }
        let unique = description.index_type == IndexType::Unique;
        match db.create_index(&description.label, &description.property, unique, true) {
            Ok(()) => report.indices_created += 1,
            Err(e) => {
                error!(
                    "Failed to create index on '{}.{}': {}",
                    description.label, description.property, e
                );
                report.indices_failed += 1;
            }
        }
    }
    Ok(())
}
