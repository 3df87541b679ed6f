//! Reorder planning for a project's web resources.
//!
//! [`plan_reorder`] validates a requested id sequence against the ids that
//! may be reordered and turns it into per-id order values. It either accepts
//! the whole sequence or rejects it; partial plans are never produced.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Order value to write for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssignment {
    pub id: DbId,
    pub order: i32,
}

/// Plan a reorder of `requested` ids.
///
/// `eligible` holds the ids of the project's non-deleted resources. Each
/// requested id receives its 0-based position in `requested`. Ids not listed
/// are left out of the plan and keep their current order.
pub fn plan_reorder(
    requested: &[DbId],
    eligible: &HashSet<DbId>,
) -> Result<Vec<OrderAssignment>, CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    let mut duplicates = Vec::new();
    let mut unknown = Vec::new();

    for &id in requested {
        if !seen.insert(id) {
            if !duplicates.contains(&id) {
                duplicates.push(id);
            }
        } else if !eligible.contains(&id) {
            unknown.push(id);
        }
    }

    if !unknown.is_empty() {
        return Err(CoreError::Validation(format!(
            "One or more web resources were not found in this project: {}",
            join_ids(&unknown)
        )));
    }
    if !duplicates.is_empty() {
        return Err(CoreError::Validation(format!(
            "Web resources listed more than once: {}",
            join_ids(&duplicates)
        )));
    }

    requested
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let order = i32::try_from(index).map_err(|_| {
                CoreError::Validation("Too many web resources in order list".to_string())
            })?;
            Ok(OrderAssignment { id, order })
        })
        .collect()
}

fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
