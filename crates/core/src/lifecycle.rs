//! Status cascade from a project to its web resources.
//!
//! When a project's status changes, its web resources follow:
//!
//! | Project becomes | Resources affected      | Resources become |
//! |-----------------|-------------------------|------------------|
//! | `inactive`      | `active`, `inactive`    | `inactive`       |
//! | `deleted`       | all                     | `deleted`        |
//! | `active`        | none                    | unchanged        |

use crate::status::{ProjectStatus, StatusId, WebResourceStatus};

/// Bulk status change to apply to a project's web resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeAction {
    /// Resource statuses the action touches.
    pub affected: &'static [WebResourceStatus],
    /// Status those resources end up in.
    pub target: WebResourceStatus,
}

impl CascadeAction {
    pub fn applies_to(&self, status: WebResourceStatus) -> bool {
        self.affected.contains(&status)
    }

    /// Database IDs of the affected statuses, for a `status_id = ANY($n)` bind.
    pub fn affected_ids(&self) -> Vec<StatusId> {
        self.affected.iter().map(|s| s.id()).collect()
    }

    /// Status a resource currently in `current` ends up in.
    pub fn apply(&self, current: WebResourceStatus) -> WebResourceStatus {
        if self.applies_to(current) {
            self.target
        } else {
            current
        }
    }
}

/// Cascade triggered by a project moving into `project_status`.
pub fn cascade_for(project_status: ProjectStatus) -> Option<CascadeAction> {
    match project_status {
        ProjectStatus::Inactive => Some(CascadeAction {
            affected: &[WebResourceStatus::Active, WebResourceStatus::Inactive],
            target: WebResourceStatus::Inactive,
        }),
        ProjectStatus::Deleted => Some(CascadeAction {
            affected: WebResourceStatus::ALL,
            target: WebResourceStatus::Deleted,
        }),
        ProjectStatus::Active => None,
    }
}

/// Whether a resource may move from `from` to `to`.
///
/// `deleted` is terminal; re-deleting is an allowed no-op.
pub fn can_transition(from: WebResourceStatus, to: WebResourceStatus) -> bool {
    from != WebResourceStatus::Deleted || to == WebResourceStatus::Deleted
}
