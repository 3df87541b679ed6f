//! Project-scoped authorization.
//!
//! Handlers resolve the caller's [`Role`] on a project with
//! [`resolve_role`] and then ask [`decide`] what the surface they serve
//! should do. Both are pure functions so the rules are testable on their own.

use crate::error::CoreError;
use crate::types::DbId;

/// Message shown to members who are not project administrators.
pub const NO_RIGHTS_TO_ACCESS: &str = "You are not member of the administrators group of \
     this project and therefore not allowed to alter the settings of the project";

/// Description used for unresolved entities on admin pages.
pub fn does_not_exist_msg(entity: &str) -> String {
    format!("{entity} matching query does not exist.")
}

/// A user's membership on a project, as stored in `project_members.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRole {
    Admin,
    Contributor,
}

impl ProjectRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectRole::Admin => "admin",
            ProjectRole::Contributor => "contributor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "admin" => Some(ProjectRole::Admin),
            "contributor" => Some(ProjectRole::Contributor),
            _ => None,
        }
    }
}

/// Effective role of a caller on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Anonymous,
    /// Signed in, but no visibility of the project.
    Authenticated,
    Contributor,
    Admin,
}

/// Combine caller identity and project membership into a [`Role`].
///
/// `membership` is `None` when the project does not exist, is deleted, or the
/// caller is not a member; all three are indistinguishable to the caller.
pub fn resolve_role(caller: Option<DbId>, membership: Option<ProjectRole>) -> Role {
    match (caller, membership) {
        (None, _) => Role::Anonymous,
        (Some(_), None) => Role::Authenticated,
        (Some(_), Some(ProjectRole::Contributor)) => Role::Contributor,
        (Some(_), Some(ProjectRole::Admin)) => Role::Admin,
    }
}

/// Request surface a handler belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Administrator pages.
    Page,
    /// AJAX endpoints used by administrator pages.
    Ajax,
    /// Public read API.
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    NotFound,
    PermissionDenied,
    Locked,
}

/// Decide what `role` may do on a project through `surface`.
///
/// Anonymous callers are sent to the login page on admin pages and get a
/// plain "not found" everywhere else. Locking only affects writes by admins;
/// everyone else is rejected before the lock is considered.
pub fn decide(role: Role, surface: Surface, operation: Operation, locked: bool) -> Decision {
    let admin_decision = || {
        if operation == Operation::Write && locked {
            Decision::Locked
        } else {
            Decision::Allow
        }
    };

    match (surface, role) {
        (Surface::Page, Role::Anonymous) => Decision::RedirectToLogin,
        (_, Role::Anonymous) => Decision::NotFound,

        (Surface::Page, Role::Admin) => admin_decision(),
        (Surface::Page, Role::Contributor) => Decision::PermissionDenied,
        (Surface::Page, Role::Authenticated) => Decision::NotFound,

        (Surface::Ajax, Role::Admin) => admin_decision(),
        (Surface::Ajax, _) => Decision::NotFound,

        (Surface::Api, Role::Admin | Role::Contributor) if operation == Operation::Read => {
            Decision::Allow
        }
        (Surface::Api, _) => Decision::NotFound,
    }
}

impl Decision {
    /// Convert a non-`Allow` decision for a project into the matching error.
    ///
    /// `RedirectToLogin` maps to `Unauthorized`; page handlers intercept it
    /// before calling this.
    pub fn into_result(self, project_id: DbId) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::RedirectToLogin => {
                Err(CoreError::Unauthorized("Authentication required".to_string()))
            }
            Decision::NotFound => Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }),
            Decision::PermissionDenied => Err(CoreError::Forbidden(NO_RIGHTS_TO_ACCESS.to_string())),
            Decision::Locked => Err(CoreError::Locked(
                "The project is locked. Web resources cannot be changed.".to_string(),
            )),
        }
    }
}
