//! Status enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table, and its label matches
//! the `name` column of that table.

use crate::error::CoreError;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant in seed-data order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up a variant by its database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.id() == id)
            }

            /// Lowercase label used on the wire.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Look up a variant by its wire label.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.name() == name)
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Active = 1 => "active",
        Inactive = 2 => "inactive",
        Deleted = 3 => "deleted",
    }
}

define_status_enum! {
    /// Web resource lifecycle status. `Deleted` is terminal.
    WebResourceStatus {
        Active = 1 => "active",
        Inactive = 2 => "inactive",
        Deleted = 3 => "deleted",
    }
}

impl WebResourceStatus {
    /// Statuses an administrator may switch a resource between directly.
    pub const TOGGLE_TARGETS: &'static [WebResourceStatus] =
        &[WebResourceStatus::Active, WebResourceStatus::Inactive];

    /// Parse the `status` value of a toggle request.
    ///
    /// Only `active` and `inactive` are accepted; deletion has its own path.
    pub fn parse_toggle(value: &str) -> Result<Self, CoreError> {
        match Self::from_name(value) {
            Some(status) if Self::TOGGLE_TARGETS.contains(&status) => Ok(status),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{value}'. Must be one of: active, inactive"
            ))),
        }
    }
}
