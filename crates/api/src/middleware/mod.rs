//! Request extractors for caller identity.
//!
//! - [`auth::AuthUser`] -- requires a valid Bearer token for an active user.
//! - [`auth::MaybeAuthUser`] -- same, but anonymous requests are allowed.
//!
//! Project roles are resolved inside handlers, not here.

pub mod auth;
