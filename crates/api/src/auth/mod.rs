//! Caller identity.
//!
//! Sign-in itself belongs to the host platform; this service only verifies
//! the HS256 access tokens it issues (see [`jwt`]).

pub mod jwt;
