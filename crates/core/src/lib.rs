//! Domain logic for project web resources.
//!
//! This crate has no I/O: the database layer (`webresources-db`) and the HTTP
//! layer (`webresources-api`) both build on the types and rules defined here.

pub mod access;
pub mod assets;
pub mod data_format;
pub mod error;
pub mod lifecycle;
pub mod ordering;
pub mod sanitize;
pub mod status;
pub mod types;
pub mod url_check;
pub mod webresource;
