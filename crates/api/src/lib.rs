//! Web resources HTTP service.
//!
//! Admin pages, AJAX endpoints and the public read API for externally
//! hosted GeoJSON, KML and GPX layers attached to projects. Exposed as a
//! library so the binary and the integration tests share one router.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod url_check;
pub mod views;
