//! Shared response envelope for AJAX handlers.
//!
//! AJAX responses use a `{ "data": ... }` envelope. The public read API
//! returns bare objects and lists, and admin pages return a
//! [`crate::pages::PageContext`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
