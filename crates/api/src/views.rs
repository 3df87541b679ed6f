//! JSON representations of web resources.
//!
//! Admin pages and AJAX endpoints see the full record, status and order
//! included. The public API sees only what a map needs to draw the layer.

use serde::Serialize;
use webresources_core::assets::symbol_url;
use webresources_core::types::{DbId, Timestamp};
use webresources_db::models::project::Project;
use webresources_db::models::webresource::WebResource;

/// Full web resource as shown to project administrators.
#[derive(Debug, Serialize)]
pub struct AdminWebResource {
    pub id: DbId,
    pub project_id: DbId,
    pub creator_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub data_format: String,
    pub url: String,
    pub colour: String,
    /// Public URL of the symbol image.
    pub symbol: Option<String>,
    pub order: i32,
    pub status: &'static str,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AdminWebResource {
    pub fn new(resource: &WebResource, media_url: &str) -> Self {
        Self {
            id: resource.id,
            project_id: resource.project_id,
            creator_id: resource.creator_id,
            name: resource.name.clone(),
            description: resource.description.clone(),
            data_format: resource.data_format.clone(),
            url: resource.url.clone(),
            colour: resource.colour.clone(),
            symbol: resource.symbol.as_deref().map(|p| symbol_url(media_url, p)),
            order: resource.sort_order,
            status: resource.status().map_or("unknown", |s| s.name()),
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }

    pub fn list(resources: &[WebResource], media_url: &str) -> Vec<Self> {
        resources.iter().map(|r| Self::new(r, media_url)).collect()
    }
}

/// Public representation served by the read API.
#[derive(Debug, Serialize)]
pub struct PublicWebResource {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub data_format: String,
    pub url: String,
    pub colour: String,
    pub symbol: Option<String>,
}

impl PublicWebResource {
    pub fn new(resource: &WebResource, media_url: &str) -> Self {
        Self {
            id: resource.id,
            name: resource.name.clone(),
            description: resource.description.clone(),
            data_format: resource.data_format.clone(),
            url: resource.url.clone(),
            colour: resource.colour.clone(),
            symbol: resource.symbol.as_deref().map(|p| symbol_url(media_url, p)),
        }
    }
}

/// Project summary embedded in admin page contexts.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub status: &'static str,
    pub islocked: bool,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            status: project.status().map_or("unknown", |s| s.name()),
            islocked: project.islocked,
        }
    }
}
