//! Web resource entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use webresources_core::data_format::DataFormat;
use webresources_core::error::CoreError;
use webresources_core::status::{StatusId, WebResourceStatus};
use webresources_core::types::{DbId, Timestamp};
use webresources_core::webresource::CleanedForm;

/// A web resource row from the `webresources` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct WebResource {
    pub id: DbId,
    pub project_id: DbId,
    pub creator_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub data_format: String,
    pub url: String,
    pub colour: String,
    /// Storage path of the symbol image, if one was uploaded.
    pub symbol: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WebResource {
    pub fn status(&self) -> Option<WebResourceStatus> {
        WebResourceStatus::from_id(self.status_id)
    }

    pub fn format(&self) -> Option<DataFormat> {
        self.data_format.parse().ok()
    }
}

/// DTO for creating a new web resource.
///
/// Free-text fields are expected to be sanitized already.
#[derive(Debug, Clone)]
pub struct CreateWebResource {
    pub name: String,
    pub description: Option<String>,
    pub data_format: DataFormat,
    pub url: String,
    /// Defaults to `#0033ff` if omitted.
    pub colour: Option<String>,
    pub symbol: Option<String>,
}

/// DTO for updating an existing web resource. All fields are optional.
///
/// `project_id` and `creator_id` are deliberately absent: neither changes
/// after creation.
#[derive(Debug, Clone, Default)]
pub struct UpdateWebResource {
    pub name: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub data_format: Option<DataFormat>,
    pub url: Option<String>,
    pub colour: Option<String>,
    pub symbol: Option<String>,
    /// Remove the current symbol. Ignored when `symbol` is set.
    pub clear_symbol: bool,
}

impl TryFrom<CleanedForm> for CreateWebResource {
    type Error = CoreError;

    /// Requires `name`, `url` and a resolved `data_format`.
    fn try_from(form: CleanedForm) -> Result<Self, Self::Error> {
        let (Some(name), Some(url), Some(data_format)) = (form.name, form.url, form.data_format)
        else {
            return Err(CoreError::Internal(
                "Web resource form is missing name, url or data format".to_string(),
            ));
        };
        Ok(Self {
            name,
            description: form.description,
            data_format,
            url,
            colour: form.colour,
            symbol: form.symbol,
        })
    }
}

impl From<CleanedForm> for UpdateWebResource {
    fn from(form: CleanedForm) -> Self {
        Self {
            name: form.name,
            description: form.description,
            data_format: form.data_format,
            url: form.url,
            colour: form.colour,
            symbol: form.symbol,
            clear_symbol: form.clear_symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn create_requires_resolved_format() {
        let form = CleanedForm {
            name: Some("Roads".to_string()),
            url: Some("http://example.com/roads.kml".to_string()),
            ..CleanedForm::default()
        };
        assert_matches!(CreateWebResource::try_from(form.clone()), Err(CoreError::Internal(_)));

        let form = CleanedForm {
            data_format: Some(DataFormat::Kml),
            ..form
        };
        let input = CreateWebResource::try_from(form).unwrap();
        assert_eq!(input.name, "Roads");
        assert_eq!(input.data_format, DataFormat::Kml);
        assert_eq!(input.colour, None);
    }
}
