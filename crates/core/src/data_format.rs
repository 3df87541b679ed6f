//! Supported web resource data formats and content-type classification.
//!
//! Classification is driven purely by the media type a remote server
//! declares; response bodies are never inspected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MEDIA_TYPE_GEOJSON: &str = "application/json";
pub const MEDIA_TYPE_KML: &str = "application/vnd.google-earth.kml+xml";
pub const MEDIA_TYPE_GPX: &str = "application/gpx+xml";

/// Format of an externally hosted dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFormat {
    #[serde(rename = "GeoJSON")]
    GeoJson,
    #[serde(rename = "KML")]
    Kml,
    #[serde(rename = "GPX")]
    Gpx,
}

impl DataFormat {
    pub const ALL: &'static [DataFormat] = &[DataFormat::GeoJson, DataFormat::Kml, DataFormat::Gpx];

    /// Label stored in the `data_format` column and used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::GeoJson => "GeoJSON",
            DataFormat::Kml => "KML",
            DataFormat::Gpx => "GPX",
        }
    }

    /// Media type a server is expected to declare for this format.
    pub fn media_type(self) -> &'static str {
        match self {
            DataFormat::GeoJson => MEDIA_TYPE_GEOJSON,
            DataFormat::Kml => MEDIA_TYPE_KML,
            DataFormat::Gpx => MEDIA_TYPE_GPX,
        }
    }

    /// Classify a `Content-Type` header value.
    ///
    /// Parameters (`; charset=utf-8`) are ignored and the comparison is
    /// case-insensitive. Returns `None` for any unsupported media type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let media = media_type(content_type);
        Self::ALL.iter().copied().find(|f| f.media_type() == media)
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid data format '{s}'. Must be one of: GeoJSON, KML, GPX"
                ))
            })
    }
}

/// Reduce a `Content-Type` header value to its bare, lowercase media type.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
