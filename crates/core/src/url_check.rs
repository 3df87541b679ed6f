//! Aggregation of URL probe outcomes into a single format or error.
//!
//! The HTTP layer performs the request and feeds what it observed into a
//! [`UrlCheckReport`]; [`UrlCheckReport::finish`] then decides between
//! exactly one [`DataFormat`] and one aggregated [`UrlCheckError`].

use crate::data_format::DataFormat;

/// Headline shown before the list of collected messages.
pub const URL_CHECK_HEADLINE: &str = "The URL cannot be used due to:";

/// A URL could not be used as a web resource.
///
/// `messages` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{URL_CHECK_HEADLINE} {}", .messages.join(" "))]
pub struct UrlCheckError {
    pub messages: Vec<String>,
}

/// Collects what a single probe observed.
#[derive(Debug, Default)]
pub struct UrlCheckReport {
    messages: Vec<String>,
    format: Option<DataFormat>,
}

impl UrlCheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The server answered with a non-success status code.
    pub fn server_returned(&mut self, code: u16) {
        self.messages
            .push(format!("The server returned {code} error."));
    }

    /// The server could not be reached, or gave a reason for refusing.
    pub fn unreachable(&mut self, reason: &str) {
        let reason = reason.trim().trim_end_matches('.');
        self.messages
            .push(format!("Failed to reach the server: {reason}."));
    }

    /// The request succeeded; classify the declared content type.
    pub fn content_type(&mut self, header: Option<&str>) {
        match header.and_then(DataFormat::from_content_type) {
            Some(format) => self.format = Some(format),
            None => {
                let shown = header.map(str::trim).filter(|h| !h.is_empty()).unwrap_or("unknown");
                self.messages.push(format!(
                    "Data format `{shown}` is currently not supported."
                ));
            }
        }
    }

    /// Resolve the report into a format or an aggregated error.
    pub fn finish(mut self) -> Result<DataFormat, UrlCheckError> {
        if self.messages.is_empty() {
            if let Some(format) = self.format {
                return Ok(format);
            }
            self.messages
                .push("The server did not send a response.".to_string());
        }
        Err(UrlCheckError {
            messages: self.messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_content_type_yields_format() {
        let mut report = UrlCheckReport::new();
        report.content_type(Some("application/vnd.google-earth.kml+xml"));
        assert_eq!(report.finish().unwrap(), DataFormat::Kml);
    }

    #[test]
    fn unsupported_content_type_is_an_error_not_an_empty_success() {
        let mut report = UrlCheckReport::new();
        report.content_type(Some("text/html; charset=utf-8"));
        let err = report.finish().unwrap_err();
        assert_eq!(
            err.messages,
            vec!["Data format `text/html; charset=utf-8` is currently not supported.".to_string()]
        );
    }

    #[test]
    fn missing_content_type_is_reported_as_unknown() {
        let mut report = UrlCheckReport::new();
        report.content_type(None);
        let err = report.finish().unwrap_err();
        assert_eq!(
            err.messages,
            vec!["Data format `unknown` is currently not supported.".to_string()]
        );
    }

    #[test]
    fn http_failure_collects_code_and_reason() {
        let mut report = UrlCheckReport::new();
        report.server_returned(404);
        report.unreachable("Not Found");
        let err = report.finish().unwrap_err();
        assert_eq!(
            err.messages,
            vec![
                "The server returned 404 error.".to_string(),
                "Failed to reach the server: Not Found.".to_string(),
            ]
        );
    }

    #[test]
    fn reason_does_not_double_the_full_stop() {
        let mut report = UrlCheckReport::new();
        report.unreachable("connection refused.");
        let err = report.finish().unwrap_err();
        assert_eq!(err.messages[0], "Failed to reach the server: connection refused.");
    }

    #[test]
    fn empty_report_is_still_an_error() {
        let err = UrlCheckReport::new().finish().unwrap_err();
        assert!(!err.messages.is_empty());
    }

    #[test]
    fn display_starts_with_headline() {
        let err = UrlCheckError {
            messages: vec!["The server returned 500 error.".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "The URL cannot be used due to: The server returned 500 error."
        );
    }
}
