//! Probe a candidate web resource URL and classify its data format.
//!
//! One GET is sent, without retries; redirects follow the client's default
//! policy. What the probe observes is fed into a [`UrlCheckReport`], which
//! yields either a single [`DataFormat`] or one aggregated [`UrlCheckError`].

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use webresources_core::data_format::DataFormat;
use webresources_core::url_check::{UrlCheckError, UrlCheckReport};

/// Build the HTTP client used for URL checks.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialised, which only happens at
/// startup.
pub fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("webresources/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build reqwest HTTP client")
}

/// Fetch `url` once and classify the response by its `Content-Type`.
pub async fn check_url(client: &reqwest::Client, url: &str) -> Result<DataFormat, UrlCheckError> {
    let mut report = UrlCheckReport::new();

    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok());
                report.content_type(content_type);
            } else {
                report.server_returned(status.as_u16());
                report.unreachable(status.canonical_reason().unwrap_or("Unknown error"));
            }
        }
        Err(err) => {
            if let Some(status) = err.status() {
                report.server_returned(status.as_u16());
            }
            report.unreachable(&transport_reason(&err));
        }
    }

    let result = report.finish();
    if let Err(err) = &result {
        tracing::warn!(url, messages = ?err.messages, "URL check failed");
    }
    result
}

fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "The connection timed out".to_string()
    } else if err.is_connect() {
        "Connection refused or host not found".to_string()
    } else if err.is_redirect() {
        "Too many redirects".to_string()
    } else {
        err.to_string()
    }
}
