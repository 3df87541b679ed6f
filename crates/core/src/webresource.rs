//! Field rules for web resource forms.
//!
//! [`clean_form`] strips HTML from free text, validates every submitted field
//! and collects all problems into one [`FieldErrors`] map, the way a form is
//! re-rendered with errors next to each field.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::data_format::DataFormat;
use crate::error::FieldErrors;
use crate::sanitize::clean_text;

/// Colour given to new web resources when none is submitted.
pub const DEFAULT_COLOUR: &str = "#0033ff";

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_URL_LENGTH: usize = 250;
pub const MAX_SYMBOL_PATH_LENGTH: usize = 500;

static COLOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex")
});

/// Raw web resource form as submitted by an administrator.
///
/// Every field is optional at this stage; [`FormMode`] decides which ones
/// are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebResourceForm {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `None` or empty asks the server to detect the format from the URL.
    pub data_format: Option<String>,
    pub url: Option<String>,
    pub colour: Option<String>,
    /// Storage path of an already uploaded symbol image.
    pub symbol: Option<String>,
    #[serde(default)]
    pub clear_symbol: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// `name` and `url` are required.
    Create,
    /// Only submitted fields are validated.
    Update,
}

/// Validated, sanitized form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedForm {
    pub name: Option<String>,
    /// On update, `Some("")` clears the description.
    pub description: Option<String>,
    pub data_format: Option<DataFormat>,
    pub url: Option<String>,
    pub colour: Option<String>,
    pub symbol: Option<String>,
    pub clear_symbol: bool,
}

/// Validate and sanitize a submitted form.
pub fn clean_form(form: &WebResourceForm, mode: FormMode) -> Result<CleanedForm, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut cleaned = CleanedForm {
        clear_symbol: form.clear_symbol,
        ..CleanedForm::default()
    };

    match form.name.as_deref() {
        Some(raw) => match clean_name(raw) {
            Ok(name) => cleaned.name = Some(name),
            Err(msg) => push(&mut errors, "name", msg),
        },
        None if mode == FormMode::Create => push(&mut errors, "name", REQUIRED),
        None => {}
    }

    if let Some(raw) = form.description.as_deref() {
        let text = clean_text(raw);
        cleaned.description = match mode {
            FormMode::Create if text.is_empty() => None,
            _ => Some(text),
        };
    }

    if let Some(raw) = form.data_format.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match raw.parse::<DataFormat>() {
            Ok(format) => cleaned.data_format = Some(format),
            Err(_) => push(
                &mut errors,
                "data_format",
                format!("Select a valid choice. {raw} is not one of the available choices."),
            ),
        }
    }

    match form.url.as_deref() {
        Some(raw) => match validate_url(raw) {
            Ok(url) => cleaned.url = Some(url),
            Err(msg) => push(&mut errors, "url", msg),
        },
        None if mode == FormMode::Create => push(&mut errors, "url", REQUIRED),
        None => {}
    }

    if let Some(raw) = form.colour.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match validate_colour(raw) {
            Ok(colour) => cleaned.colour = Some(colour),
            Err(msg) => push(&mut errors, "colour", msg),
        }
    }

    if let Some(raw) = form.symbol.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if form.clear_symbol {
            push(
                &mut errors,
                "symbol",
                "Please either submit a symbol or check the clear checkbox, not both.",
            );
        } else if raw.chars().count() > MAX_SYMBOL_PATH_LENGTH {
            push(
                &mut errors,
                "symbol",
                format!("Ensure this value has at most {MAX_SYMBOL_PATH_LENGTH} characters."),
            );
        } else {
            cleaned.symbol = Some(raw.to_string());
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(errors)
    }
}

const REQUIRED: &str = "This field is required.";

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Strip HTML from a name and check it is non-empty and short enough.
pub fn clean_name(raw: &str) -> Result<String, String> {
    let name = clean_text(raw);
    if name.is_empty() {
        return Err(REQUIRED.to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this value has at most {MAX_NAME_LENGTH} characters."
        ));
    }
    Ok(name)
}

/// Check that `raw` is an absolute `http`/`https` URL with a host.
pub fn validate_url(raw: &str) -> Result<String, String> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return Err(REQUIRED.to_string());
    }
    if candidate.chars().count() > MAX_URL_LENGTH {
        return Err(format!(
            "Ensure this value has at most {MAX_URL_LENGTH} characters."
        ));
    }
    let parsed = url::Url::parse(candidate).map_err(|_| "Enter a valid URL.".to_string())?;
    let scheme_ok = matches!(parsed.scheme(), "http" | "https");
    if !scheme_ok || parsed.host_str().map_or(true, str::is_empty) {
        return Err("Enter a valid URL.".to_string());
    }
    Ok(candidate.to_string())
}

/// Check that `raw` is a `#rgb` or `#rrggbb` hex colour.
pub fn validate_colour(raw: &str) -> Result<String, String> {
    if COLOUR_RE.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(format!(
            "Invalid colour '{raw}'. Must be in #RGB or #RRGGBB hex format."
        ))
    }
}
