//! Request-body validation helpers shared by every content DTO.
//!
//! DTOs derive [`validator::Validate`]; the custom functions here plug into
//! `#[validate(custom(function = ...))]`, and [`into_core_error`] flattens a
//! failed validation into a single [`CoreError::Validation`] message.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::content::{resolve_section, resolve_status};
use crate::error::CoreError;

/// Reject empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

/// Reject status values other than `draft` / `published`. Blank means the
/// default.
pub fn publication_status(value: &str) -> Result<(), ValidationError> {
    resolve_status(Some(value))
        .map(|_| ())
        .map_err(|_| error("status", "must be one of: draft, published"))
}

/// Reject unknown organisation sections. Blank means the default.
pub fn org_section(value: &str) -> Result<(), ValidationError> {
    resolve_section(Some(value))
        .map(|_| ())
        .map_err(|_| {
            error(
                "section",
                "must be one of: pengurus, pengawas, pengurus_harian, seksi",
            )
        })
}

/// Run the derived validation and convert any failure into a [`CoreError`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(into_core_error)
}

/// Flatten field errors into `"field: message; field: message"`, sorted by field.
pub fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    parts.sort();
    CoreError::Validation(parts.join("; "))
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
