//! Field-level checks shared by the insert payloads that arrive from clients.

use crate::errors::AppError;

/// Fails when a required text field is blank.
pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Fails when `value` does not look like `local@domain.tld`.
pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
    require_text(field, value)?;
    if !is_plausible_email(value.trim()) {
        return Err(AppError::Validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(())
}

/// Blank optional strings are stored as NULL.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
