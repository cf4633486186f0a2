//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on reasonable UX limits for names, notes and
//! descriptions; the embedded store has no built-in length enforcement.

use crate::db::models::Address;
use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, employee, user, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special instructions
pub const MAX_NOTE_LEN: usize = 500;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate every text field of a postal address.
pub fn validate_address(address: &Address) -> Result<(), AppError> {
    for (field, value) in [
        ("street", &address.street),
        ("city", &address.city),
        ("state", &address.state),
        ("pin_code", &address.pin_code),
        ("country", &address.country),
    ] {
        validate_optional_text(value, field, MAX_ADDRESS_LEN)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Margherita", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_oversized_optional_text() {
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "note", MAX_NOTE_LEN).is_err());
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
    }

    #[test]
    fn checks_every_address_field() {
        let mut address = Address {
            street: Some("1 Curry Lane".into()),
            city: Some("Porto".into()),
            ..Address::default()
        };
        assert!(validate_address(&address).is_ok());

        address.city = Some("x".repeat(MAX_ADDRESS_LEN + 1));
        assert!(validate_address(&address).is_err());
    }
}
