//! Input validation helpers
//!
//! Centralized text length constants and validation functions used at the
//! catalog store boundary. SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;
use shared::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: category, menu item, restaurant
pub const MAX_NAME_LEN: usize = 200;

/// Menu item descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: currency codes, tags, allergens, keywords
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Upper bound for a single price
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate every entry of a string list against the length limit.
pub fn validate_text_list(values: &[String], field: &str, max_len: usize) -> Result<(), AppError> {
    values
        .iter()
        .try_for_each(|v| validate_len(v, field, max_len))
}

/// Validate that a price is a finite, non-negative number.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("price must be a non-negative number, got {price}"),
        )
        .with_detail("field", "price"));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price {price} exceeds maximum {MAX_PRICE}"),
        )
        .with_detail("field", "price"));
    }
    Ok(())
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}
