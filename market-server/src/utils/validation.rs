//! Input validation helpers
//!
//! Centralized limits and validation functions for text fields, coordinates
//! and quantities. Coordinate checks gate every write path so the legacy
//! `(0,0)` "no location" sentinel and out-of-range values never reach
//! storage.

use shared::GeoPoint;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, seller, shop, category
pub const MAX_NAME_LEN: usize = 200;

/// Review comments, product descriptions
pub const MAX_TEXT_LEN: usize = 2000;

/// Short identifiers: city, pincode, external user ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
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
        return Err(AppError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate shop coordinates: in range, and not the `(0,0)` sentinel.
pub fn validate_coordinates(point: &GeoPoint) -> Result<(), AppError> {
    if point.is_unset() {
        return Err(AppError::Validation(
            "(0,0) is not a valid shop location; enter the actual coordinates".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
        return Err(AppError::Validation(
            "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
        ));
    }
    Ok(())
}

/// Validate a search or trip origin: range check only.
///
/// Unlike shop locations, `(0,0)` is a legitimate place for a buyer to
/// stand, so the sentinel rule does not apply here.
pub fn validate_origin(point: &GeoPoint) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
        return Err(AppError::Validation(
            "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
        ));
    }
    Ok(())
}

/// Validate a review rating: integer in [1, 5].
pub fn validate_rating(rating: i64) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 1 and 5, got {rating}"
        )));
    }
    Ok(())
}

/// Validate a purchase quantity.
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::Validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    Ok(())
}

/// Validate a price: finite and non-negative.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(format!(
            "price must be non-negative, got {price}"
        )));
    }
    Ok(())
}
