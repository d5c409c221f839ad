//! Field validators shared by the address request DTOs.
//!
//! Each function checks one field and is attached per DTO with
//! `#[validate(custom(function = "..."))]`.

use std::borrow::Cow;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Text must contain something other than whitespace
fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", message));
    }
    Ok(())
}

pub fn validate_street(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Street cannot be empty")
}

pub fn validate_city(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "city cannot be empty")
}

pub fn validate_state(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "state cannot be empty")
}

pub fn validate_country(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "country cannot be empty")
}

pub fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        return Err(error(
            "latitude_range",
            "Latitude value must be in between -90 and 90",
        ));
    }
    Ok(())
}

pub fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        return Err(error(
            "longitude_range",
            "Longitude value must be in between -180 and 180",
        ));
    }
    Ok(())
}

/// Search radius in kilometers
pub fn validate_radius(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(error(
            "radius_range",
            "Radius must be a non-negative number of kilometers",
        ));
    }
    Ok(())
}
