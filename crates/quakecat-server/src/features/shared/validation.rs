//! Shared validation utilities
//!
//! Field checks applied to item commands before they reach the catalogue.
//!
//! # Examples
//!
//! ```rust,ignore
//! use quakecat_server::features::shared::validation::{validate_location, validate_date};
//!
//! validate_location("34.5, -118.2")?;
//! validate_date("2020-01-01")?;
//! ```

use quakecat_common::timestamp;
use thiserror::Error;

/// Errors that can occur during field validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Location is required and cannot be empty")]
    LocationRequired,

    #[error("Magnitude must be a finite number")]
    MagnitudeNotFinite,

    #[error("Date is required and cannot be empty")]
    DateRequired,

    #[error("Date '{0}' is not a recognized timestamp")]
    DateInvalid(String),

    #[error("Id is required and cannot be empty")]
    IdRequired,
}

/// Location must contain something other than whitespace
pub fn validate_location(location: &str) -> Result<(), FieldError> {
    if location.trim().is_empty() {
        return Err(FieldError::LocationRequired);
    }
    Ok(())
}

pub fn validate_magnitude(magnitude: f64) -> Result<(), FieldError> {
    if !magnitude.is_finite() {
        return Err(FieldError::MagnitudeNotFinite);
    }
    Ok(())
}

/// Validate a date string
///
/// # Rules
/// - Must not be empty after trimming
/// - Must parse with the same rules used for ingested rows
pub fn validate_date(date: &str) -> Result<(), FieldError> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Err(FieldError::DateRequired);
    }
    if timestamp::parse(trimmed).is_none() {
        return Err(FieldError::DateInvalid(date.to_string()));
    }
    Ok(())
}

pub fn validate_id(id: &str) -> Result<(), FieldError> {
    if id.trim().is_empty() {
        return Err(FieldError::IdRequired);
    }
    Ok(())
}
