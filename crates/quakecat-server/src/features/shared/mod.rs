//! Shared utilities and types for feature modules

pub mod validation;

pub use validation::{
    validate_date, validate_id, validate_location, validate_magnitude, FieldError,
};
