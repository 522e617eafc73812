//! Measurement Input Validation
//!
//! Strict-mode extraction of `weight`/`height`: one explicit path, typed
//! errors instead of degenerate arithmetic.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::InvocationEvent;
use crate::services::numeric::{parse_numeric_str, to_number};

/// Validation error types
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("Field '{field}' is not a finite number: {value}")]
    NotNumeric { field: String, value: String },

    #[error("Field '{field}' must be a positive number")]
    NotPositive { field: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } => field.as_str(),
            Self::NotNumeric { field, .. } => field.as_str(),
            Self::NotPositive { field } => field.as_str(),
        }
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Validated measurement inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementInput {
    pub weight: f64,
    pub height: f64,
}

/// Extract and validate both fields from an invocation event
pub fn validate_measurement(event: &InvocationEvent) -> ValidationResult<MeasurementInput> {
    let weight = required_positive(event, "weight")?;
    let height = required_positive(event, "height")?;
    Ok(MeasurementInput { weight, height })
}

/// A top-level field wins over the query-string parameter of the same name
fn required_positive(event: &InvocationEvent, field: &str) -> ValidationResult<f64> {
    let top_level = event.field(field).filter(|value| !is_blank(value));
    let (number, raw) = match top_level {
        Some(value) => (to_number(value), raw_text(value)),
        None => match event.query_param(field).filter(|text| !text.trim().is_empty()) {
            Some(text) => (parse_numeric_str(text), text.to_string()),
            None => {
                return Err(ValidationError::MissingField {
                    field: field.to_string(),
                });
            }
        },
    };

    if !number.is_finite() {
        return Err(ValidationError::NotNumeric {
            field: field.to_string(),
            value: raw,
        });
    }

    if number <= 0.0 {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
        });
    }

    Ok(number)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
