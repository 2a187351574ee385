//! Input validation for meeting-scheduling problems.
//!
//! Checks parameters and availability before any model is built.
//! Detects:
//! - Zero people, days, or timeslots
//! - An empty or inverted group-size band
//! - Availability whose shape disagrees with the parameters

use crate::models::{AvailabilityMatrix, SchedulingParameters};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending parameter.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `people`, `days`, or `timeslots` is zero.
    ZeroDimension,
    /// `min_group` is zero or greater than `max_group`.
    InvalidGroupBand,
    /// Availability dimensions differ from the parameters, or cells are missing.
    ShapeMismatch,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates scheduling parameters on their own.
///
/// Checks:
/// 1. `people`, `days`, `timeslots` are positive
/// 2. `min_group >= 1`
/// 3. `min_group <= max_group`
pub fn validate_parameters(params: &SchedulingParameters) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, value) in [
        ("people", params.people),
        ("days", params.days),
        ("timeslots", params.timeslots),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDimension,
                format!("{name} must be positive"),
            ));
        }
    }

    if params.min_group == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGroupBand,
            "min_group must be at least 1",
        ));
    }
    if params.min_group > params.max_group {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGroupBand,
            format!(
                "min_group {} exceeds max_group {}",
                params.min_group, params.max_group
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates parameters together with the availability matrix.
///
/// In addition to [`validate_parameters`], the matrix must have exactly
/// `(people, days, timeslots)` shape and be fully populated.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    params: &SchedulingParameters,
    availability: &AvailabilityMatrix,
) -> ValidationResult {
    let mut errors = validate_parameters(params).err().unwrap_or_default();

    let expected = (params.people, params.days, params.timeslots);
    if availability.shape() != expected {
        errors.push(ValidationError::new(
            ValidationErrorKind::ShapeMismatch,
            format!(
                "availability shape {:?} does not match (people, days, timeslots) {:?}",
                availability.shape(),
                expected
            ),
        ));
    } else if availability.cell_count() != params.people * params.days * params.timeslots {
        errors.push(ValidationError::new(
            ValidationErrorKind::ShapeMismatch,
            format!(
                "availability has {} cells, expected {}",
                availability.cell_count(),
                params.people * params.days * params.timeslots
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
