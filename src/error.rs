//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failures of the model-building/solving pipeline.
///
/// None of these are recovered internally. A budget-limited solve that
/// still found a feasible schedule is not an error; see
/// [`ScheduleResult::is_optimal`](crate::scheduler::ScheduleResult::is_optimal).
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Parameters or availability shape rejected before model construction.
    #[error("invalid configuration: {}", join_messages(.0))]
    Configuration(Vec<ValidationError>),

    /// The solver proved that no assignment satisfies every constraint.
    #[error("model is infeasible: no assignment satisfies all constraints")]
    Infeasible,

    /// The solver determined neither feasibility nor infeasibility.
    ///
    /// A missing schedule here does not mean no schedule exists.
    #[error("solver result unknown after {elapsed_ms} ms")]
    Unknown { elapsed_ms: u64 },

    /// A schedule grid is ragged or its attendee rows do not match the
    /// number of people.
    #[error("schedule grid {what}: expected {expected}, got {actual}")]
    GridShape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Output labels do not match the schedule dimensions.
    #[error("{what} labels: expected {expected}, got {actual}")]
    LabelMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
