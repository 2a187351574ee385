//! End-to-end meeting scheduler.
//!
//! # Pipeline
//!
//! 1. Validate parameters and availability.
//! 2. Build the shared model and attach the selected objective.
//! 3. Solve through the configured [`SolverGateway`].
//! 4. Decode the assignment into a [`Schedule`].
//!
//! Infeasible and unknown outcomes are returned as errors without retry
//! or constraint relaxation.

use tracing::{debug, info};

use crate::error::ScheduleError;
use crate::milp::{
    MeetingModel, MilpGateway, ModelBuilder, ScheduleDecoder, SolveStatus, SolverConfig,
    SolverGateway,
};
use crate::models::{AvailabilityMatrix, Objective, Schedule, SchedulingParameters};
use crate::validation::validate_input;

/// A decoded schedule with its solve metadata.
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    /// The decoded grid.
    pub schedule: Schedule,
    /// `Optimal` or `Feasible`.
    pub status: SolveStatus,
    /// Objective that was maximized.
    pub objective: Objective,
    /// Objective value of the returned assignment.
    pub objective_value: u64,
    /// Solver wall time (ms).
    pub elapsed_ms: u64,
}

impl ScheduleResult {
    /// Whether the solver proved this schedule optimal.
    ///
    /// `false` means a budget-limited, possibly suboptimal schedule.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

/// Builds, solves, and decodes meeting-scheduling models.
///
/// # Example
///
/// ```no_run
/// use u_meetup::models::{AvailabilityMatrix, Objective, SchedulingParameters};
/// use u_meetup::scheduler::MeetingScheduler;
///
/// let params = SchedulingParameters::new(4, 1, 1)
///     .with_group_band(2, 2)
///     .with_objective(Objective::NewAcquaintances);
/// let availability = AvailabilityMatrix::all_available(4, 1, 1);
///
/// let result = MeetingScheduler::new().schedule(&params, &availability).unwrap();
/// assert_eq!(result.objective_value, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MeetingScheduler<G = MilpGateway> {
    gateway: G,
    config: SolverConfig,
    slot_ordering: bool,
}

impl MeetingScheduler<MilpGateway> {
    /// Scheduler backed by [`MilpGateway`] with no time budget.
    pub fn new() -> Self {
        Self::with_gateway(MilpGateway::new())
    }
}

impl Default for MeetingScheduler<MilpGateway> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SolverGateway> MeetingScheduler<G> {
    /// Scheduler backed by a custom gateway.
    pub fn with_gateway(gateway: G) -> Self {
        Self {
            gateway,
            config: SolverConfig::default(),
            slot_ordering: false,
        }
    }

    /// Sets the per-invocation solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables symmetry breaking over concurrent-meeting indices.
    pub fn with_slot_ordering(mut self, enabled: bool) -> Self {
        self.slot_ordering = enabled;
        self
    }

    /// Validates the input and builds the model without solving.
    pub fn build_model(
        &self,
        params: &SchedulingParameters,
        availability: &AvailabilityMatrix,
    ) -> Result<MeetingModel, ScheduleError> {
        validate_input(params, availability).map_err(ScheduleError::Configuration)?;
        Ok(ModelBuilder::new(params, availability)
            .with_slot_ordering(self.slot_ordering)
            .build())
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    /// - [`ScheduleError::Configuration`] for invalid parameters or shape
    /// - [`ScheduleError::Infeasible`] when no schedule satisfies the constraints
    /// - [`ScheduleError::Unknown`] when the solver could not decide
    pub fn schedule(
        &self,
        params: &SchedulingParameters,
        availability: &AvailabilityMatrix,
    ) -> Result<ScheduleResult, ScheduleError> {
        let model = self.build_model(params, availability)?;
        info!(
            objective = %params.objective,
            gateway = self.gateway.name(),
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            "solving meeting schedule"
        );

        let outcome = self.gateway.solve(&model, &self.config);
        let values = match (outcome.status, outcome.values) {
            (SolveStatus::Infeasible, _) => return Err(ScheduleError::Infeasible),
            (SolveStatus::Optimal | SolveStatus::Feasible, Some(values)) => values,
            _ => {
                return Err(ScheduleError::Unknown {
                    elapsed_ms: outcome.elapsed_ms,
                })
            }
        };

        let objective_value = model.evaluate_objective(&values).round() as u64;
        let schedule = ScheduleDecoder::decode(&model, Some(&values)).ok_or(
            ScheduleError::Unknown {
                elapsed_ms: outcome.elapsed_ms,
            },
        )?;

        for meeting in schedule.meetings() {
            debug!(
                day = meeting.day,
                timeslot = meeting.timeslot,
                meeting = meeting.meeting,
                attendees = ?meeting.attendees,
                "meeting"
            );
        }
        if params.objective == Objective::NewAcquaintances {
            debug!(pairs = ?schedule.acquainted_pairs(), "pairs met");
        }
        info!(
            status = ?outcome.status,
            objective_value,
            elapsed_ms = outcome.elapsed_ms,
            "schedule ready"
        );

        Ok(ScheduleResult {
            schedule,
            status: outcome.status,
            objective: params.objective,
            objective_value,
            elapsed_ms: outcome.elapsed_ms,
        })
    }
}
