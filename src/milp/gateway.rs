//! Solver gateway: hands a built model to an external MILP solver.
//!
//! The crate never searches on its own. A [`SolverGateway`] receives the
//! model and per-invocation [`SolverConfig`], and reports a
//! [`SolveOutcome`]: a status, the 0/1 value of every model variable when a
//! solution exists, and the wall time spent.
//!
//! [`MilpGateway`] uses `good_lp` with the pure-Rust `microlp` backend.

use std::time::Instant;

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, SolverModel, Variable, WithTimeLimit,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::model::{MeetingModel, Sense};

/// Per-invocation solver settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solver time budget in milliseconds. `None` waits for a proven optimum.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl SolverConfig {
    /// No budget.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }
}

/// Solver verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal assignment.
    Optimal,
    /// Constraint-satisfying assignment, optimality not proven (budget hit).
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// Neither feasibility nor infeasibility determined.
    Unknown,
}

impl SolveStatus {
    /// Whether this status comes with an assignment.
    pub fn has_solution(&self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

/// Result of one solve call.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Verdict.
    pub status: SolveStatus,
    /// Value of every model variable, indexed by [`VarId::index`](super::VarId::index).
    /// Present iff the status has a solution.
    pub values: Option<Vec<bool>>,
    /// Wall time spent in the solver (ms).
    pub elapsed_ms: u64,
}

impl SolveOutcome {
    /// An outcome without an assignment.
    pub fn without_solution(status: SolveStatus, elapsed_ms: u64) -> Self {
        Self {
            status,
            values: None,
            elapsed_ms,
        }
    }
}

/// An external solver.
///
/// Implementations must return an assignment satisfying every model
/// constraint whenever the status is `Optimal` or `Feasible`, and must
/// never error on budget exhaustion: they report the best assignment
/// found (`Feasible`) or `Unknown`.
pub trait SolverGateway: Send + Sync {
    /// Backend name (e.g. "microlp").
    fn name(&self) -> &'static str;

    /// Maximizes the model objective subject to its constraints.
    fn solve(&self, model: &MeetingModel, config: &SolverConfig) -> SolveOutcome;
}

/// `good_lp` gateway with the `microlp` branch-and-bound backend.
///
/// The time limit is passed to `microlp`. When it expires with an
/// incumbent, that incumbent is returned as `Feasible`; when it expires
/// before any feasible assignment is found, the outcome is `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpGateway;

impl MilpGateway {
    /// Creates the gateway.
    pub fn new() -> Self {
        Self
    }
}

impl SolverGateway for MilpGateway {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &MeetingModel, config: &SolverConfig) -> SolveOutcome {
        let start = Instant::now();
        debug!(model = %model, time_limit_ms = ?config.time_limit_ms, "submitting model to microlp");

        let result = solve_model(model, config.time_limit_ms);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok((status, values)) => SolveOutcome {
                status,
                values: Some(values),
                elapsed_ms,
            },
            Err(ResolutionError::Infeasible) => {
                SolveOutcome::without_solution(SolveStatus::Infeasible, elapsed_ms)
            }
            Err(ResolutionError::Other(reason)) if config.time_limit_ms.is_some() => {
                warn!(reason, limit_ms = ?config.time_limit_ms, "solver budget exhausted without a feasible assignment");
                SolveOutcome::without_solution(SolveStatus::Unknown, elapsed_ms)
            }
            Err(e) => {
                warn!(error = %e, "solver failed");
                SolveOutcome::without_solution(SolveStatus::Unknown, elapsed_ms)
            }
        };
        info!(status = ?outcome.status, elapsed_ms, "solve finished");
        outcome
    }
}

/// Translates the model into `good_lp` and solves it, within the budget
/// when one is given.
fn solve_model(
    model: &MeetingModel,
    time_limit_ms: Option<u64>,
) -> Result<(SolveStatus, Vec<bool>), ResolutionError> {
    let mut vars = ProblemVariables::new();
    let lp_vars: Vec<Variable> = model
        .variables()
        .iter()
        .map(|v| vars.add(variable().binary().name(v.name.clone())))
        .collect();

    let mut objective = Expression::with_capacity(model.objective().len());
    for &(id, coef) in model.objective() {
        objective.add_mul(coef, lp_vars[id.index()]);
    }

    let mut problem = vars.maximise(objective).using(default_solver);
    if let Some(ms) = time_limit_ms {
        problem = problem.with_time_limit(ms as f64 / 1000.0);
    }
    for row in model.constraints() {
        let mut lhs = Expression::with_capacity(row.terms.len());
        for &(id, coef) in &row.terms {
            lhs.add_mul(coef, lp_vars[id.index()]);
        }
        let constraint = match row.sense {
            Sense::LessEq => lhs.leq(row.rhs),
            Sense::GreaterEq => lhs.geq(row.rhs),
            Sense::Equal => lhs.eq(row.rhs),
        };
        problem = problem.with(constraint);
    }

    let solution = problem.solve()?;
    let status = match solution.status() {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        SolutionStatus::TimeLimit | SolutionStatus::GapLimit => SolveStatus::Feasible,
    };
    let values = lp_vars.iter().map(|&v| solution.value(v) > 0.5).collect();
    Ok((status, values))
}
