//! MILP formulation of meeting scheduling.
//!
//! Turns parameters and availability into a 0/1 linear model, hands it to
//! a [`SolverGateway`], and decodes the result into a [`Schedule`].
//!
//! ```text
//! CapacityPlanner → ModelBuilder → ObjectiveStrategy → SolverGateway → ScheduleDecoder
//! ```
//!
//! # Submodules
//!
//! - `capacity`: concurrent meetings per timeslot, `c = ceil(n / gMin)`
//! - `model`: backend-neutral variables, rows, and objective
//! - `builder`: availability, single-meeting-per-day, and capacity-band rows
//! - `objective`: total-attendance and new-acquaintance objectives
//! - `gateway`: solver contract and the `good_lp`/`microlp` implementation
//! - `decode`: assignment values → schedule grid
//!
//! [`Schedule`]: crate::models::Schedule
//!
//! # Reference
//! - Wolsey (2020), "Integer Programming"
//! - Williams (2013), "Model Building in Mathematical Programming", Ch. 9

mod builder;
mod capacity;
mod decode;
mod gateway;
mod model;
mod objective;

pub use builder::ModelBuilder;
pub use capacity::CapacityPlanner;
pub use decode::ScheduleDecoder;
pub use gateway::{MilpGateway, SolveOutcome, SolveStatus, SolverConfig, SolverGateway};
pub use model::{
    ConstraintKind, LinearConstraint, MeetingModel, ModelDims, ModelVar, Sense, VarId, VarRole,
};
pub use objective::{
    NewAcquaintances, ObjectiveStrategy, TotalAttendance, AUXILIARY_WARNING_THRESHOLD,
};
