//! Meeting scheduler pipeline and KPI evaluation.
//!
//! `MeetingScheduler` validates input, builds the MILP model, solves it
//! through a `SolverGateway`, and decodes the schedule. `ScheduleKpi`
//! summarizes a schedule: attendance, meetings held, pairs met.

mod kpi;
mod meeting;

pub use kpi::ScheduleKpi;
pub use meeting::{MeetingScheduler, ScheduleResult};
