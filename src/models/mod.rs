//! Scheduling domain models.
//!
//! Inputs (availability, parameters) and outputs (the solved grid and its
//! tabular rows) of the meeting scheduler.
//!
//! # Dimensions
//!
//! | Symbol | Meaning | Field |
//! |--------|---------|-------|
//! | n | people | `SchedulingParameters::people` |
//! | d | days | `SchedulingParameters::days` |
//! | m | timeslots per day | `SchedulingParameters::timeslots` |
//! | c | concurrent meetings per timeslot | `SchedulingParameters::concurrent_meetings()` |

mod availability;
mod params;
mod report;
mod schedule;

pub use availability::AvailabilityMatrix;
pub use params::{Objective, SchedulingParameters};
pub use report::{MeetingRow, ScheduleLabels};
pub use schedule::{MeetingSlot, Schedule, Violation, ViolationType};
