//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total attendance | Σ assignments |
//! | Meetings held | Non-empty meeting instances |
//! | People scheduled | People attending at least one meeting |
//! | Pairs met | Distinct pairs sharing at least one meeting |
//! | Pair coverage | Pairs met / C(n, 2) |
//! | Avg group size | Total attendance / meetings held |
//! | Seat utilization | Avg group size / gMax |

use crate::models::{Schedule, SchedulingParameters};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Sum of all assignments.
    pub total_attendance: usize,
    /// Number of non-empty meeting instances.
    pub meetings_held: usize,
    /// People attending at least one meeting.
    pub people_scheduled: usize,
    /// Distinct pairs sharing at least one meeting.
    pub pairs_met: usize,
    /// C(n, 2).
    pub possible_pairs: usize,
    /// Fraction of possible pairs that met (0.0..1.0).
    pub pair_coverage: f64,
    /// Mean attendees per held meeting.
    pub avg_group_size: f64,
    /// Mean fill of held meetings relative to `max_group` (0.0..1.0).
    pub seat_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its parameters.
    pub fn calculate(schedule: &Schedule, params: &SchedulingParameters) -> Self {
        let meetings = schedule.meetings();
        let total_attendance = schedule.total_attendance();
        let meetings_held = meetings.len();

        let mut scheduled = vec![false; schedule.people()];
        for meeting in &meetings {
            for &p in &meeting.attendees {
                scheduled[p] = true;
            }
        }
        let people_scheduled = scheduled.into_iter().filter(|&s| s).count();

        let pairs_met = schedule.acquainted_pairs().len();
        let possible_pairs = params.possible_pairs();
        let pair_coverage = if possible_pairs == 0 {
            0.0
        } else {
            pairs_met as f64 / possible_pairs as f64
        };

        let avg_group_size = if meetings_held == 0 {
            0.0
        } else {
            total_attendance as f64 / meetings_held as f64
        };
        let seat_utilization = if params.max_group == 0 {
            0.0
        } else {
            avg_group_size / params.max_group as f64
        };

        Self {
            total_attendance,
            meetings_held,
            people_scheduled,
            pairs_met,
            possible_pairs,
            pair_coverage,
            avg_group_size,
            seat_utilization,
        }
    }

    /// Whether every person attends at least one meeting.
    pub fn everyone_scheduled(&self, params: &SchedulingParameters) -> bool {
        self.people_scheduled == params.people
    }
}
