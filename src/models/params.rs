//! Scheduling parameters and objective selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::milp::CapacityPlanner;

/// Which quantity the solver maximizes.
///
/// Deserializes from the selector string used by input files:
/// `"new"` (case-insensitive, surrounding whitespace ignored) selects
/// [`Objective::NewAcquaintances`]; anything else selects
/// [`Objective::TotalAttendance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Objective {
    /// Maximize the sum of all assignments.
    #[default]
    TotalAttendance,
    /// Maximize the number of distinct pairs sharing at least one meeting.
    NewAcquaintances,
}

impl Objective {
    /// Parses an objective selector. Never fails.
    pub fn from_selector(selector: &str) -> Self {
        if selector.trim().eq_ignore_ascii_case("new") {
            Self::NewAcquaintances
        } else {
            Self::TotalAttendance
        }
    }

    /// Canonical selector string.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::TotalAttendance => "total",
            Self::NewAcquaintances => "new",
        }
    }
}

impl From<&str> for Objective {
    fn from(selector: &str) -> Self {
        Self::from_selector(selector)
    }
}

impl From<String> for Objective {
    fn from(selector: String) -> Self {
        Self::from_selector(&selector)
    }
}

impl From<Objective> for String {
    fn from(objective: Objective) -> Self {
        objective.selector().to_string()
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Problem dimensions, group-size band, and objective.
///
/// Invariants (checked by [`validate_input`](crate::validation::validate_input)):
/// `people`, `days`, `timeslots` > 0 and `1 <= min_group <= max_group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingParameters {
    /// Number of people (n).
    pub people: usize,
    /// Number of days in the horizon (d).
    pub days: usize,
    /// Timeslots per day (m).
    pub timeslots: usize,
    /// Smallest allowed non-empty meeting (gMin).
    pub min_group: usize,
    /// Largest allowed meeting (gMax).
    pub max_group: usize,
    /// Quantity to maximize.
    #[serde(default)]
    pub objective: Objective,
}

impl SchedulingParameters {
    /// Creates parameters with the widest band `[1, people]` and the
    /// total-attendance objective.
    pub fn new(people: usize, days: usize, timeslots: usize) -> Self {
        Self {
            people,
            days,
            timeslots,
            min_group: 1,
            max_group: people.max(1),
            objective: Objective::TotalAttendance,
        }
    }

    /// Sets the inclusive group-size band.
    pub fn with_group_band(mut self, min_group: usize, max_group: usize) -> Self {
        self.min_group = min_group;
        self.max_group = max_group;
        self
    }

    /// Sets the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Concurrent meetings per timeslot (c), derived from `people` and `min_group`.
    pub fn concurrent_meetings(&self) -> usize {
        CapacityPlanner::concurrent_meetings(self.people, self.min_group)
    }

    /// Number of meeting instances across the horizon (d·m·c).
    pub fn meeting_instances(&self) -> usize {
        self.days * self.timeslots * self.concurrent_meetings()
    }

    /// Number of unordered person pairs, C(n, 2).
    pub fn possible_pairs(&self) -> usize {
        self.people * self.people.saturating_sub(1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_selector() {
        assert_eq!(Objective::from_selector("new"), Objective::NewAcquaintances);
        assert_eq!(Objective::from_selector(" NEW\n"), Objective::NewAcquaintances);
        assert_eq!(Objective::from_selector("New"), Objective::NewAcquaintances);
        assert_eq!(Objective::from_selector("total"), Objective::TotalAttendance);
        assert_eq!(Objective::from_selector(""), Objective::TotalAttendance);
        assert_eq!(Objective::from_selector("newest"), Objective::TotalAttendance);
    }

    #[test]
    fn test_params_builder() {
        let p = SchedulingParameters::new(7, 20, 2)
            .with_group_band(2, 5)
            .with_objective(Objective::NewAcquaintances);
        assert_eq!(p.min_group, 2);
        assert_eq!(p.max_group, 5);
        assert_eq!(p.concurrent_meetings(), 4);
        assert_eq!(p.meeting_instances(), 20 * 2 * 4);
        assert_eq!(p.possible_pairs(), 21);
    }

    #[test]
    fn test_params_default_band() {
        let p = SchedulingParameters::new(4, 1, 1);
        assert_eq!((p.min_group, p.max_group), (1, 4));
        assert_eq!(p.objective, Objective::TotalAttendance);
        assert_eq!(p.concurrent_meetings(), 4);
    }

    #[test]
    fn test_params_from_json() {
        let json = r#"{
            "people": 4, "days": 1, "timeslots": 1,
            "min_group": 2, "max_group": 2, "objective": "New"
        }"#;
        let p: SchedulingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.objective, Objective::NewAcquaintances);
        assert_eq!(p.concurrent_meetings(), 2);

        let json = r#"{"people": 3, "days": 2, "timeslots": 2, "min_group": 1, "max_group": 3}"#;
        let p: SchedulingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.objective, Objective::TotalAttendance);
    }

    #[test]
    fn test_objective_serializes_as_selector() {
        let s = serde_json::to_string(&Objective::NewAcquaintances).unwrap();
        assert_eq!(s, "\"new\"");
    }
}
