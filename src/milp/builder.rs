//! Shared variables and constraints, independent of the objective.
//!
//! Creates:
//! - One assignment variable per (person, day, timeslot, meeting)
//! - One "meeting open" variable per (day, timeslot, meeting)
//! - Availability rows forcing assignments to 0 where a person is busy
//! - Single-meeting-per-day rows per (person, day)
//! - Capacity-band rows per meeting instance: attendance in {0} ∪ [gMin, gMax]
//! - Optional slot-ordering rows over the open variables
//!
//! # Reference
//! Wolsey (2020), "Integer Programming", Ch. 1.9 (semi-continuous sums via indicators)

use tracing::debug;

use super::model::{ConstraintKind, LinearConstraint, MeetingModel, ModelDims, Sense, VarId, VarRole};
use super::objective::ObjectiveStrategy;
use crate::models::{AvailabilityMatrix, SchedulingParameters};

/// Builds a [`MeetingModel`] from parameters and availability.
///
/// Inputs are assumed validated; see [`validate_input`](crate::validation::validate_input).
///
/// # Example
/// ```
/// use u_meetup::milp::ModelBuilder;
/// use u_meetup::models::{AvailabilityMatrix, SchedulingParameters};
///
/// let params = SchedulingParameters::new(4, 1, 1).with_group_band(2, 4);
/// let availability = AvailabilityMatrix::all_available(4, 1, 1);
/// let model = ModelBuilder::new(&params, &availability).build();
/// assert_eq!(model.dims().meetings, 2);
/// ```
pub struct ModelBuilder<'a> {
    params: &'a SchedulingParameters,
    availability: &'a AvailabilityMatrix,
    slot_ordering: bool,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a new builder.
    pub fn new(params: &'a SchedulingParameters, availability: &'a AvailabilityMatrix) -> Self {
        Self {
            params,
            availability,
            slot_ordering: false,
        }
    }

    /// Requires concurrent meetings to open in index order.
    ///
    /// Removes solutions that differ only by which concurrent index a
    /// meeting uses. The optimal objective value is unchanged.
    pub fn with_slot_ordering(mut self, enabled: bool) -> Self {
        self.slot_ordering = enabled;
        self
    }

    /// Builds the shared model and attaches the objective selected by the
    /// parameters.
    pub fn build(&self) -> MeetingModel {
        self.build_with(self.params.objective.strategy())
    }

    /// Builds the shared model and attaches the given objective.
    pub fn build_with(&self, strategy: &dyn ObjectiveStrategy) -> MeetingModel {
        let mut model = self.build_shared();
        strategy.attach(&mut model);
        debug!(model = %model, "built meeting model");
        model
    }

    /// Builds variables and constraints without an objective.
    pub fn build_shared(&self) -> MeetingModel {
        let dims = ModelDims::from_params(self.params);
        let mut model = MeetingModel::new(dims);

        self.add_assignment_variables(&mut model);
        self.add_availability(&mut model);
        self.add_single_meeting_per_day(&mut model);
        let open = self.add_capacity_band(&mut model);
        if self.slot_ordering {
            self.add_slot_ordering(&mut model, &open);
        }

        model
    }

    fn add_assignment_variables(&self, model: &mut MeetingModel) {
        let dims = model.dims();
        for person in 0..dims.people {
            for (day, timeslot, meeting) in dims.instances() {
                let id = model.add_variable(
                    format!("x_{person}_{day}_{timeslot}_{meeting}"),
                    VarRole::Assignment {
                        person,
                        day,
                        timeslot,
                        meeting,
                    },
                );
                debug_assert_eq!(id, model.assignment(person, day, timeslot, meeting));
            }
        }
    }

    /// Availability is per (day, timeslot), so every concurrent meeting of
    /// a busy slot is closed to the person.
    fn add_availability(&self, model: &mut MeetingModel) {
        let dims = model.dims();
        for person in 0..dims.people {
            for (day, timeslot, meeting) in dims.instances() {
                if !self.availability.is_available(person, day, timeslot) {
                    let x = model.assignment(person, day, timeslot, meeting);
                    model.add_constraint(LinearConstraint::new(
                        ConstraintKind::Availability,
                        vec![(x, 1.0)],
                        Sense::Equal,
                        0.0,
                    ));
                }
            }
        }
    }

    /// One meeting per person per day, across all timeslots of that day.
    fn add_single_meeting_per_day(&self, model: &mut MeetingModel) {
        let dims = model.dims();
        for person in 0..dims.people {
            for day in 0..dims.days {
                let mut terms = Vec::with_capacity(dims.timeslots * dims.meetings);
                for timeslot in 0..dims.timeslots {
                    for meeting in 0..dims.meetings {
                        terms.push((model.assignment(person, day, timeslot, meeting), 1.0));
                    }
                }
                model.add_constraint(LinearConstraint::new(
                    ConstraintKind::SingleMeetingPerDay,
                    terms,
                    Sense::LessEq,
                    1.0,
                ));
            }
        }
    }

    /// Attendance `s` of each instance lies in {0} ∪ [gMin, gMax]:
    /// `s - gMin·y >= 0` and `s - gMax·y <= 0` with `y` the open indicator.
    ///
    /// Returns the open variables in instance order.
    fn add_capacity_band(&self, model: &mut MeetingModel) -> Vec<VarId> {
        let dims = model.dims();
        let g_min = self.params.min_group as f64;
        let g_max = self.params.max_group as f64;
        let mut open_vars = Vec::with_capacity(dims.instance_count());

        for (day, timeslot, meeting) in dims.instances() {
            let open = model.add_variable(
                format!("open_{day}_{timeslot}_{meeting}"),
                VarRole::MeetingOpen {
                    day,
                    timeslot,
                    meeting,
                },
            );
            open_vars.push(open);

            let attendees: Vec<(VarId, f64)> = (0..dims.people)
                .map(|person| (model.assignment(person, day, timeslot, meeting), 1.0))
                .collect();

            let mut lower = attendees.clone();
            lower.push((open, -g_min));
            model.add_constraint(LinearConstraint::new(
                ConstraintKind::CapacityLower,
                lower,
                Sense::GreaterEq,
                0.0,
            ));

            let mut upper = attendees;
            upper.push((open, -g_max));
            model.add_constraint(LinearConstraint::new(
                ConstraintKind::CapacityUpper,
                upper,
                Sense::LessEq,
                0.0,
            ));
        }

        open_vars
    }

    /// `open[c] <= open[c - 1]` within each (day, timeslot).
    fn add_slot_ordering(&self, model: &mut MeetingModel, open: &[VarId]) {
        let meetings = model.dims().meetings;
        for block in open.chunks(meetings) {
            for pair in block.windows(2) {
                model.add_constraint(LinearConstraint::new(
                    ConstraintKind::SlotOrdering,
                    vec![(pair[1], 1.0), (pair[0], -1.0)],
                    Sense::LessEq,
                    0.0,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::TotalAttendance;
    use crate::models::Objective;

    fn params() -> SchedulingParameters {
        // n=4, d=2, m=3, c=2
        SchedulingParameters::new(4, 2, 3).with_group_band(2, 3)
    }

    #[test]
    fn test_variable_counts() {
        let p = params();
        let a = AvailabilityMatrix::all_available(4, 2, 3);
        let model = ModelBuilder::new(&p, &a).build_shared();

        let assignments = model.variable_count_where(|r| matches!(r, VarRole::Assignment { .. }));
        let open = model.variable_count_where(|r| matches!(r, VarRole::MeetingOpen { .. }));
        assert_eq!(assignments, 4 * 2 * 3 * 2);
        assert_eq!(open, 2 * 3 * 2);
        assert!(model.objective().is_empty());
    }

    #[test]
    fn test_constraint_families() {
        let p = params();
        let a = AvailabilityMatrix::all_available(4, 2, 3);
        let model = ModelBuilder::new(&p, &a).build_shared();

        assert_eq!(model.constraint_count_of(ConstraintKind::Availability), 0);
        assert_eq!(model.constraint_count_of(ConstraintKind::SingleMeetingPerDay), 4 * 2);
        assert_eq!(model.constraint_count_of(ConstraintKind::CapacityLower), 12);
        assert_eq!(model.constraint_count_of(ConstraintKind::CapacityUpper), 12);
        assert_eq!(model.constraint_count_of(ConstraintKind::SlotOrdering), 0);
    }

    #[test]
    fn test_single_meeting_spans_whole_day() {
        let p = params();
        let a = AvailabilityMatrix::all_available(4, 2, 3);
        let model = ModelBuilder::new(&p, &a).build_shared();

        let row = model
            .constraints()
            .iter()
            .find(|c| c.kind == ConstraintKind::SingleMeetingPerDay)
            .unwrap();
        // All timeslots and concurrent meetings of one day.
        assert_eq!(row.terms.len(), 3 * 2);
        assert_eq!(row.rhs, 1.0);
    }

    #[test]
    fn test_availability_closes_every_concurrent_meeting() {
        let p = params();
        // Person 1 busy on day 0 slot 2 only.
        let a = AvailabilityMatrix::from_fn(4, 2, 3, |person, day, slot| {
            !(person == 1 && day == 0 && slot == 2)
        });
        let model = ModelBuilder::new(&p, &a).build_shared();

        let rows: Vec<_> = model
            .constraints()
            .iter()
            .filter(|c| c.kind == ConstraintKind::Availability)
            .collect();
        assert_eq!(rows.len(), 2);
        for (meeting, row) in rows.iter().enumerate() {
            assert_eq!(row.terms, vec![(model.assignment(1, 0, 2, meeting), 1.0)]);
            assert_eq!(row.sense, Sense::Equal);
        }
    }

    #[test]
    fn test_capacity_band_semantics() {
        // n=3, one instance only (gMin=3 → c=1).
        let p = SchedulingParameters::new(3, 1, 1).with_group_band(3, 3);
        let a = AvailabilityMatrix::all_available(3, 1, 1);
        let model = ModelBuilder::new(&p, &a).build_shared();
        assert_eq!(model.variable_count(), 4);

        // [x0, x1, x2, open]
        assert!(model.is_satisfied_by(&[false, false, false, false]));
        assert!(model.is_satisfied_by(&[true, true, true, true]));
        assert!(!model.is_satisfied_by(&[true, true, false, true]));
        assert!(!model.is_satisfied_by(&[true, true, false, false]));
        assert!(!model.is_satisfied_by(&[false, false, false, true]));
    }

    #[test]
    fn test_slot_ordering_rows() {
        let p = params();
        let a = AvailabilityMatrix::all_available(4, 2, 3);
        let model = ModelBuilder::new(&p, &a).with_slot_ordering(true).build_shared();
        // (c - 1) rows per (day, timeslot)
        assert_eq!(model.constraint_count_of(ConstraintKind::SlotOrdering), 2 * 3);
    }

    #[test]
    fn test_build_uses_selected_objective() {
        let p = params();
        let a = AvailabilityMatrix::all_available(4, 2, 3);

        let model = ModelBuilder::new(&p, &a).build();
        assert_eq!(model.objective_name(), Some("total-attendance"));

        let p = params().with_objective(Objective::NewAcquaintances);
        let model = ModelBuilder::new(&p, &a).build();
        assert_eq!(model.objective_name(), Some("new-acquaintances"));

        let model = ModelBuilder::new(&p, &a).build_with(&TotalAttendance);
        assert_eq!(model.objective_name(), Some("total-attendance"));
    }
}
