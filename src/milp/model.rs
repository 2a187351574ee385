//! Backend-neutral 0/1 linear model.
//!
//! Every variable is binary. Constraints are linear rows
//! `Σ coef·var (<= | >= | ==) rhs`, tagged with the rule they encode so
//! that tests and logs can reason about each constraint family.

use std::fmt;

use crate::models::SchedulingParameters;

/// Index of a variable within a [`MeetingModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Position in [`MeetingModel::variables`].
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a variable means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarRole {
    /// `person` attends meeting `meeting` at (`day`, `timeslot`).
    Assignment {
        person: usize,
        day: usize,
        timeslot: usize,
        meeting: usize,
    },
    /// The meeting instance is non-empty.
    MeetingOpen {
        day: usize,
        timeslot: usize,
        meeting: usize,
    },
    /// Both `first` and `second` attend this exact meeting instance.
    CoOccurrence {
        first: usize,
        second: usize,
        day: usize,
        timeslot: usize,
        meeting: usize,
    },
    /// `first` and `second` share at least one meeting instance.
    HasMet { first: usize, second: usize },
}

/// A named binary variable.
#[derive(Debug, Clone)]
pub struct ModelVar {
    /// Solver-facing name.
    pub name: String,
    /// Meaning of the variable.
    pub role: VarRole,
}

/// Row relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs >= rhs`
    GreaterEq,
    /// `lhs == rhs`
    Equal,
}

/// The rule a constraint row encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Assignment forced to 0 where the person is unavailable.
    Availability,
    /// At most one meeting per person per day.
    SingleMeetingPerDay,
    /// Open meeting has at least `min_group` attendees.
    CapacityLower,
    /// Meeting has at most `max_group` attendees, and none unless open.
    CapacityUpper,
    /// Concurrent meeting `c + 1` may open only if meeting `c` is open.
    SlotOrdering,
    /// Co-occurrence variable equals the AND of two assignments.
    PairAnd,
    /// Has-met variable equals the OR of its co-occurrence variables.
    PairOr,
}

/// A linear row over binary variables.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Encoded rule.
    pub kind: ConstraintKind,
    /// `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, f64)>,
    /// Relation.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Creates a constraint row.
    pub fn new(kind: ConstraintKind, terms: Vec<(VarId, f64)>, sense: Sense, rhs: f64) -> Self {
        Self {
            kind,
            terms,
            sense,
            rhs,
        }
    }

    /// Left-hand side under a full 0/1 assignment.
    pub fn lhs(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(id, _)| values.get(id.index()).copied().unwrap_or(false))
            .map(|&(_, coef)| coef)
            .sum()
    }

    /// Whether the row holds under a full 0/1 assignment.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        const EPS: f64 = 1e-6;
        let lhs = self.lhs(values);
        match self.sense {
            Sense::LessEq => lhs <= self.rhs + EPS,
            Sense::GreaterEq => lhs >= self.rhs - EPS,
            Sense::Equal => (lhs - self.rhs).abs() <= EPS,
        }
    }
}

/// Problem dimensions and the assignment-variable layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDims {
    /// People (n).
    pub people: usize,
    /// Days (d).
    pub days: usize,
    /// Timeslots per day (m).
    pub timeslots: usize,
    /// Concurrent meetings per timeslot (c).
    pub meetings: usize,
}

impl ModelDims {
    /// Dimensions implied by scheduling parameters.
    pub fn from_params(params: &SchedulingParameters) -> Self {
        Self {
            people: params.people,
            days: params.days,
            timeslots: params.timeslots,
            meetings: params.concurrent_meetings(),
        }
    }

    /// n·d·m·c.
    pub fn assignment_count(&self) -> usize {
        self.people * self.instance_count()
    }

    /// d·m·c.
    pub fn instance_count(&self) -> usize {
        self.days * self.timeslots * self.meetings
    }

    /// C(n, 2).
    pub fn pair_count(&self) -> usize {
        self.people * self.people.saturating_sub(1) / 2
    }

    /// Position of an assignment variable. Assignment variables occupy
    /// the first n·d·m·c slots in person-day-timeslot-meeting order.
    #[inline]
    pub fn assignment_index(&self, person: usize, day: usize, timeslot: usize, meeting: usize) -> usize {
        ((person * self.days + day) * self.timeslots + timeslot) * self.meetings + meeting
    }

    /// Every `(day, timeslot, meeting)` instance in order.
    pub fn instances(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.days).flat_map(move |day| {
            (0..self.timeslots)
                .flat_map(move |slot| (0..self.meetings).map(move |meeting| (day, slot, meeting)))
        })
    }
}

/// A complete model: variables, constraints, and a maximization objective.
#[derive(Debug, Clone)]
pub struct MeetingModel {
    dims: ModelDims,
    variables: Vec<ModelVar>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, f64)>,
    objective_name: Option<&'static str>,
}

impl MeetingModel {
    /// An empty model for the given dimensions.
    pub fn new(dims: ModelDims) -> Self {
        Self {
            dims,
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Vec::new(),
            objective_name: None,
        }
    }

    /// Problem dimensions.
    pub fn dims(&self) -> ModelDims {
        self.dims
    }

    /// Adds a binary variable.
    pub fn add_variable(&mut self, name: impl Into<String>, role: VarRole) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(ModelVar {
            name: name.into(),
            role,
        });
        id
    }

    /// Adds a constraint row.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Replaces the objective (always maximized).
    pub fn set_objective(&mut self, name: &'static str, terms: Vec<(VarId, f64)>) {
        self.objective_name = Some(name);
        self.objective = terms;
    }

    /// The assignment variable for a (person, day, timeslot, meeting).
    pub fn assignment(&self, person: usize, day: usize, timeslot: usize, meeting: usize) -> VarId {
        VarId(self.dims.assignment_index(person, day, timeslot, meeting))
    }

    /// Assignment variables in layout order.
    pub fn assignment_variables(&self) -> impl Iterator<Item = VarId> {
        (0..self.dims.assignment_count()).map(VarId)
    }

    /// All variables.
    pub fn variables(&self) -> &[ModelVar] {
        &self.variables
    }

    /// All constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective terms.
    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    /// Name of the attached objective, if any.
    pub fn objective_name(&self) -> Option<&'static str> {
        self.objective_name
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of constraints of one kind.
    pub fn constraint_count_of(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }

    /// Number of variables matching a predicate on their role.
    pub fn variable_count_where(&self, pred: impl Fn(&VarRole) -> bool) -> usize {
        self.variables.iter().filter(|v| pred(&v.role)).count()
    }

    /// Objective value under a full 0/1 assignment.
    pub fn evaluate_objective(&self, values: &[bool]) -> f64 {
        self.objective
            .iter()
            .filter(|(id, _)| values.get(id.index()).copied().unwrap_or(false))
            .map(|&(_, coef)| coef)
            .sum()
    }

    /// Constraint rows violated by an assignment.
    pub fn violated_constraints<'a>(&'a self, values: &'a [bool]) -> impl Iterator<Item = &'a LinearConstraint> + 'a {
        self.constraints.iter().filter(move |c| !c.is_satisfied(values))
    }

    /// Whether an assignment satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len() && self.violated_constraints(values).next().is_none()
    }
}

impl fmt::Display for MeetingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vars, {} constraints, objective {} (n={}, d={}, m={}, c={})",
            self.variables.len(),
            self.constraints.len(),
            self.objective_name.unwrap_or("none"),
            self.dims.people,
            self.dims.days,
            self.dims.timeslots,
            self.dims.meetings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> ModelDims {
        ModelDims {
            people: 3,
            days: 2,
            timeslots: 2,
            meetings: 2,
        }
    }

    #[test]
    fn test_assignment_index_is_dense() {
        let d = dims();
        let mut seen = vec![false; d.assignment_count()];
        for p in 0..3 {
            for (day, slot, meeting) in d.instances() {
                let idx = d.assignment_index(p, day, slot, meeting);
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_dims_counts() {
        let d = dims();
        assert_eq!(d.instance_count(), 8);
        assert_eq!(d.assignment_count(), 24);
        assert_eq!(d.pair_count(), 3);
        assert_eq!(d.instances().count(), 8);
    }

    #[test]
    fn test_constraint_satisfaction() {
        let mut model = MeetingModel::new(dims());
        let a = model.add_variable("a", VarRole::HasMet { first: 0, second: 1 });
        let b = model.add_variable("b", VarRole::HasMet { first: 0, second: 2 });
        let row = LinearConstraint::new(
            ConstraintKind::SingleMeetingPerDay,
            vec![(a, 1.0), (b, 1.0)],
            Sense::LessEq,
            1.0,
        );
        assert!(row.is_satisfied(&[true, false]));
        assert!(!row.is_satisfied(&[true, true]));

        model.add_constraint(row);
        model.set_objective("test", vec![(a, 1.0), (b, 2.0)]);
        assert!(model.is_satisfied_by(&[false, true]));
        assert!(!model.is_satisfied_by(&[true, true]));
        assert!(!model.is_satisfied_by(&[true]));
        assert_eq!(model.evaluate_objective(&[false, true]), 2.0);
        assert_eq!(model.objective_name(), Some("test"));
    }

    #[test]
    fn test_equal_sense() {
        let mut model = MeetingModel::new(dims());
        let a = model.add_variable("a", VarRole::HasMet { first: 0, second: 1 });
        let row = LinearConstraint::new(ConstraintKind::Availability, vec![(a, 1.0)], Sense::Equal, 0.0);
        assert!(row.is_satisfied(&[false]));
        assert!(!row.is_satisfied(&[true]));
    }
}
