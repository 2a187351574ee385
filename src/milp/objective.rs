//! Objective strategies.
//!
//! - [`TotalAttendance`]: maximize Σ assignments. No auxiliary variables.
//! - [`NewAcquaintances`]: maximize the number of distinct pairs who share
//!   at least one meeting instance, via per-instance AND variables and a
//!   per-pair OR variable.
//!
//! # Scaling
//! `NewAcquaintances` adds C(n, 2)·(d·m·c + 1) variables and roughly
//! C(n, 2)·d·m·c·4 rows. It is markedly more expensive than
//! `TotalAttendance` for large populations.
//!
//! # Reference
//! Wolsey (2020), "Integer Programming", Ch. 1.9 (linearizing products of binaries)

use std::fmt::Debug;

use tracing::{debug, warn};

use super::model::{ConstraintKind, LinearConstraint, MeetingModel, ModelDims, Sense, VarId, VarRole};
use crate::models::Objective;

/// Above this many auxiliary variables a scaling warning is logged.
pub const AUXILIARY_WARNING_THRESHOLD: usize = 50_000;

/// Attaches an objective (and any auxiliary structure it needs) to a model.
pub trait ObjectiveStrategy: Send + Sync + Debug {
    /// Objective name (e.g. "total-attendance").
    fn name(&self) -> &'static str;

    /// Adds auxiliary variables and constraints, then sets the objective.
    fn attach(&self, model: &mut MeetingModel);

    /// Auxiliary variables this strategy adds for the given dimensions.
    fn auxiliary_variables(&self, _dims: &ModelDims) -> usize {
        0
    }
}

impl Objective {
    /// The strategy implementing this objective.
    pub fn strategy(&self) -> &'static dyn ObjectiveStrategy {
        match self {
            Objective::TotalAttendance => &TotalAttendance,
            Objective::NewAcquaintances => &NewAcquaintances,
        }
    }
}

/// Every unit of attendance counts equally.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalAttendance;

impl ObjectiveStrategy for TotalAttendance {
    fn name(&self) -> &'static str {
        "total-attendance"
    }

    fn attach(&self, model: &mut MeetingModel) {
        let terms = model.assignment_variables().map(|x| (x, 1.0)).collect();
        model.set_objective(self.name(), terms);
    }
}

/// Each pair counts once, however often they meet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewAcquaintances;

impl ObjectiveStrategy for NewAcquaintances {
    fn name(&self) -> &'static str {
        "new-acquaintances"
    }

    fn auxiliary_variables(&self, dims: &ModelDims) -> usize {
        dims.pair_count() * (dims.instance_count() + 1)
    }

    fn attach(&self, model: &mut MeetingModel) {
        let dims = model.dims();
        let aux = self.auxiliary_variables(&dims);
        if aux > AUXILIARY_WARNING_THRESHOLD {
            warn!(
                people = dims.people,
                auxiliary_variables = aux,
                "new-acquaintances objective grows quadratically with people; expect a slow solve"
            );
        } else {
            debug!(auxiliary_variables = aux, "adding pair co-occurrence variables");
        }

        let mut has_met = Vec::with_capacity(dims.pair_count());
        for first in 0..dims.people {
            for second in first + 1..dims.people {
                has_met.push(self.link_pair(model, &dims, first, second));
            }
        }

        let terms = has_met.into_iter().map(|v| (v, 1.0)).collect();
        model.set_objective(self.name(), terms);
    }
}

impl NewAcquaintances {
    /// Adds the co-occurrence variables for one pair, each tied to the AND
    /// of the two assignments, then the has-met variable tied to their OR.
    fn link_pair(&self, model: &mut MeetingModel, dims: &ModelDims, first: usize, second: usize) -> VarId {
        let met = model.add_variable(
            format!("met_{first}_{second}"),
            VarRole::HasMet { first, second },
        );

        let mut co_occurrences = Vec::with_capacity(dims.instance_count());
        for (day, timeslot, meeting) in dims.instances() {
            let a = model.assignment(first, day, timeslot, meeting);
            let b = model.assignment(second, day, timeslot, meeting);
            let z = model.add_variable(
                format!("met_{first}_{second}_{day}_{timeslot}_{meeting}"),
                VarRole::CoOccurrence {
                    first,
                    second,
                    day,
                    timeslot,
                    meeting,
                },
            );

            // z = a·b  ⇔  z <= a, z <= b, z >= a + b - 1
            model.add_constraint(LinearConstraint::new(
                ConstraintKind::PairAnd,
                vec![(z, 1.0), (a, -1.0)],
                Sense::LessEq,
                0.0,
            ));
            model.add_constraint(LinearConstraint::new(
                ConstraintKind::PairAnd,
                vec![(z, 1.0), (b, -1.0)],
                Sense::LessEq,
                0.0,
            ));
            model.add_constraint(LinearConstraint::new(
                ConstraintKind::PairAnd,
                vec![(z, 1.0), (a, -1.0), (b, -1.0)],
                Sense::GreaterEq,
                -1.0,
            ));
            co_occurrences.push(z);
        }

        // met = max(z_k)  ⇔  met >= z_k for every k, met <= Σ z_k
        for &z in &co_occurrences {
            model.add_constraint(LinearConstraint::new(
                ConstraintKind::PairOr,
                vec![(met, 1.0), (z, -1.0)],
                Sense::GreaterEq,
                0.0,
            ));
        }
        let mut upper = Vec::with_capacity(co_occurrences.len() + 1);
        upper.push((met, 1.0));
        upper.extend(co_occurrences.iter().map(|&z| (z, -1.0)));
        model.add_constraint(LinearConstraint::new(
            ConstraintKind::PairOr,
            upper,
            Sense::LessEq,
            0.0,
        ));

        met
    }
}
