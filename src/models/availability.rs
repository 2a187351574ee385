//! Per-person availability over the (day, timeslot) horizon.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Which person is free at which (day, timeslot).
///
/// Indexed by (person, day, timeslot). Always fully populated: the
/// constructors fill every cell, and [`validate_input`] rejects a
/// deserialized matrix whose cell count disagrees with its shape.
///
/// [`validate_input`]: crate::validation::validate_input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityMatrix {
    people: usize,
    days: usize,
    timeslots: usize,
    free: Vec<bool>,
}

impl AvailabilityMatrix {
    /// Builds a matrix by evaluating `f(person, day, timeslot)` for every cell.
    pub fn from_fn<F>(people: usize, days: usize, timeslots: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> bool,
    {
        let mut free = Vec::with_capacity(people * days * timeslots);
        for person in 0..people {
            for day in 0..days {
                for slot in 0..timeslots {
                    free.push(f(person, day, slot));
                }
            }
        }
        Self {
            people,
            days,
            timeslots,
            free,
        }
    }

    /// Everyone free everywhere.
    pub fn all_available(people: usize, days: usize, timeslots: usize) -> Self {
        Self::from_fn(people, days, timeslots, |_, _, _| true)
    }

    /// Builds a matrix from nested `[person][day][timeslot]` rows.
    ///
    /// The shape is taken from the first person and first day; any row of a
    /// different length is rejected.
    pub fn from_nested(rows: Vec<Vec<Vec<bool>>>) -> Result<Self, ScheduleError> {
        let people = rows.len();
        let days = rows.first().map_or(0, Vec::len);
        let timeslots = rows
            .first()
            .and_then(|person| person.first())
            .map_or(0, Vec::len);

        let mut errors = Vec::new();
        for (person, person_rows) in rows.iter().enumerate() {
            if person_rows.len() != days {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ShapeMismatch,
                    format!(
                        "person {person} has {} days of availability, expected {days}",
                        person_rows.len()
                    ),
                ));
                continue;
            }
            for (day, slots) in person_rows.iter().enumerate() {
                if slots.len() != timeslots {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ShapeMismatch,
                        format!(
                            "person {person} day {day} has {} timeslots, expected {timeslots}",
                            slots.len()
                        ),
                    ));
                }
            }
        }
        if !errors.is_empty() {
            return Err(ScheduleError::Configuration(errors));
        }

        let free = rows.into_iter().flatten().flatten().collect();
        Ok(Self {
            people,
            days,
            timeslots,
            free,
        })
    }

    /// Random availability for experiments and benchmarks.
    ///
    /// Each cell is a two-stage draw: with probability 1/2 the person is
    /// "mostly busy" and free with probability 0.2, otherwise free with
    /// probability 0.5 (overall 0.35).
    pub fn random<R: Rng + ?Sized>(
        people: usize,
        days: usize,
        timeslots: usize,
        rng: &mut R,
    ) -> Self {
        Self::from_fn(people, days, timeslots, |_, _, _| {
            if rng.random_bool(0.5) {
                rng.random_bool(0.2)
            } else {
                rng.random_bool(0.5)
            }
        })
    }

    /// Number of people (n).
    #[inline]
    pub fn people(&self) -> usize {
        self.people
    }

    /// Number of days (d).
    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    /// Timeslots per day (m).
    #[inline]
    pub fn timeslots(&self) -> usize {
        self.timeslots
    }

    /// `(people, days, timeslots)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.people, self.days, self.timeslots)
    }

    /// Number of stored cells.
    pub fn cell_count(&self) -> usize {
        self.free.len()
    }

    /// Whether `person` is free at (`day`, `timeslot`).
    ///
    /// Out-of-range coordinates and missing cells are reported as unavailable.
    pub fn is_available(&self, person: usize, day: usize, timeslot: usize) -> bool {
        if person >= self.people || day >= self.days || timeslot >= self.timeslots {
            return false;
        }
        self.free
            .get((person * self.days + day) * self.timeslots + timeslot)
            .copied()
            .unwrap_or(false)
    }

    /// Number of (day, timeslot) cells in which `person` is free.
    pub fn free_count(&self, person: usize) -> usize {
        (0..self.days)
            .flat_map(|day| (0..self.timeslots).map(move |slot| (day, slot)))
            .filter(|&(day, slot)| self.is_available(person, day, slot))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_fn_indexing() {
        let m = AvailabilityMatrix::from_fn(3, 2, 4, |p, d, s| (p + d + s) % 2 == 0);
        assert_eq!(m.shape(), (3, 2, 4));
        assert_eq!(m.cell_count(), 24);
        assert!(m.is_available(0, 0, 0));
        assert!(!m.is_available(0, 0, 1));
        assert!(m.is_available(1, 1, 0));
        assert!(m.is_available(2, 1, 3));
    }

    #[test]
    fn test_out_of_range_is_unavailable() {
        let m = AvailabilityMatrix::all_available(2, 1, 1);
        assert!(m.is_available(1, 0, 0));
        assert!(!m.is_available(2, 0, 0));
        assert!(!m.is_available(0, 1, 0));
        assert!(!m.is_available(0, 0, 1));
    }

    #[test]
    fn test_from_nested() {
        let m = AvailabilityMatrix::from_nested(vec![
            vec![vec![true, false], vec![false, false]],
            vec![vec![true, true], vec![false, true]],
        ])
        .unwrap();
        assert_eq!(m.shape(), (2, 2, 2));
        assert!(!m.is_available(0, 0, 1));
        assert!(m.is_available(1, 1, 1));
        assert_eq!(m.free_count(0), 1);
        assert_eq!(m.free_count(1), 3);
    }

    #[test]
    fn test_from_nested_rejects_ragged_rows() {
        let err = AvailabilityMatrix::from_nested(vec![
            vec![vec![true, false]],
            vec![vec![true]],
        ])
        .unwrap_err();
        match err {
            ScheduleError::Configuration(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::ShapeMismatch);
                assert!(errors[0].message.contains("person 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let a = AvailabilityMatrix::random(5, 4, 3, &mut SmallRng::seed_from_u64(7));
        let b = AvailabilityMatrix::random(5, 4, 3, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.cell_count(), 60);
    }

    #[test]
    fn test_random_density() {
        let m = AvailabilityMatrix::random(50, 20, 10, &mut SmallRng::seed_from_u64(42));
        let free: usize = (0..50).map(|p| m.free_count(p)).sum();
        let rate = free as f64 / m.cell_count() as f64;
        // Expected 0.35
        assert!(rate > 0.30 && rate < 0.40, "rate = {rate}");
    }
}
