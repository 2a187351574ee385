//! Schedule (solution) model.
//!
//! A schedule is the decoded solver assignment: a four-dimensional 0/1
//! grid `[day][timeslot][concurrent meeting][person]`. It is created only
//! after a successful solve and is immutable thereafter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{AvailabilityMatrix, SchedulingParameters};
use crate::error::ScheduleError;

/// A solved schedule grid.
///
/// The grid is rectangular and every attendee row has exactly `people`
/// entries; deserialization enforces the same shape as [`Schedule::from_grid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct Schedule {
    cells: Vec<Vec<Vec<Vec<u8>>>>,
    people: usize,
}

#[derive(Deserialize)]
struct RawSchedule {
    cells: Vec<Vec<Vec<Vec<u8>>>>,
    people: usize,
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = ScheduleError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Schedule::from_grid(raw.cells, raw.people)
    }
}

/// One non-empty meeting instance and its attendees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSlot {
    /// Day index.
    pub day: usize,
    /// Timeslot index within the day.
    pub timeslot: usize,
    /// Concurrent-meeting index within the timeslot.
    pub meeting: usize,
    /// Attending person indices, ascending.
    pub attendees: Vec<usize>,
}

/// A rule broken by a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Day on which the violation occurs.
    pub day: usize,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A person attends more than one meeting on a day.
    DoubleBooked,
    /// A non-empty meeting is smaller than `min_group` or larger than `max_group`.
    GroupSizeOutOfBand,
    /// A person attends a meeting in a (day, timeslot) they are not free.
    Unavailable,
}

impl Schedule {
    /// Wraps a rectangular `[day][timeslot][meeting][person]` grid.
    ///
    /// Cells are treated as attending when non-zero.
    ///
    /// # Errors
    /// [`ScheduleError::GridShape`] if days differ in timeslot count,
    /// timeslots differ in meeting count, or an attendee row is not
    /// `people` long.
    pub fn from_grid(cells: Vec<Vec<Vec<Vec<u8>>>>, people: usize) -> Result<Self, ScheduleError> {
        let timeslots = cells.first().map_or(0, Vec::len);
        let meetings = cells
            .first()
            .and_then(|day| day.first())
            .map_or(0, Vec::len);

        for day in &cells {
            check_len("timeslots per day", timeslots, day.len())?;
            for slot in day {
                check_len("meetings per timeslot", meetings, slot.len())?;
                for row in slot {
                    check_len("attendee row", people, row.len())?;
                }
            }
        }
        Ok(Self { cells, people })
    }

    /// The raw grid.
    pub fn grid(&self) -> &[Vec<Vec<Vec<u8>>>] {
        &self.cells
    }

    /// Number of days.
    pub fn days(&self) -> usize {
        self.cells.len()
    }

    /// Timeslots per day.
    pub fn timeslots(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Concurrent meetings per timeslot.
    pub fn concurrent_meetings(&self) -> usize {
        self.cells
            .first()
            .and_then(|day| day.first())
            .map_or(0, Vec::len)
    }

    /// Number of people.
    pub fn people(&self) -> usize {
        self.people
    }

    /// Whether `person` attends the given meeting instance.
    pub fn attends(&self, day: usize, timeslot: usize, meeting: usize, person: usize) -> bool {
        self.cells
            .get(day)
            .and_then(|d| d.get(timeslot))
            .and_then(|s| s.get(meeting))
            .and_then(|c| c.get(person))
            .is_some_and(|&v| v != 0)
    }

    /// Head count of a meeting instance.
    pub fn attendance(&self, day: usize, timeslot: usize, meeting: usize) -> usize {
        self.cells
            .get(day)
            .and_then(|d| d.get(timeslot))
            .and_then(|s| s.get(meeting))
            .map_or(0, |c| c.iter().filter(|&&v| v != 0).count())
    }

    /// All non-empty meeting instances in (day, timeslot, meeting) order.
    pub fn meetings(&self) -> Vec<MeetingSlot> {
        let mut out = Vec::new();
        for (day, slots) in self.cells.iter().enumerate() {
            for (timeslot, meetings) in slots.iter().enumerate() {
                for (meeting, row) in meetings.iter().enumerate() {
                    let attendees: Vec<usize> = row
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| **v != 0)
                        .map(|(p, _)| p)
                        .collect();
                    if !attendees.is_empty() {
                        out.push(MeetingSlot {
                            day,
                            timeslot,
                            meeting,
                            attendees,
                        });
                    }
                }
            }
        }
        out
    }

    /// Sum of all assignments.
    pub fn total_attendance(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .flatten()
            .filter(|&&v| v != 0)
            .count()
    }

    /// Meetings attended by `person` across the horizon.
    pub fn meetings_for_person(&self, person: usize) -> Vec<MeetingSlot> {
        self.meetings()
            .into_iter()
            .filter(|m| m.attendees.contains(&person))
            .collect()
    }

    /// Every unordered pair `(i, j)`, `i < j`, sharing at least one meeting.
    pub fn acquainted_pairs(&self) -> BTreeSet<(usize, usize)> {
        let mut pairs = BTreeSet::new();
        for meeting in self.meetings() {
            for (k, &i) in meeting.attendees.iter().enumerate() {
                for &j in &meeting.attendees[k + 1..] {
                    pairs.insert((i, j));
                }
            }
        }
        pairs
    }

    /// Checks the schedule against its parameters and availability.
    ///
    /// Reports every person attending more than one meeting per day,
    /// every non-empty meeting outside `[min_group, max_group]`, and every
    /// attendance in a (day, timeslot) the person is not free.
    pub fn violations(
        &self,
        params: &SchedulingParameters,
        availability: &AvailabilityMatrix,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        let meetings = self.meetings();

        for meeting in &meetings {
            let size = meeting.attendees.len();
            if size < params.min_group || size > params.max_group {
                violations.push(Violation {
                    violation_type: ViolationType::GroupSizeOutOfBand,
                    day: meeting.day,
                    message: format!(
                        "meeting (day {}, slot {}, #{}) has {size} attendees, band is [{}, {}]",
                        meeting.day,
                        meeting.timeslot,
                        meeting.meeting,
                        params.min_group,
                        params.max_group
                    ),
                });
            }
            for &person in &meeting.attendees {
                if !availability.is_available(person, meeting.day, meeting.timeslot) {
                    violations.push(Violation {
                        violation_type: ViolationType::Unavailable,
                        day: meeting.day,
                        message: format!(
                            "person {person} attends day {} slot {} while unavailable",
                            meeting.day, meeting.timeslot
                        ),
                    });
                }
            }
        }

        for day in 0..self.days() {
            for person in 0..self.people {
                let count = meetings
                    .iter()
                    .filter(|m| m.day == day && m.attendees.contains(&person))
                    .count();
                if count > 1 {
                    violations.push(Violation {
                        violation_type: ViolationType::DoubleBooked,
                        day,
                        message: format!("person {person} attends {count} meetings on day {day}"),
                    });
                }
            }
        }

        violations
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), ScheduleError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ScheduleError::GridShape {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 day, 2 slots, 2 concurrent meetings, 4 people.
    fn sample_schedule() -> Schedule {
        Schedule::from_grid(
            vec![vec![
                vec![vec![1, 1, 0, 0], vec![0, 0, 1, 1]],
                vec![vec![0, 0, 0, 0], vec![0, 0, 0, 0]],
            ]],
            4,
        ).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let s = sample_schedule();
        assert_eq!(s.days(), 1);
        assert_eq!(s.timeslots(), 2);
        assert_eq!(s.concurrent_meetings(), 2);
        assert_eq!(s.people(), 4);
    }

    #[test]
    fn test_meetings_skip_empty_instances() {
        let s = sample_schedule();
        let meetings = s.meetings();
        assert_eq!(meetings.len(), 2);
        assert_eq!(meetings[0].attendees, vec![0, 1]);
        assert_eq!(meetings[1].attendees, vec![2, 3]);
        assert_eq!(meetings[1].meeting, 1);
        assert_eq!(s.total_attendance(), 4);
        assert_eq!(s.attendance(0, 1, 0), 0);
    }

    #[test]
    fn test_attends() {
        let s = sample_schedule();
        assert!(s.attends(0, 0, 0, 1));
        assert!(!s.attends(0, 0, 0, 2));
        assert!(!s.attends(5, 0, 0, 0));
    }

    #[test]
    fn test_acquainted_pairs() {
        let s = sample_schedule();
        let pairs: Vec<_> = s.acquainted_pairs().into_iter().collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_repeated_meetings_count_pair_once() {
        let s = Schedule::from_grid(
            vec![vec![vec![vec![1, 1, 1]]], vec![vec![vec![1, 1, 0]]]],
            3,
        ).unwrap();
        assert_eq!(s.acquainted_pairs().len(), 3);
        assert_eq!(s.meetings_for_person(0).len(), 2);
        assert_eq!(s.meetings_for_person(2).len(), 1);
    }

    #[test]
    fn test_valid_schedule_has_no_violations() {
        let s = sample_schedule();
        let params = SchedulingParameters::new(4, 1, 2).with_group_band(2, 2);
        let availability = AvailabilityMatrix::all_available(4, 1, 2);
        assert!(s.violations(&params, &availability).is_empty());
    }

    #[test]
    fn test_violations_detected() {
        // Person 0 attends both slots; slot 1 meeting has a single attendee.
        let s = Schedule::from_grid(
            vec![vec![
                vec![vec![1, 1, 0]],
                vec![vec![1, 0, 0]],
            ]],
            3,
        ).unwrap();
        let params = SchedulingParameters::new(3, 1, 2).with_group_band(2, 3);
        let availability = AvailabilityMatrix::from_fn(3, 1, 2, |p, _, s| !(p == 1 && s == 0));
        let violations = s.violations(&params, &availability);

        let kinds: Vec<_> = violations.iter().map(|v| v.violation_type.clone()).collect();
        assert!(kinds.contains(&ViolationType::DoubleBooked));
        assert!(kinds.contains(&ViolationType::GroupSizeOutOfBand));
        assert!(kinds.contains(&ViolationType::Unavailable));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_from_grid_rejects_wide_attendee_rows() {
        let err = Schedule::from_grid(vec![vec![vec![vec![1, 1, 1]]]], 2).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::GridShape {
                what: "attendee row",
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_grid_rejects_ragged_grid() {
        // Day 1 has one timeslot, day 0 has two.
        let ragged = vec![
            vec![vec![vec![0, 0]], vec![vec![0, 0]]],
            vec![vec![vec![1, 1]]],
        ];
        assert!(matches!(
            Schedule::from_grid(ragged, 2),
            Err(ScheduleError::GridShape { what: "timeslots per day", .. })
        ));

        let ragged = vec![vec![vec![vec![0, 0]], vec![vec![0, 0], vec![1, 1]]]];
        assert!(matches!(
            Schedule::from_grid(ragged, 2),
            Err(ScheduleError::GridShape { what: "meetings per timeslot", .. })
        ));
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let wide = serde_json::from_str::<Schedule>(r#"{"cells":[[[[1,1,1]]]],"people":2}"#);
        assert!(wide.is_err());

        let s: Schedule =
            serde_json::from_str(r#"{"cells":[[[[1,1,0]]]],"people":3}"#).unwrap();
        assert_eq!(s.total_attendance(), 2);
        let json = serde_json::to_string(&sample_schedule()).unwrap();
        assert_eq!(serde_json::from_str::<Schedule>(&json).unwrap(), sample_schedule());
    }
}
