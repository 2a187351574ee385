//! Tabular view of a schedule for output writers.
//!
//! One row per non-empty meeting instance with columns
//! `Date, Time, <one column per person>`. Empty instances are omitted.

use serde::{Deserialize, Serialize};

use super::Schedule;
use crate::error::ScheduleError;

/// Human-readable labels for days, timeslots, and people.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLabels {
    /// One label per day.
    pub dates: Vec<String>,
    /// One label per (day, timeslot), day-major: `times[day * m + slot]`.
    pub times: Vec<String>,
    /// One name per person.
    pub names: Vec<String>,
}

/// A single output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRow {
    /// Date label.
    pub date: String,
    /// Time label.
    pub time: String,
    /// Attendance flag per person, in name order.
    pub attending: Vec<bool>,
}

impl ScheduleLabels {
    /// Creates a label set.
    pub fn new(dates: Vec<String>, times: Vec<String>, names: Vec<String>) -> Self {
        Self {
            dates,
            times,
            names,
        }
    }

    /// Index labels (`Day 0`, `Slot 0`, `Person 0`, ...) for a schedule.
    pub fn numbered(schedule: &Schedule) -> Self {
        let m = schedule.timeslots();
        Self {
            dates: (0..schedule.days()).map(|d| format!("Day {d}")).collect(),
            times: (0..schedule.days() * m)
                .map(|i| format!("Slot {}", i % m.max(1)))
                .collect(),
            names: (0..schedule.people())
                .map(|p| format!("Person {p}"))
                .collect(),
        }
    }

    /// Column headers: `Date`, `Time`, then one per person.
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.names.len() + 2);
        header.push("Date".to_string());
        header.push("Time".to_string());
        header.extend(self.names.iter().cloned());
        header
    }

    fn check(&self, schedule: &Schedule) -> Result<(), ScheduleError> {
        let checks = [
            ("date", schedule.days(), self.dates.len()),
            ("time", schedule.days() * schedule.timeslots(), self.times.len()),
            ("name", schedule.people(), self.names.len()),
        ];
        for (what, expected, actual) in checks {
            if expected != actual {
                return Err(ScheduleError::LabelMismatch {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl MeetingRow {
    /// Cells aligned with [`ScheduleLabels::header`]: `"1"` for attendance,
    /// empty otherwise.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.attending.len() + 2);
        record.push(self.date.clone());
        record.push(self.time.clone());
        record.extend(
            self.attending
                .iter()
                .map(|&a| if a { "1".to_string() } else { String::new() }),
        );
        record
    }

    /// Number of attendees in this row.
    pub fn head_count(&self) -> usize {
        self.attending.iter().filter(|&&a| a).count()
    }
}

impl Schedule {
    /// Output rows for every non-empty meeting instance.
    ///
    /// Fails with [`ScheduleError::LabelMismatch`] if the label counts do
    /// not match the schedule dimensions.
    pub fn rows(&self, labels: &ScheduleLabels) -> Result<Vec<MeetingRow>, ScheduleError> {
        labels.check(self)?;
        let m = self.timeslots();
        let rows = self
            .meetings()
            .into_iter()
            .map(|meeting| {
                let mut attending = vec![false; self.people()];
                for &p in &meeting.attendees {
                    attending[p] = true;
                }
                MeetingRow {
                    date: labels.dates[meeting.day].clone(),
                    time: labels.times[meeting.day * m + meeting.timeslot].clone(),
                    attending,
                }
            })
            .collect();
        Ok(rows)
    }
}
