//! Solution decoding.

use super::model::MeetingModel;
use crate::models::Schedule;

/// Reshapes solved assignment values into a schedule grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleDecoder;

impl ScheduleDecoder {
    /// Builds the `[day][timeslot][meeting][person]` grid from the values of
    /// the model's assignment variables.
    ///
    /// Returns `None` when no assignment is available.
    pub fn decode(model: &MeetingModel, values: Option<&[bool]>) -> Option<Schedule> {
        let values = values?;
        let dims = model.dims();

        let cells = (0..dims.days)
            .map(|day| {
                (0..dims.timeslots)
                    .map(|timeslot| {
                        (0..dims.meetings)
                            .map(|meeting| {
                                (0..dims.people)
                                    .map(|person| {
                                        let x = model.assignment(person, day, timeslot, meeting);
                                        u8::from(values.get(x.index()).copied().unwrap_or(false))
                                    })
                                    .collect()
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        // Rectangular with `people`-wide rows by construction.
        Schedule::from_grid(cells, dims.people).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::ModelBuilder;
    use crate::models::{AvailabilityMatrix, SchedulingParameters};

    fn model() -> MeetingModel {
        // n=3, d=2, m=1, c=2
        let p = SchedulingParameters::new(3, 2, 1).with_group_band(2, 3);
        let a = AvailabilityMatrix::all_available(3, 2, 1);
        ModelBuilder::new(&p, &a).build()
    }

    #[test]
    fn test_decode_none() {
        assert!(ScheduleDecoder::decode(&model(), None).is_none());
    }

    #[test]
    fn test_decode_shape_and_cells() {
        let model = model();
        let mut values = vec![false; model.variable_count()];
        values[model.assignment(0, 1, 0, 1).index()] = true;
        values[model.assignment(2, 1, 0, 1).index()] = true;

        let schedule = ScheduleDecoder::decode(&model, Some(&values)).unwrap();
        assert_eq!(schedule.days(), 2);
        assert_eq!(schedule.timeslots(), 1);
        assert_eq!(schedule.concurrent_meetings(), 2);
        assert_eq!(schedule.people(), 3);
        assert_eq!(schedule.grid()[1][0][1], vec![1, 0, 1]);
        assert_eq!(schedule.grid()[0][0][0], vec![0, 0, 0]);
        assert_eq!(schedule.total_attendance(), 2);
    }

    #[test]
    fn test_decode_ignores_auxiliary_values() {
        let model = model();
        let mut values = vec![false; model.variable_count()];
        // Only non-assignment variables set.
        for v in values.iter_mut().skip(model.dims().assignment_count()) {
            *v = true;
        }
        let schedule = ScheduleDecoder::decode(&model, Some(&values)).unwrap();
        assert_eq!(schedule.total_attendance(), 0);
    }
}
