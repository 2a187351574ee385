//! Concurrent-meeting capacity planning.

/// Derives how many meetings may run side by side in one timeslot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityPlanner;

impl CapacityPlanner {
    /// `c = ceil(n / min_group)`: enough meetings that everyone could be
    /// seated in a single timeslot with groups of the minimum size.
    ///
    /// Always at least 1. `min_group` of 0 is treated as 1; validation
    /// rejects it before a model is built.
    pub fn concurrent_meetings(people: usize, min_group: usize) -> usize {
        people.div_ceil(min_group.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division() {
        assert_eq!(CapacityPlanner::concurrent_meetings(4, 2), 2);
        assert_eq!(CapacityPlanner::concurrent_meetings(12, 4), 3);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(CapacityPlanner::concurrent_meetings(7, 2), 4);
        assert_eq!(CapacityPlanner::concurrent_meetings(10, 4), 3);
    }

    #[test]
    fn test_min_group_one() {
        assert_eq!(CapacityPlanner::concurrent_meetings(5, 1), 5);
    }

    #[test]
    fn test_min_group_above_people() {
        assert_eq!(CapacityPlanner::concurrent_meetings(2, 3), 1);
    }

    #[test]
    fn test_degenerate_inputs_stay_positive() {
        assert_eq!(CapacityPlanner::concurrent_meetings(0, 2), 1);
        assert_eq!(CapacityPlanner::concurrent_meetings(3, 0), 3);
    }
}
