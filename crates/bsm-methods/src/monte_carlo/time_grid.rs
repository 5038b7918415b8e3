//! Simulation time grids with mandatory fixing dates.

use bsm_core::{ensure, Real, Result, Size, Time};

/// Absolute tolerance used when matching a requested time to a grid point.
const TIME_TOLERANCE: Time = 1.0e-10;

/// A discrete, strictly increasing set of simulation times starting at 0.
///
/// Every mandatory time lands exactly on a grid point; the intervals
/// between consecutive mandatory times (and between 0 and the first one)
/// are subdivided into near-uniform steps of roughly the reference step
/// width.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
}

impl TimeGrid {
    /// Build a grid from sorted `mandatory` times, with `steps` steps of
    /// reference width spanning the interval between the first and last
    /// mandatory time (or `[0, last]` when they coincide).
    pub fn with_mandatory_times(mandatory: &[Time], steps: Size) -> Result<Self> {
        ensure!(
            !mandatory.is_empty(),
            "at least one mandatory time is required"
        );
        ensure!(steps > 0, "need at least one time step");
        ensure!(
            mandatory[0] >= 0.0,
            "mandatory times must be non-negative, got {}",
            mandatory[0]
        );
        for pair in mandatory.windows(2) {
            // separation below the matching tolerance would silently merge
            // two fixings into one grid point
            ensure!(
                pair[1] - pair[0] > TIME_TOLERANCE,
                "mandatory times must be strictly increasing, got {} then {}",
                pair[0],
                pair[1]
            );
        }
        let first = mandatory[0];
        let last = mandatory[mandatory.len() - 1];
        ensure!(last > 0.0, "the grid must extend past time 0");

        let span = last - first;
        let dt_reference = if span > 0.0 {
            span / steps as Real
        } else {
            last / steps as Real
        };

        let mut times = vec![0.0];
        let mut previous: Time = 0.0;
        for &t in mandatory {
            if t <= previous + TIME_TOLERANCE {
                continue;
            }
            let interval = t - previous;
            let substeps = ((interval / dt_reference).round() as Size).max(1);
            let dt = interval / substeps as Real;
            for k in 1..substeps {
                times.push(previous + k as Real * dt);
            }
            // the mandatory time itself lands exactly, free of rounding
            times.push(t);
            previous = t;
        }
        Ok(Self { times })
    }

    /// A uniform grid of `steps` steps from 0 to `end`.
    pub fn regular(end: Time, steps: Size) -> Result<Self> {
        Self::with_mandatory_times(&[end], steps)
    }

    /// Number of grid points, including time 0.
    pub fn len(&self) -> Size {
        self.times.len()
    }

    /// True if the grid has no points; construction guarantees it never is.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of steps, one less than the number of points.
    pub fn steps(&self) -> Size {
        self.times.len() - 1
    }

    /// Width of step `i`, from point `i` to point `i + 1`.
    pub fn dt(&self, i: Size) -> Time {
        self.times[i + 1] - self.times[i]
    }

    /// The grid points.
    pub fn as_slice(&self) -> &[Time] {
        &self.times
    }

    /// Index of the grid point matching `t`, if any.
    pub fn index_of(&self, t: Time) -> Option<Size> {
        self.times.iter().position(|&u| (u - t).abs() < TIME_TOLERANCE)
    }

    /// The last grid point.
    pub fn last(&self) -> Time {
        self.times[self.times.len() - 1]
    }
}

impl std::ops::Index<Size> for TimeGrid {
    type Output = Time;

    fn index(&self, index: Size) -> &Time {
        &self.times[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fixings_land_exactly_on_grid_points() {
        let grid = TimeGrid::with_mandatory_times(&[0.5, 1.5], 10).unwrap();
        // reference dt = (1.5 − 0.5)/10 = 0.1: 5 steps to 0.5, 10 more to 1.5
        assert_eq!(grid.len(), 16);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[5], 0.5);
        assert_eq!(grid[15], 1.5);
        assert_eq!(grid.index_of(0.5), Some(5));
        assert_eq!(grid.index_of(1.5), Some(15));
        assert_eq!(grid.index_of(0.62), None);
        for i in 0..grid.steps() {
            assert_relative_eq!(grid.dt(i), 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_mandatory_time_gives_a_regular_grid() {
        let grid = TimeGrid::regular(2.0, 8).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.steps(), 8);
        assert_relative_eq!(grid.dt(3), 0.25, epsilon = 1e-12);
        assert_eq!(grid.last(), 2.0);
    }

    #[test]
    fn a_fixing_at_time_zero_is_absorbed() {
        let grid = TimeGrid::with_mandatory_times(&[0.0, 1.0], 4).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid.last(), 1.0);
    }

    #[test]
    fn short_leading_interval_still_gets_a_step() {
        // reference dt = (2.0 − 0.01)/4 ≈ 0.5: [0, 0.01] rounds to zero
        // substeps but is forced to one
        let grid = TimeGrid::with_mandatory_times(&[0.01, 2.0], 4).unwrap();
        assert_eq!(grid[1], 0.01);
        assert_eq!(grid.last(), 2.0);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(TimeGrid::with_mandatory_times(&[], 10).is_err());
        assert!(TimeGrid::with_mandatory_times(&[1.0], 0).is_err());
        assert!(TimeGrid::with_mandatory_times(&[-0.5, 1.0], 10).is_err());
        assert!(TimeGrid::with_mandatory_times(&[1.0, 0.5], 10).is_err());
        assert!(TimeGrid::with_mandatory_times(&[0.0], 10).is_err());
    }

    #[test]
    fn near_duplicate_fixings_are_rejected() {
        // separations below the matching tolerance cannot each land on
        // their own grid point, so they are refused outright
        assert!(TimeGrid::with_mandatory_times(&[0.5, 0.5 + 5.0e-11, 1.5], 10).is_err());
        assert!(TimeGrid::with_mandatory_times(&[0.5, 0.5, 1.5], 10).is_err());
        // a clearly separated pair still passes
        assert!(TimeGrid::with_mandatory_times(&[0.5, 0.5 + 1.0e-6, 1.5], 10).is_ok());
    }
}
