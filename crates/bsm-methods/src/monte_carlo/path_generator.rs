//! Single-factor path generation along a time grid.

use std::sync::Arc;

use bsm_core::{ensure, Real, Result, Size, Time};
use bsm_math::random_numbers::{BrownianBridge, GaussianSequenceGenerator};
use bsm_processes::StochasticProcess1D;

use super::time_grid::TimeGrid;

/// A realized path of the underlying along a time grid.
#[derive(Debug, Clone)]
pub struct Path {
    times: Vec<Time>,
    values: Vec<Real>,
}

impl Path {
    /// Number of points, including the starting value at time 0.
    pub fn len(&self) -> Size {
        self.values.len()
    }

    /// True if the path has no points; generation guarantees it never is.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The starting value.
    pub fn front(&self) -> Real {
        self.values[0]
    }

    /// The terminal value.
    pub fn back(&self) -> Real {
        self.values[self.values.len() - 1]
    }

    /// The underlying value at point `i`.
    pub fn value(&self, i: Size) -> Real {
        self.values[i]
    }

    /// The time of point `i`.
    pub fn time(&self, i: Size) -> Time {
        self.times[i]
    }

    /// All values, aligned with the time grid.
    pub fn values(&self) -> &[Real] {
        &self.values
    }
}

impl std::ops::Index<Size> for Path {
    type Output = Real;

    fn index(&self, index: Size) -> &Real {
        &self.values[index]
    }
}

/// Generates paths of a one-factor process along a time grid.
///
/// Each path consumes one Gaussian sequence of dimension equal to the
/// number of steps.  With the bridge enabled the sequence is consumed
/// coarse-to-fine through a [`BrownianBridge`]; either way the per-step
/// increments are cached so an antithetic companion can be produced
/// without drawing again.
pub struct PathGenerator {
    process: Arc<dyn StochasticProcess1D>,
    time_grid: TimeGrid,
    generator: GaussianSequenceGenerator,
    bridge: Option<BrownianBridge>,
    deviates: Vec<Real>,
}

impl PathGenerator {
    /// Wire a generator from its parts.
    ///
    /// The sequence generator's dimensionality must equal the process
    /// factor count times the number of grid steps; only one-factor
    /// processes are supported.
    pub fn new(
        process: Arc<dyn StochasticProcess1D>,
        time_grid: TimeGrid,
        generator: GaussianSequenceGenerator,
        brownian_bridge: bool,
    ) -> Result<Self> {
        ensure!(
            process.factors() == 1,
            "path generation needs a one-factor process, got {} factors",
            process.factors()
        );
        let dimension = process.factors() * time_grid.steps();
        ensure!(
            generator.dimension() == dimension,
            "sequence generator dimensionality {} does not match the {} required",
            generator.dimension(),
            dimension
        );
        let bridge = brownian_bridge.then(|| BrownianBridge::with_times(time_grid.as_slice()));
        Ok(Self {
            process,
            time_grid,
            generator,
            bridge,
            deviates: Vec::new(),
        })
    }

    /// The simulation time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        &self.time_grid
    }

    /// Draw the next path.
    pub fn next_path(&mut self) -> Path {
        let raw = self.generator.next_sequence();
        self.deviates = match &self.bridge {
            Some(bridge) => {
                // the bridge yields Wiener levels; convert back to
                // standardized per-step increments
                let steps = self.time_grid.steps();
                let mut wiener = vec![0.0; steps];
                bridge.transform(&raw, &mut wiener);
                let mut previous = 0.0;
                (0..steps)
                    .map(|i| {
                        let dw = (wiener[i] - previous) / self.time_grid.dt(i).sqrt();
                        previous = wiener[i];
                        dw
                    })
                    .collect()
            }
            None => raw,
        };
        self.build(false)
    }

    /// The antithetic companion of the most recently drawn path.
    ///
    /// Panics if called before [`next_path`][Self::next_path].
    pub fn antithetic_path(&self) -> Path {
        assert!(
            !self.deviates.is_empty(),
            "antithetic path requested before any draw"
        );
        self.build(true)
    }

    fn build(&self, negate: bool) -> Path {
        let mut values = Vec::with_capacity(self.time_grid.len());
        let mut x = self.process.x0();
        values.push(x);
        for (i, &dw) in self.deviates.iter().enumerate() {
            let t = self.time_grid[i];
            let dt = self.time_grid.dt(i);
            x = self.process.evolve(t, x, dt, if negate { -dw } else { dw });
            values.push(x);
        }
        Path {
            times: self.time_grid.as_slice().to_vec(),
            values,
        }
    }
}

impl std::fmt::Debug for PathGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathGenerator")
            .field("time_grid", &self.time_grid)
            .field("bridged", &self.bridge.is_some())
            .finish_non_exhaustive()
    }
}
