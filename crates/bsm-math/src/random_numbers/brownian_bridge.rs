//! Brownian-bridge path construction.
//!
//! A Brownian bridge fills in the points of a Wiener path by binary
//! bisection: the terminal point is drawn first from the full-span variance,
//! then each midpoint is drawn conditionally on its two anchors.  The i.i.d.
//! input variates are therefore consumed coarse-to-fine, which concentrates
//! the path's variance in the earliest draws.

use bsm_core::{Real, Size};

/// One bisection step: fill time index `index` conditionally on the anchors
/// at `left` and `right` (0 denotes the origin, W(0) = 0).
#[derive(Debug, Clone)]
struct BridgeStep {
    index: Size,
    left: Size,
    right: Size,
    left_weight: Real,
    right_weight: Real,
    stddev: Real,
}

/// Brownian-bridge transform over a fixed time grid.
///
/// Built once per time grid; [`transform`][Self::transform] then maps each
/// vector of `steps` i.i.d. standard-normal variates to the Wiener path
/// values `W(t₁), …, W(t_n)` (W(0) = 0 is implicit).
#[derive(Debug, Clone)]
pub struct BrownianBridge {
    times: Vec<Real>,
    steps: Vec<BridgeStep>,
}

impl BrownianBridge {
    /// Create a bridge for `steps` equally-spaced time steps on `[0, 1]`.
    pub fn new(steps: Size) -> Self {
        let t: Vec<Real> = (0..=steps).map(|i| i as Real / steps as Real).collect();
        Self::with_times(&t)
    }

    /// Create a bridge for an arbitrary time grid.
    ///
    /// `times` must start at 0 and be strictly increasing; its length is
    /// `steps + 1`.
    pub fn with_times(times: &[Real]) -> Self {
        assert!(times.len() >= 2, "need at least 2 time points");
        let n = times.len() - 1;
        let t = times;

        let mut steps = Vec::with_capacity(n);
        // terminal point first: W(t_n) ~ N(0, t_n)
        steps.push(BridgeStep {
            index: n,
            left: 0,
            right: 0,
            left_weight: 0.0,
            right_weight: 0.0,
            stddev: (t[n] - t[0]).sqrt(),
        });

        // breadth-first bisection of every interval between filled anchors
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((0usize, n));
        while let Some((l, r)) = queue.pop_front() {
            if r - l < 2 {
                continue;
            }
            let mid = (l + r) / 2;
            let span = t[r] - t[l];
            steps.push(BridgeStep {
                index: mid,
                left: l,
                right: r,
                left_weight: (t[r] - t[mid]) / span,
                right_weight: (t[mid] - t[l]) / span,
                stddev: ((t[mid] - t[l]) * (t[r] - t[mid]) / span).sqrt(),
            });
            queue.push_back((l, mid));
            queue.push_back((mid, r));
        }
        debug_assert_eq!(steps.len(), n);

        Self {
            times: t.to_vec(),
            steps,
        }
    }

    /// Number of time steps.
    pub fn size(&self) -> Size {
        self.times.len() - 1
    }

    /// The time grid (length `size + 1`).
    pub fn times(&self) -> &[Real] {
        &self.times
    }

    /// Transform i.i.d. standard-normal variates into Wiener path values.
    ///
    /// * `input` — `size` i.i.d. standard-normal variates.
    /// * `output` — on return, `output[i]` holds `W(t_{i+1})`.
    pub fn transform(&self, input: &[Real], output: &mut [Real]) {
        let n = self.size();
        assert_eq!(input.len(), n);
        assert_eq!(output.len(), n);

        for (z, step) in input.iter().zip(&self.steps) {
            let left_val = if step.left == 0 {
                0.0
            } else {
                output[step.left - 1]
            };
            let right_val = if step.right == 0 {
                0.0
            } else {
                output[step.right - 1]
            };
            output[step.index - 1] =
                step.left_weight * left_val + step.right_weight * right_val + step.stddev * z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bridge_size() {
        let bb = BrownianBridge::new(10);
        assert_eq!(bb.size(), 10);
        assert_eq!(bb.times().len(), 11);
    }

    #[test]
    fn zero_variates_produce_zero_path() {
        let bb = BrownianBridge::new(8);
        let input = vec![0.0; 8];
        let mut output = vec![0.0; 8];
        bb.transform(&input, &mut output);
        for &v in &output {
            assert!(v.abs() < 1e-14, "expected zero path, got {v}");
        }
    }

    #[test]
    fn single_step_matches_direct_draw() {
        let bb = BrownianBridge::with_times(&[0.0, 2.25]);
        let input = [1.5];
        let mut output = [0.0];
        bb.transform(&input, &mut output);
        assert_relative_eq!(output[0], 1.5 * 1.5, epsilon = 1e-14); // √2.25 · z
    }

    #[test]
    fn midpoint_is_conditional_on_anchors() {
        // Two equal steps on [0, 0.5, 1]: the terminal point comes first,
        // then W(0.5) = ½·W(1) + √0.25·z₁.
        let bb = BrownianBridge::new(2);
        let z0 = 1.0;
        let z1 = -0.5;
        let mut output = [0.0; 2];
        bb.transform(&[z0, z1], &mut output);
        assert_relative_eq!(output[1], z0, epsilon = 1e-14);
        assert_relative_eq!(output[0], 0.5 * z0 + 0.5 * z1, epsilon = 1e-14);
    }

    #[test]
    fn every_index_is_filled_exactly_once() {
        for n in [1usize, 2, 3, 5, 8, 13, 64] {
            let bb = BrownianBridge::new(n);
            let mut seen = vec![false; n + 1];
            for step in &bb.steps {
                assert!(!seen[step.index], "index {} filled twice", step.index);
                seen[step.index] = true;
            }
            assert!(seen[1..].iter().all(|&s| s), "unfilled index for n={n}");
        }
    }

    #[test]
    fn non_uniform_grid_keeps_finite_values() {
        let times = [0.0, 0.1, 0.25, 0.5, 0.52, 1.0, 1.5];
        let bb = BrownianBridge::with_times(&times);
        let input: Vec<Real> = (0..6).map(|i| 0.3 * (i as Real - 3.0)).collect();
        let mut output = vec![0.0; 6];
        bb.transform(&input, &mut output);
        for &v in &output {
            assert!(v.is_finite());
        }
    }
}
