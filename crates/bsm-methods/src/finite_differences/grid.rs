//! Grid bounds and the log-spaced price grid.

use bsm_core::{ensure, Real, Result, Size, Time, Volatility};
use bsm_math::Array;

/// Multiplicative margin kept between the strike and the nearest grid
/// boundary, so the payoff kink never sits on the edge of the grid.
pub const SAFETY_ZONE_FACTOR: Real = 1.1;

/// A price interval `[s_min, s_max]` for the finite difference grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    /// Lower price bound, strictly positive.
    pub s_min: Real,
    /// Upper price bound.
    pub s_max: Real,
}

/// Compute price bounds covering both the diffusion cone of the spot and
/// the strike, with a safety margin.
///
/// The initial interval spans four standard deviations of the terminal
/// log-price distribution on each side of the spot, widened for short-dated
/// or low-volatility inputs where four standard deviations alone would hug
/// the spot too closely.  If the strike (with its safety margin) falls
/// outside, the violated bound is moved onto the strike and the opposite
/// bound is recomputed so that `s_min * s_max == spot²` still holds; the
/// spot stays at the logarithmic center of the interval either way.
pub fn grid_bounds(
    spot: Real,
    strike: Real,
    volatility: Volatility,
    residual_time: Time,
) -> Result<GridBounds> {
    ensure!(spot > 0.0, "spot must be positive, got {spot}");
    ensure!(strike > 0.0, "strike must be positive, got {strike}");
    ensure!(
        volatility > 0.0,
        "volatility must be positive, got {volatility}"
    );
    ensure!(
        residual_time > 0.0,
        "residual time must be positive, got {residual_time}"
    );

    let vol_sqrt_time = volatility * residual_time.sqrt();
    let prefactor = 1.0 + 0.02 / vol_sqrt_time;
    let min_max_factor = (4.0 * prefactor * vol_sqrt_time).exp();
    let mut s_min = spot / min_max_factor;
    let mut s_max = spot * min_max_factor;

    if s_min > strike / SAFETY_ZONE_FACTOR {
        s_min = strike / SAFETY_ZONE_FACTOR;
        s_max = spot / (s_min / spot);
    }
    if s_max < strike * SAFETY_ZONE_FACTOR {
        s_max = strike * SAFETY_ZONE_FACTOR;
        s_min = spot / (s_max / spot);
    }

    Ok(GridBounds { s_min, s_max })
}

/// A price grid whose points form a geometric progression, i.e. a uniform
/// grid in the logarithm of the price.
#[derive(Debug, Clone)]
pub struct LogGrid {
    points: Array,
    log_spacing: Real,
}

impl LogGrid {
    /// Discretize `bounds` into `size` log-spaced points, the first at
    /// `s_min` and the last at `s_max`.
    pub fn new(bounds: GridBounds, size: Size) -> Result<Self> {
        ensure!(size >= 3, "grid needs at least 3 points, got {size}");
        ensure!(
            bounds.s_min > 0.0 && bounds.s_max > bounds.s_min,
            "grid bounds must satisfy 0 < s_min < s_max, got [{}, {}]",
            bounds.s_min,
            bounds.s_max
        );
        let log_spacing = (bounds.s_max / bounds.s_min).ln() / (size - 1) as Real;
        let edx = log_spacing.exp();
        let mut points = Vec::with_capacity(size);
        points.push(bounds.s_min);
        for j in 1..size {
            points.push(points[j - 1] * edx);
        }
        Ok(Self {
            points: Array::from_vec(points),
            log_spacing,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> Size {
        self.points.len()
    }

    /// True if the grid has no points.  Construction guarantees it never
    /// is; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Uniform spacing in log-price.
    pub fn log_spacing(&self) -> Real {
        self.log_spacing
    }

    /// The underlying prices at each grid point.
    pub fn points(&self) -> &Array {
        &self.points
    }

    /// The grid points as a slice.
    pub fn as_slice(&self) -> &[Real] {
        self.points.as_slice()
    }

    /// Sample a function of the underlying price over the grid, e.g. a
    /// terminal payoff.
    pub fn sample<F: Fn(Real) -> Real>(&self, f: F) -> Array {
        self.points.map(f)
    }
}

impl std::ops::Index<Size> for LogGrid {
    type Output = Real;

    fn index(&self, index: Size) -> &Real {
        &self.points[index]
    }
}
