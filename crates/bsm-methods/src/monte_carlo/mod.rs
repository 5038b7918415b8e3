//! Monte Carlo simulation framework.
//!
//! A simulation is wired from four pieces:
//!
//! * a [`TimeGrid`] whose points include every mandatory fixing date;
//! * a [`PathGenerator`] evolving a one-factor process along the grid from
//!   a seeded Gaussian sequence, optionally through a Brownian bridge and
//!   with antithetic companions;
//! * a [`PathPricer`] mapping each realized path to a discounted payoff;
//! * a [`MonteCarloModel`] accumulating samples until a target count or a
//!   target standard error is reached.

mod model;
mod path_generator;
mod path_pricer;
mod time_grid;

pub use model::MonteCarloModel;
pub use path_generator::{Path, PathGenerator};
pub use path_pricer::{EuropeanPathPricer, ForwardVanillaPathPricer, PathPricer};
pub use time_grid::TimeGrid;
