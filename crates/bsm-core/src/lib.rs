//! # bsm-core
//!
//! Core types, error definitions, and the lazy-calculation pattern shared by
//! the bsmkit workspace crates.
//!
//! Pricing sessions hold their cached results behind [`lazy::LazyObject`];
//! every other crate reports failures through [`errors::Error`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Lazy calculation state machine (Uncomputed → Computed).
pub mod lazy;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// Large non-negative integer, used for seeds and sample counts.
pub type BigNatural = u64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use lazy::{LazyObject, LazyState};
