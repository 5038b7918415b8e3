//! Lazy calculation state machine.
//!
//! A pricing session computes its results once, on the first accessor call,
//! and serves every later call from the cache.  The state machine has two
//! states, Uncomputed and Computed; the transition happens in exactly one
//! place ([`LazyObject::calculate`]) and is all-or-nothing: if
//! [`perform_calculations`][LazyObject::perform_calculations] fails, the
//! object stays Uncomputed and the error reaches every caller.
//!
//! The cache uses `Cell` interior mutability so accessors can take `&self`.
//! `Cell` is `!Sync`, so a session is confined to a single thread by
//! construction; sharing across threads would require an explicit guard
//! around the transition, which this library deliberately does not hide.

use std::cell::Cell;

/// Trait for objects that lazily compute and cache their results.
///
/// Implementors provide [`perform_calculations`][Self::perform_calculations]
/// and expose their [`LazyState`]; the transition logic lives here.
pub trait LazyObject {
    /// Run the full calculation pipeline and store the results.
    ///
    /// Called by [`calculate`][Self::calculate] at most once per set of
    /// inputs.  Must either store *all* results or fail without storing any.
    fn perform_calculations(&self) -> crate::errors::Result<()>;

    /// The Uncomputed/Computed flag.
    fn lazy_state(&self) -> &LazyState;

    /// Ensure results are available, computing them on the first call.
    ///
    /// The Computed flag is set only after
    /// [`perform_calculations`][Self::perform_calculations] succeeds, so a
    /// failed calculation leaves the object Uncomputed.
    fn calculate(&self) -> crate::errors::Result<()> {
        if !self.lazy_state().computed.get() {
            self.perform_calculations()?;
            self.lazy_state().computed.set(true);
        }
        Ok(())
    }

    /// Mark the cached results as stale.
    ///
    /// Invalidation on market-data change is the responsibility of an outer
    /// observer layer; this hook is what such a layer would call.
    fn reset(&self) {
        self.lazy_state().computed.set(false);
    }

    /// Return `true` if the cache currently holds valid results.
    fn is_calculated(&self) -> bool {
        self.lazy_state().computed.get()
    }
}

/// The bookkeeping cell behind [`LazyObject`].
///
/// Embed this in a session struct and return it from
/// [`LazyObject::lazy_state`].
#[derive(Debug, Default)]
pub struct LazyState {
    /// `true` once the cached results are valid.
    pub computed: Cell<bool>,
}

impl LazyState {
    /// Create a state that starts out Uncomputed.
    pub fn new() -> Self {
        Self {
            computed: Cell::new(false),
        }
    }
}
