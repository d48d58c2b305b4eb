//! Descriptor law checkers
//!
//! A descriptor's `get`/`set` pair is trusted by every combinator. These
//! checkers verify it for concrete inputs so the laws can be asserted in
//! unit tests or driven by proptest:
//!
//! - **round trip**: `get(set(s, m)) == s`
//! - **get-set**: `set(get(m), m) == m`
//! - **non-interference**: `set(get(m), set(s, m)) == m`, i.e. writing a
//!   child and restoring the old one leaves nothing else changed
//!
//! Checkers take a [`SimpleGlue`]; use [`composable_glue::Glue::as_simple`]
//! or `LazyGlue::glue().as_simple()` for the other descriptor kinds.

use composable_glue::SimpleGlue;
use std::fmt::Debug;
use thiserror::Error;

/// A descriptor law that does not hold for a concrete input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LawViolation {
    /// `get(set(s, m))` did not return `s`
    #[error("round trip violated: wrote {written}, read back {read}")]
    RoundTrip {
        /// Child model passed to `set`
        written: String,
        /// Child model returned by `get`
        read: String,
    },

    /// `set(get(m), m)` changed the parent
    #[error("get-set violated: {before} became {after}")]
    GetSet {
        /// Parent before the write
        before: String,
        /// Parent after writing its own child back
        after: String,
    },

    /// `set` changed part of the parent that `get` does not observe
    #[error("non-interference violated: {before} became {after}")]
    NonInterference {
        /// Parent before the writes
        before: String,
        /// Parent after writing a child and restoring the original one
        after: String,
    },
}

/// Result type for law checks
pub type Result<T> = std::result::Result<T, LawViolation>;

/// Check `get(set(sub, model)) == sub`
///
/// # Errors
///
/// Returns [`LawViolation::RoundTrip`] if the child read back differs.
pub fn check_round_trip<M, S>(glue: &SimpleGlue<M, S>, sub: S, model: M) -> Result<()>
where
    S: Clone + PartialEq + Debug,
{
    let updated = glue.set(sub.clone(), model);
    let read = glue.get(&updated);
    if *read == sub {
        Ok(())
    } else {
        Err(LawViolation::RoundTrip {
            written: format!("{sub:?}"),
            read: format!("{read:?}"),
        })
    }
}

/// Check `set(get(model), model) == model`
///
/// # Errors
///
/// Returns [`LawViolation::GetSet`] if the parent changed.
pub fn check_get_set<M, S>(glue: &SimpleGlue<M, S>, model: M) -> Result<()>
where
    M: Clone + PartialEq + Debug,
    S: Clone,
{
    let sub = glue.get(&model).clone();
    let after = glue.set(sub, model.clone());
    if after == model {
        Ok(())
    } else {
        Err(LawViolation::GetSet {
            before: format!("{model:?}"),
            after: format!("{after:?}"),
        })
    }
}

/// Check that writing `sub` and then restoring the original child yields `model`
///
/// # Errors
///
/// Returns [`LawViolation::NonInterference`] if anything else changed.
pub fn check_non_interference<M, S>(glue: &SimpleGlue<M, S>, sub: S, model: M) -> Result<()>
where
    M: Clone + PartialEq + Debug,
    S: Clone,
{
    let original = glue.get(&model).clone();
    let after = glue.set(original, glue.set(sub, model.clone()));
    if after == model {
        Ok(())
    } else {
        Err(LawViolation::NonInterference {
            before: format!("{model:?}"),
            after: format!("{after:?}"),
        })
    }
}

/// Run every law check for one input
///
/// # Errors
///
/// Returns the first [`LawViolation`] found.
pub fn check_laws<M, S>(glue: &SimpleGlue<M, S>, sub: S, model: M) -> Result<()>
where
    M: Clone + PartialEq + Debug,
    S: Clone + PartialEq + Debug,
{
    check_round_trip(glue, sub.clone(), model.clone())?;
    check_get_set(glue, model.clone())?;
    check_non_interference(glue, sub, model)
}
