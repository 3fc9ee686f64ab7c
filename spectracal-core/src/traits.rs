//! Core traits for calibration records
//!
//! Every record checks its own invariants through [`Validate`]. Consumers
//! (the transform, the interpolator, the blob codec) call it at their boundary
//! instead of re-implementing the checks.

use crate::errors::CalResult;

/// Structural invariant check for a record
pub trait Validate {
    /// Check every invariant of the record, returning the most specific error
    fn validate(&self) -> CalResult<()>;
}

/// Trait for numbers that can be checked for usability
pub trait Finite {
    /// Check the value is a real number (not NaN or infinite)
    fn is_usable(&self) -> bool;
}

impl Finite for f64 {
    fn is_usable(&self) -> bool {
        self.is_finite()
    }
}

impl Finite for [f64] {
    fn is_usable(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }
}

/// Check that a sequence is strictly increasing.
///
/// Any comparison involving NaN is false, so a NaN element fails the check.
pub fn strictly_increasing<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}
