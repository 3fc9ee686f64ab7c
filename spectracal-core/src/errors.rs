//! Error Types for Calibration, Transform and Serialization Failures
//!
//! ## Design Philosophy
//!
//! Calibration code runs on the instrument itself as well as on host tools, so
//! the error type follows embedded constraints:
//!
//! 1. **Flat**: one enumerated set shared by every component. Errors are never
//!    wrapped or chained; the most specific variant is returned at the boundary
//!    where the problem is detected.
//!
//! 2. **No Heap Allocation**: context is inline - `&'static str` reasons and
//!    sizes only.
//!
//! 3. **Copy Semantics**: errors are returned by value from hot paths.
//!
//! ## Error Categories
//!
//! - `Fail`: unclassified failure, e.g. a blob whose layout cannot be parsed
//! - `InvalidInput`: a structural invariant of an input record is violated
//!   (wrong arity, non-monotonic axis, unknown tag)
//! - `InsufficientMemory`: a caller-supplied buffer is too small
//! - `IllegalScanType`: a scan-configuration value is outside the set the
//!   instrument recognizes
//! - `NullPointer`: a required input is absent
//!
//! None of these are transient. Retrying without correcting the input yields
//! the same error.
//!
//! ```rust
//! use spectracal_core::{CalError, CalibrationCoefficients};
//!
//! let err = CalibrationCoefficients::from_slices(&[0.0; 3], &[400.0, 0.5]).unwrap_err();
//! assert!(matches!(err, CalError::InvalidInput { .. }));
//! assert_eq!(err.code(), -2);
//! ```

use thiserror_no_std::Error;

/// Result type for calibration operations
pub type CalResult<T> = Result<T, CalError>;

/// Calibration engine errors - one flat set, kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalError {
    /// Generic unclassified failure
    #[error("Operation failed: {reason}")]
    Fail {
        /// What could not be parsed or completed
        reason: &'static str,
    },

    /// A structural invariant of an input record is violated
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Which invariant was violated
        reason: &'static str,
    },

    /// Caller-supplied output buffer is too small
    #[error("Insufficient memory: need {required} bytes, have {available}")]
    InsufficientMemory {
        /// Size the operation needs
        required: usize,
        /// Size the caller provided
        available: usize,
    },

    /// Scan configuration value not recognized by the instrument
    #[error("Illegal scan type: {reason}")]
    IllegalScanType {
        /// Which configuration value was rejected
        reason: &'static str,
    },

    /// A required input was absent
    #[error("Null pointer: {what} is absent")]
    NullPointer {
        /// Name of the missing input
        what: &'static str,
    },
}

impl CalError {
    /// Numeric code used by stored status words and legacy host tools.
    ///
    /// Code `-4` belonged to the serializer backend of earlier firmware and is
    /// no longer produced.
    pub const fn code(&self) -> i32 {
        match self {
            Self::Fail { .. } => -1,
            Self::InvalidInput { .. } => -2,
            Self::InsufficientMemory { .. } => -3,
            Self::IllegalScanType { .. } => -5,
            Self::NullPointer { .. } => -6,
        }
    }

    /// Shorthand used throughout the crate
    pub(crate) const fn invalid(reason: &'static str) -> Self {
        Self::InvalidInput { reason }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Fail { reason } => defmt::write!(fmt, "Fail: {}", reason),
            Self::InvalidInput { reason } => defmt::write!(fmt, "Invalid input: {}", reason),
            Self::InsufficientMemory { required, available } => {
                defmt::write!(fmt, "Need {} bytes, have {}", required, available)
            }
            Self::IllegalScanType { reason } => defmt::write!(fmt, "Illegal scan type: {}", reason),
            Self::NullPointer { what } => defmt::write!(fmt, "Null: {}", what),
        }
    }
}
