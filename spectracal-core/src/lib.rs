//! Calibration engine for DMD-based spectrometers
//!
//! Turns raw detector scans into wavelength-labeled spectra using the
//! coefficients and reference data produced once per instrument at the
//! factory.
//!
//! Key constraints:
//! - Runs on the instrument MCU as well as on host tools
//! - No heap allocation; every operation works on caller-owned data
//! - Stateless and bounded: fixed-size polynomial evaluation, grid search and
//!   interpolation
//!
//! ```no_run
//! use spectracal_core::{transform, interp, CalibrationCoefficients, ReferenceCalibrationMatrix};
//!
//! # fn load() -> (CalibrationCoefficients, ReferenceCalibrationMatrix) { unimplemented!() }
//! let (coeffs, matrix) = load();
//!
//! // Column 427 of the DMD
//! let nm = transform::pixel_to_wavelength(427.0, &coeffs)?;
//!
//! // Reference for a 7 px pattern, interpolated between calibrated widths
//! let reference = interp::interpret_reference(&matrix, 7)?;
//! if reference.quality.is_extrapolated() {
//!     // lower-confidence reference
//! }
//! # Ok::<(), spectracal_core::CalError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod constants;
pub mod errors;
pub mod interp;
pub mod model;
pub mod traits;
pub mod transform;

// Public API
pub use errors::{CalError, CalResult};
pub use interp::{InstrumentClass, InterpolatedReference, ReferenceQuality};
pub use model::{
    CalibrationCoefficients, FrameBufferDescriptor, ReferenceCalibrationMatrix, ScanConfig,
    ScanData, ScanTimestamp, ScanType,
};
pub use traits::Validate;
pub use transform::SpectralPoint;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
