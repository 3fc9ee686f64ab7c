//! Calibration Data Model
//!
//! Value types produced by factory calibration and acquisition. They carry no
//! behavior beyond construction and invariant checks ([`Validate`]); the
//! transform, the interpolator and the blob codec consume them read-only.
//!
//! | Record | Produced by | Lifetime |
//! |--------|-------------|----------|
//! | [`CalibrationCoefficients`] | factory wavelength calibration | until recalibration |
//! | [`ReferenceCalibrationMatrix`] | product characterization | immutable |
//! | [`ScanConfig`] | user / host tool | until edited |
//! | [`ScanData`] | acquisition layer | per scan |
//!
//! [`Validate`]: crate::traits::Validate

mod coefficients;
mod framebuffer;
mod reference;
mod scan;

pub use coefficients::CalibrationCoefficients;
pub use framebuffer::FrameBufferDescriptor;
pub use reference::{ReferenceCalibrationMatrix, ReferenceRow};
pub use scan::{ScanConfig, ScanData, ScanTimestamp, ScanType};
