//! Calibration coefficients
//!
//! Produced once per spectrometer by factory calibration and stored in
//! protected non-volatile memory. Read-only at runtime; replaced only by a
//! full recalibration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::NUM_POL_COEFF,
    errors::{CalError, CalResult},
    traits::{Finite, Validate},
};

/// Polynomial coefficients relating DMD columns to wavelengths and bending
/// patterns to follow slit-image rotation and grating curvature.
///
/// Both polynomials are stored in ascending power: index 0 is the constant
/// term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationCoefficients {
    /// Column offset as a function of DMD row
    pub shift_vector: [f64; NUM_POL_COEFF],

    /// Wavelength in nm as a function of DMD column
    pub pixel_to_wavelength: [f64; NUM_POL_COEFF],
}

impl CalibrationCoefficients {
    /// Create from fixed-arity arrays
    pub const fn new(
        shift_vector: [f64; NUM_POL_COEFF],
        pixel_to_wavelength: [f64; NUM_POL_COEFF],
    ) -> Self {
        Self {
            shift_vector,
            pixel_to_wavelength,
        }
    }

    /// Create from coefficient slices, rejecting any arity other than
    /// [`NUM_POL_COEFF`]
    pub fn from_slices(shift_vector: &[f64], pixel_to_wavelength: &[f64]) -> CalResult<Self> {
        let shift_vector: [f64; NUM_POL_COEFF] = shift_vector
            .try_into()
            .map_err(|_| CalError::invalid("shift vector coefficient count"))?;
        let pixel_to_wavelength: [f64; NUM_POL_COEFF] = pixel_to_wavelength
            .try_into()
            .map_err(|_| CalError::invalid("pixel-to-wavelength coefficient count"))?;

        let coeffs = Self::new(shift_vector, pixel_to_wavelength);
        coeffs.validate()?;
        Ok(coeffs)
    }
}

impl Validate for CalibrationCoefficients {
    fn validate(&self) -> CalResult<()> {
        if !self.shift_vector[..].is_usable() {
            return Err(CalError::invalid("shift vector coefficient is not finite"));
        }
        if !self.pixel_to_wavelength[..].is_usable() {
            return Err(CalError::invalid(
                "pixel-to-wavelength coefficient is not finite",
            ));
        }
        Ok(())
    }
}
