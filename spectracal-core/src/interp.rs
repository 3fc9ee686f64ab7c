//! Reference Calibration Interpolation
//!
//! ## Motivation
//!
//! Absorbance needs a reference scan taken with the same pattern width as the
//! sample scan. Taking a dedicated reference exposure for every possible width
//! is impractical, so characterization measures a coarse 19-width grid once and
//! the instrument interpolates a reference for any other width.
//!
//! ## Method
//!
//! Each tested wavelength column is treated independently; only the width axis
//! is interpolated:
//!
//! ```text
//! t      = (w - w[k]) / (w[k+1] - w[k])
//! I(w,λ) = I[k][λ] + (I[k+1][λ] - I[k][λ]) · t
//! ```
//!
//! - `w` equal to a calibrated width returns that row unchanged.
//! - `w` below the first or above the last calibrated width returns the edge
//!   row, flagged as an extrapolation. This is a success path; callers decide
//!   how much to trust it.
//! - `w` outside the widths the instrument class recognizes fails with
//!   `IllegalScanType`, whether or not it lies inside the tested range.
//!
//! ```rust
//! use spectracal_core::{interp, ReferenceCalibrationMatrix, ReferenceQuality};
//!
//! let widths = core::array::from_fn(|i| 2 + 2 * i as u8);
//! let nm = core::array::from_fn(|i| 900.0 + 16.0 * i as f64);
//! let grid = core::array::from_fn(|k| [1000 + 10 * k as u16; 50]);
//! let matrix = ReferenceCalibrationMatrix::new(widths, nm, grid)?;
//!
//! let reference = interp::interpret_reference(&matrix, 3)?;
//! assert_eq!(reference.quality, ReferenceQuality::Interpolated);
//! assert_eq!(reference.intensities[0], 1005.0);
//! # Ok::<(), spectracal_core::CalError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_MAX_PATTERN_WIDTH_PX, DEFAULT_MIN_PATTERN_WIDTH_PX, REF_CAL_INTERP_WAVELENGTH,
        REF_CAL_INTERP_WIDTH,
    },
    errors::{CalError, CalResult},
    model::{ReferenceCalibrationMatrix, ReferenceRow, ScanConfig, ScanType},
    traits::Validate,
};

/// Pattern widths an instrument class can project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstrumentClass {
    /// Narrowest recognized width in DMD columns
    min_width_px: u8,
    /// Widest recognized width in DMD columns
    max_width_px: u8,
}

impl Default for InstrumentClass {
    fn default() -> Self {
        Self {
            min_width_px: DEFAULT_MIN_PATTERN_WIDTH_PX,
            max_width_px: DEFAULT_MAX_PATTERN_WIDTH_PX,
        }
    }
}

impl InstrumentClass {
    /// Create a class with custom width limits (inclusive).
    ///
    /// A zero-width pattern lights nothing, so `min_width_px` must be at least
    /// 1 and no larger than `max_width_px`.
    pub fn new_with_limits(min_width_px: u8, max_width_px: u8) -> CalResult<Self> {
        if min_width_px == 0 {
            return Err(CalError::invalid("minimum pattern width is zero"));
        }
        if min_width_px > max_width_px {
            return Err(CalError::invalid("pattern width limits out of order"));
        }
        Ok(Self {
            min_width_px,
            max_width_px,
        })
    }

    /// Whether `width_px` is a width this class can project
    pub fn recognizes(&self, width_px: u8) -> bool {
        (self.min_width_px..=self.max_width_px).contains(&width_px)
    }

    /// Recognized width range (inclusive)
    pub fn width_limits(&self) -> (u8, u8) {
        (self.min_width_px, self.max_width_px)
    }
}

/// How an interpolated reference relates to the measured grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceQuality {
    /// Target width was measured; row returned unchanged
    Calibrated,
    /// Target width lies between two measured widths
    Interpolated,
    /// Target width is narrower than every measured width; first row used
    ExtrapolatedBelow,
    /// Target width is wider than every measured width; last row used
    ExtrapolatedAbove,
}

impl ReferenceQuality {
    /// Whether the curve was taken from an edge row rather than bracketed
    pub fn is_extrapolated(self) -> bool {
        matches!(self, Self::ExtrapolatedBelow | Self::ExtrapolatedAbove)
    }
}

/// Reference intensity curve for one pattern width
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedReference {
    /// Width the curve was produced for
    pub width_px: u8,
    /// Tested wavelengths in nm, copied from the matrix
    pub wavelengths: [f64; REF_CAL_INTERP_WAVELENGTH],
    /// Intensity at each tested wavelength
    pub intensities: [f64; REF_CAL_INTERP_WAVELENGTH],
    /// Whether the curve was measured, interpolated or extrapolated
    pub quality: ReferenceQuality,
}

impl InterpolatedReference {
    /// Sample the curve at arbitrary wavelengths.
    ///
    /// Linear between tested wavelengths; wavelengths outside the tested range
    /// take the nearest edge value.
    pub fn resample(&self, wavelengths_nm: &[f64], out: &mut [f64]) -> CalResult<()> {
        if out.len() < wavelengths_nm.len() {
            return Err(CalError::InsufficientMemory {
                required: wavelengths_nm.len(),
                available: out.len(),
            });
        }

        let last = REF_CAL_INTERP_WAVELENGTH - 1;
        for (value, &nm) in out.iter_mut().zip(wavelengths_nm) {
            if !nm.is_finite() {
                return Err(CalError::invalid("resample wavelength not finite"));
            }
            let upper = self.wavelengths.partition_point(|&w| w < nm);
            *value = if upper == 0 {
                self.intensities[0]
            } else if upper > last {
                self.intensities[last]
            } else {
                let (w0, w1) = (self.wavelengths[upper - 1], self.wavelengths[upper]);
                let (i0, i1) = (self.intensities[upper - 1], self.intensities[upper]);
                i0 + (i1 - i0) * ((nm - w0) / (w1 - w0))
            };
        }
        Ok(())
    }
}

/// Reference curve at `width_px` for the default instrument class
pub fn interpret_reference(
    matrix: &ReferenceCalibrationMatrix,
    width_px: u8,
) -> CalResult<InterpolatedReference> {
    interpret_reference_for(matrix, width_px, &InstrumentClass::default())
}

/// Reference curve at `width_px` for an explicit instrument class
pub fn interpret_reference_for(
    matrix: &ReferenceCalibrationMatrix,
    width_px: u8,
    class: &InstrumentClass,
) -> CalResult<InterpolatedReference> {
    if !class.recognizes(width_px) {
        return Err(CalError::IllegalScanType {
            reason: "pattern width not recognized by instrument class",
        });
    }
    matrix.validate()?;

    let widths = &matrix.widths;
    let last = REF_CAL_INTERP_WIDTH - 1;

    // Axis is strictly increasing: first index whose width is >= target
    let upper = widths.partition_point(|&w| w < width_px);

    let (intensities, quality) = if upper < REF_CAL_INTERP_WIDTH && widths[upper] == width_px {
        (row_as_f64(&matrix.intensities[upper]), ReferenceQuality::Calibrated)
    } else if upper == 0 {
        log_warn!(
            "Reference width {} px below calibrated range, using {} px row",
            width_px,
            widths[0]
        );
        (row_as_f64(&matrix.intensities[0]), ReferenceQuality::ExtrapolatedBelow)
    } else if upper > last {
        log_warn!(
            "Reference width {} px above calibrated range, using {} px row",
            width_px,
            widths[last]
        );
        (row_as_f64(&matrix.intensities[last]), ReferenceQuality::ExtrapolatedAbove)
    } else {
        let k = upper - 1;
        let t = f64::from(width_px - widths[k]) / f64::from(widths[k + 1] - widths[k]);
        (
            lerp_rows(&matrix.intensities[k], &matrix.intensities[k + 1], t),
            ReferenceQuality::Interpolated,
        )
    };

    Ok(InterpolatedReference {
        width_px,
        wavelengths: matrix.wavelengths,
        intensities,
        quality,
    })
}

/// Reference curve for the width a scan configuration projects.
///
/// Slew scans mix several widths in one scan and have no single reference
/// width.
pub fn interpret_for_config(
    matrix: &ReferenceCalibrationMatrix,
    config: &ScanConfig,
    class: &InstrumentClass,
) -> CalResult<InterpolatedReference> {
    match config.scan_type {
        ScanType::Column | ScanType::Hadamard => {
            interpret_reference_for(matrix, config.width_px, class)
        }
        ScanType::Slew => Err(CalError::IllegalScanType {
            reason: "slew scans have no single reference width",
        }),
    }
}

fn row_as_f64(row: &ReferenceRow) -> [f64; REF_CAL_INTERP_WAVELENGTH] {
    core::array::from_fn(|j| f64::from(row[j]))
}

fn lerp_rows(lo: &ReferenceRow, hi: &ReferenceRow, t: f64) -> [f64; REF_CAL_INTERP_WAVELENGTH] {
    core::array::from_fn(|j| {
        let a = f64::from(lo[j]);
        let b = f64::from(hi[j]);
        a + (b - a) * t
    })
}
