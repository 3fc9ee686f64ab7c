//! Reference calibration matrix
//!
//! A coarse grid of measured intensities over tested pattern widths and
//! wavelengths. Generated once during product characterization, immutable at
//! runtime, and loaded wholesale before any interpolation call.
//!
//! ```text
//!                  wavelengths[0]  wavelengths[1]  ...  wavelengths[49]
//! widths[0]   ->   intensities[0][0]  ...
//! widths[1]   ->   intensities[1][0]  ...
//!   ...
//! widths[18]  ->   intensities[18][0] ...             intensities[18][49]
//! ```

use crate::{
    constants::{REF_CAL_INTERP_WAVELENGTH, REF_CAL_INTERP_WIDTH},
    errors::{CalError, CalResult},
    traits::{strictly_increasing, Validate},
};

/// One row of the matrix: an intensity per tested wavelength
pub type ReferenceRow = [u16; REF_CAL_INTERP_WAVELENGTH];

/// Reference calibration matrix
///
/// Laid out as a C struct so its in-memory size is the stored-record size the
/// blob codec budgets for.
#[derive(Debug, Clone, PartialEq)]
#[repr(C)]
pub struct ReferenceCalibrationMatrix {
    /// Tested pattern widths in DMD columns, strictly increasing
    pub widths: [u8; REF_CAL_INTERP_WIDTH],

    /// Tested wavelengths in nm, strictly increasing
    pub wavelengths: [f64; REF_CAL_INTERP_WAVELENGTH],

    /// Measured intensities indexed `[width][wavelength]`
    pub intensities: [ReferenceRow; REF_CAL_INTERP_WIDTH],
}

impl ReferenceCalibrationMatrix {
    /// Create from fixed-size axes and grid, checking monotonic axes
    pub fn new(
        widths: [u8; REF_CAL_INTERP_WIDTH],
        wavelengths: [f64; REF_CAL_INTERP_WAVELENGTH],
        intensities: [ReferenceRow; REF_CAL_INTERP_WIDTH],
    ) -> CalResult<Self> {
        let matrix = Self {
            widths,
            wavelengths,
            intensities,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Create from slices as handed over by characterization tooling.
    ///
    /// `intensities` is row-major, one row per width. Any dimension mismatch is
    /// rejected.
    pub fn from_slices(widths: &[u8], wavelengths: &[f64], intensities: &[&[u16]]) -> CalResult<Self> {
        let widths: [u8; REF_CAL_INTERP_WIDTH] = widths
            .try_into()
            .map_err(|_| CalError::invalid("width axis length"))?;
        let wavelengths: [f64; REF_CAL_INTERP_WAVELENGTH] = wavelengths
            .try_into()
            .map_err(|_| CalError::invalid("wavelength axis length"))?;

        if intensities.len() != REF_CAL_INTERP_WIDTH {
            return Err(CalError::invalid("intensity grid row count"));
        }

        let mut grid = [[0u16; REF_CAL_INTERP_WAVELENGTH]; REF_CAL_INTERP_WIDTH];
        for (dst, src) in grid.iter_mut().zip(intensities) {
            if src.len() != REF_CAL_INTERP_WAVELENGTH {
                return Err(CalError::invalid("intensity grid column count"));
            }
            dst.copy_from_slice(src);
        }

        Self::new(widths, wavelengths, grid)
    }

    /// Row measured at calibrated width index `k`
    pub fn row(&self, k: usize) -> Option<&ReferenceRow> {
        self.intensities.get(k)
    }

    /// Index of a calibrated width, if `width` was tested exactly
    pub fn width_index(&self, width: u8) -> Option<usize> {
        self.widths.binary_search(&width).ok()
    }

    /// Narrowest and widest calibrated pattern width
    pub fn width_range(&self) -> (u8, u8) {
        (self.widths[0], self.widths[REF_CAL_INTERP_WIDTH - 1])
    }
}

impl Validate for ReferenceCalibrationMatrix {
    fn validate(&self) -> CalResult<()> {
        if !strictly_increasing(&self.widths) {
            return Err(CalError::invalid("width axis not strictly increasing"));
        }
        if !strictly_increasing(&self.wavelengths) {
            return Err(CalError::invalid("wavelength axis not strictly increasing"));
        }
        if self.wavelengths.iter().any(|nm| !nm.is_finite()) {
            return Err(CalError::invalid("wavelength axis not finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths() -> [u8; REF_CAL_INTERP_WIDTH] {
        core::array::from_fn(|i| 2 + 2 * i as u8)
    }

    fn wavelengths() -> [f64; REF_CAL_INTERP_WAVELENGTH] {
        core::array::from_fn(|i| 900.0 + 16.0 * i as f64)
    }

    #[test]
    fn record_size_matches_c_layout() {
        // 19 + 5 padding + 400 + 1900 + 4 padding
        assert_eq!(core::mem::size_of::<ReferenceCalibrationMatrix>(), 2328);
    }

    #[test]
    fn valid_matrix() {
        let matrix = ReferenceCalibrationMatrix::new(
            widths(),
            wavelengths(),
            [[1000; REF_CAL_INTERP_WAVELENGTH]; REF_CAL_INTERP_WIDTH],
        )
        .unwrap();
        assert_eq!(matrix.width_range(), (2, 38));
        assert_eq!(matrix.width_index(6), Some(2));
        assert_eq!(matrix.width_index(7), None);
    }

    #[test]
    fn non_monotonic_widths_rejected() {
        let mut w = widths();
        w.swap(3, 4);
        let result = ReferenceCalibrationMatrix::new(
            w,
            wavelengths(),
            [[0; REF_CAL_INTERP_WAVELENGTH]; REF_CAL_INTERP_WIDTH],
        );
        assert!(matches!(result, Err(CalError::InvalidInput { .. })));
    }

    #[test]
    fn repeated_wavelength_rejected() {
        let mut nm = wavelengths();
        nm[10] = nm[9];
        let result = ReferenceCalibrationMatrix::new(
            widths(),
            nm,
            [[0; REF_CAL_INTERP_WAVELENGTH]; REF_CAL_INTERP_WIDTH],
        );
        assert!(matches!(result, Err(CalError::InvalidInput { .. })));
    }

    #[test]
    fn grid_dimension_mismatch_rejected() {
        let row = [0u16; REF_CAL_INTERP_WAVELENGTH];
        let short_row = [0u16; REF_CAL_INTERP_WAVELENGTH - 1];

        let mut rows: [&[u16]; REF_CAL_INTERP_WIDTH] = [&row[..]; REF_CAL_INTERP_WIDTH];
        rows[7] = &short_row[..];
        let result = ReferenceCalibrationMatrix::from_slices(&widths(), &wavelengths(), &rows);
        assert!(matches!(result, Err(CalError::InvalidInput { .. })));

        let rows: [&[u16]; REF_CAL_INTERP_WIDTH - 1] = [&row[..]; REF_CAL_INTERP_WIDTH - 1];
        let result = ReferenceCalibrationMatrix::from_slices(&widths(), &wavelengths(), &rows);
        assert!(matches!(result, Err(CalError::InvalidInput { .. })));

        let result = ReferenceCalibrationMatrix::from_slices(&widths()[..18], &wavelengths(), &rows);
        assert!(matches!(result, Err(CalError::InvalidInput { .. })));
    }
}
