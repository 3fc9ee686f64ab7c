//! Pixel-to-Wavelength and Distortion Correction
//!
//! ## Polynomials
//!
//! Both calibration polynomials are evaluated by one routine:
//!
//! ```text
//! P(x) = c[0] + c[1]·x + c[2]·x² + ...
//! ```
//!
//! The sum is accumulated in ascending power. No Horner rewrite, no fused
//! multiply-add: the floating-point operation order depends only on the
//! coefficient order, so identical inputs give bit-identical outputs on every
//! target.
//!
//! ## Coordinates
//!
//! - `pixel_to_wavelength` maps a DMD column to nm. Sub-pixel columns are legal,
//!   which downstream peak fitting relies on.
//! - `shift_correction` maps a DMD row to the column offset that compensates
//!   slit-image rotation and grating curvature at that row. Pattern generation
//!   adds the offset before lighting a column.
//!
//! ```rust
//! use spectracal_core::{transform, CalibrationCoefficients};
//!
//! let coeffs = CalibrationCoefficients::new([0.0; 3], [400.0, 0.5, 0.0]);
//! assert_eq!(transform::pixel_to_wavelength(100.0, &coeffs)?, 450.0);
//! # Ok::<(), spectracal_core::CalError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::instrument::{INVERSE_MAX_ITERATIONS, INVERSE_TOLERANCE_PX},
    errors::{CalError, CalResult},
    model::CalibrationCoefficients,
    traits::Validate,
};

/// Polynomial evaluation shared by every calibration curve
pub mod polynomial {
    /// Evaluate `coeffs` (ascending power) at `x`
    pub fn evaluate(coeffs: &[f64], x: f64) -> f64 {
        let mut sum = 0.0;
        let mut power = 1.0;
        for &c in coeffs {
            sum += c * power;
            power *= x;
        }
        sum
    }

    /// Evaluate the first derivative of `coeffs` at `x`
    pub fn derivative(coeffs: &[f64], x: f64) -> f64 {
        let mut sum = 0.0;
        let mut power = 1.0;
        for (k, &c) in coeffs.iter().enumerate().skip(1) {
            sum += k as f64 * c * power;
            power *= x;
        }
        sum
    }
}

/// One wavelength-labeled sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpectralPoint {
    /// Wavelength in nm
    pub wavelength_nm: f64,
    /// Raw or corrected intensity
    pub intensity: f64,
}

/// Wavelength in nm at a (possibly fractional) DMD column
pub fn pixel_to_wavelength(pixel: f64, coeffs: &CalibrationCoefficients) -> CalResult<f64> {
    coeffs.validate()?;
    Ok(polynomial::evaluate(&coeffs.pixel_to_wavelength, pixel))
}

/// Column offset at a DMD row that compensates geometric distortion
pub fn shift_correction(pixel: f64, coeffs: &CalibrationCoefficients) -> CalResult<f64> {
    coeffs.validate()?;
    Ok(polynomial::evaluate(&coeffs.shift_vector, pixel))
}

/// DMD column at which the wavelength polynomial reaches `wavelength_nm`.
///
/// The search is restricted to columns `[lo, hi]`, where the polynomial must be
/// monotonic. Newton steps are used while they stay inside the current
/// bracket; otherwise the bracket is bisected.
pub fn wavelength_to_pixel(
    wavelength_nm: f64,
    coeffs: &CalibrationCoefficients,
    lo: f64,
    hi: f64,
) -> CalResult<f64> {
    coeffs.validate()?;
    if !wavelength_nm.is_finite() || !(lo < hi) {
        return Err(CalError::invalid("wavelength search range"));
    }

    let p = &coeffs.pixel_to_wavelength;
    let residual = |x: f64| polynomial::evaluate(p, x) - wavelength_nm;

    let (mut a, mut b) = (lo, hi);
    let (fa, fb) = (residual(a), residual(b));
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if (fa < 0.0) == (fb < 0.0) {
        log_debug!(
            "{} nm outside calibrated range [{}, {}] nm",
            wavelength_nm,
            fa + wavelength_nm,
            fb + wavelength_nm
        );
        return Err(CalError::invalid("wavelength outside calibrated range"));
    }
    let rising = fa < 0.0;

    // Linear guess between the bracket ends
    let mut x = a + (b - a) * (-fa / (fb - fa));
    for _ in 0..INVERSE_MAX_ITERATIONS {
        let fx = residual(x);
        if fx == 0.0 {
            return Ok(x);
        }
        if (fx < 0.0) == rising {
            a = x;
        } else {
            b = x;
        }

        let slope = polynomial::derivative(p, x);
        let newton = x - fx / slope;
        let next = if slope != 0.0 && newton > a && newton < b {
            newton
        } else {
            0.5 * (a + b)
        };

        if libm::fabs(next - x) < INVERSE_TOLERANCE_PX {
            return Ok(next);
        }
        x = next;
    }

    log_debug!("wavelength_to_pixel hit iteration cap at {} nm", wavelength_nm);
    Ok(x)
}

/// Fill `out` with the wavelength of consecutive columns starting at
/// `first_pixel`
pub fn compute_wavelengths(
    coeffs: &CalibrationCoefficients,
    first_pixel: f64,
    out: &mut [f64],
) -> CalResult<()> {
    coeffs.validate()?;
    for (i, nm) in out.iter_mut().enumerate() {
        *nm = polynomial::evaluate(&coeffs.pixel_to_wavelength, first_pixel + i as f64);
    }
    Ok(())
}

/// Label raw column intensities with their wavelengths.
///
/// `raw[i]` was measured at column `first_pixel + i`. Returns the number of
/// points written.
pub fn label_spectrum<T>(
    raw: &[T],
    coeffs: &CalibrationCoefficients,
    first_pixel: f64,
    out: &mut [SpectralPoint],
) -> CalResult<usize>
where
    T: Copy + Into<f64>,
{
    coeffs.validate()?;
    if out.len() < raw.len() {
        return Err(CalError::InsufficientMemory {
            required: raw.len(),
            available: out.len(),
        });
    }

    for (i, (point, &sample)) in out.iter_mut().zip(raw).enumerate() {
        *point = SpectralPoint {
            wavelength_nm: polynomial::evaluate(&coeffs.pixel_to_wavelength, first_pixel + i as f64),
            intensity: sample.into(),
        };
    }
    Ok(raw.len())
}

/// Whole-column offset per DMD row, used to bend projected patterns.
///
/// `out[row]` is the shift correction at `row`, rounded to the nearest column.
pub fn shift_vector(coeffs: &CalibrationCoefficients, out: &mut [i32]) -> CalResult<()> {
    coeffs.validate()?;
    for (row, shift) in out.iter_mut().enumerate() {
        let offset = polynomial::evaluate(&coeffs.shift_vector, row as f64);
        *shift = libm::round(offset) as i32;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nir_coeffs() -> CalibrationCoefficients {
        // Typical NIR engine: ~900 nm at column 0, ~1700 nm at column 853
        CalibrationCoefficients::new([-4.0, 0.02, -1.5e-5], [900.0, 0.98, -1.5e-4])
    }

    #[test]
    fn degree_one_example() {
        let coeffs = CalibrationCoefficients::new([0.0; 3], [400.0, 0.5, 0.0]);
        assert_eq!(pixel_to_wavelength(100.0, &coeffs).unwrap(), 450.0);
    }

    #[test]
    fn sub_pixel_positions() {
        let coeffs = CalibrationCoefficients::new([0.0; 3], [400.0, 0.5, 0.0]);
        assert_eq!(pixel_to_wavelength(100.5, &coeffs).unwrap(), 450.25);
    }

    #[test]
    fn shift_uses_shift_coefficients() {
        let coeffs = CalibrationCoefficients::new([1.0, 0.0, 0.001], [400.0, 0.5, 0.0]);
        assert_eq!(shift_correction(100.0, &coeffs).unwrap(), 11.0);
    }

    #[test]
    fn invalid_coefficients_rejected() {
        let coeffs = CalibrationCoefficients::new([0.0; 3], [f64::INFINITY, 0.5, 0.0]);
        assert!(matches!(
            pixel_to_wavelength(1.0, &coeffs),
            Err(CalError::InvalidInput { .. })
        ));
        // The record is validated as a whole
        assert!(matches!(
            shift_correction(1.0, &coeffs),
            Err(CalError::InvalidInput { .. })
        ));

        let coeffs = CalibrationCoefficients::new([f64::NAN, 0.0, 0.0], [400.0, 0.5, 0.0]);
        assert!(matches!(
            shift_correction(1.0, &coeffs),
            Err(CalError::InvalidInput { .. })
        ));
    }

    #[test]
    fn derivative_of_quadratic() {
        assert_eq!(polynomial::derivative(&[5.0, 2.0, 3.0], 2.0), 14.0);
        assert_eq!(polynomial::derivative(&[5.0], 2.0), 0.0);
    }

    #[test]
    fn inverse_recovers_column() {
        let coeffs = nir_coeffs();
        for column in [0.0, 12.25, 400.0, 853.0] {
            let nm = pixel_to_wavelength(column, &coeffs).unwrap();
            let back = wavelength_to_pixel(nm, &coeffs, 0.0, 853.0).unwrap();
            assert!((back - column).abs() < 1e-6, "{column} -> {nm} -> {back}");
        }
    }

    #[test]
    fn inverse_outside_range() {
        let coeffs = nir_coeffs();
        assert!(matches!(
            wavelength_to_pixel(2500.0, &coeffs, 0.0, 853.0),
            Err(CalError::InvalidInput { .. })
        ));
        assert!(wavelength_to_pixel(1000.0, &coeffs, 10.0, 10.0).is_err());
    }

    #[test]
    fn labels_raw_samples() {
        let coeffs = CalibrationCoefficients::new([0.0; 3], [400.0, 0.5, 0.0]);
        let raw: [i32; 3] = [10, -20, 30];
        let mut out = [SpectralPoint::default(); 4];

        let n = label_spectrum(&raw, &coeffs, 100.0, &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out[0], SpectralPoint { wavelength_nm: 450.0, intensity: 10.0 });
        assert_eq!(out[2], SpectralPoint { wavelength_nm: 451.0, intensity: 30.0 });

        let mut short = [SpectralPoint::default(); 2];
        assert_eq!(
            label_spectrum(&raw, &coeffs, 0.0, &mut short),
            Err(CalError::InsufficientMemory { required: 3, available: 2 })
        );
    }

    #[test]
    fn wavelengths_for_consecutive_columns() {
        let coeffs = CalibrationCoefficients::new([0.0; 3], [400.0, 0.5, 0.0]);
        let mut nm = [0.0; 4];
        compute_wavelengths(&coeffs, 2.0, &mut nm).unwrap();
        assert_eq!(nm, [401.0, 401.5, 402.0, 402.5]);
    }

    #[test]
    fn shift_vector_rounds_per_row() {
        let coeffs = CalibrationCoefficients::new([0.4, 0.25, 0.0], [400.0, 0.5, 0.0]);
        let mut rows = [0i32; 5];
        shift_vector(&coeffs, &mut rows).unwrap();
        // 0.4, 0.65, 0.9, 1.15, 1.4
        assert_eq!(rows, [0, 1, 1, 1, 1]);
    }
}
