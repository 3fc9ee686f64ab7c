//! Shared fixtures for integration tests
//!
//! Calibration records shaped like real factory output: a near-linear NIR
//! wavelength polynomial, a gentle slit-rotation shift polynomial, and a
//! reference matrix whose intensity rises with pattern width and follows a
//! lamp-like curve across wavelength.

#![allow(dead_code)]

use proptest::prelude::*;

use spectracal_core::{
    constants::{REF_CAL_INTERP_WAVELENGTH, REF_CAL_INTERP_WIDTH},
    CalibrationCoefficients, ReferenceCalibrationMatrix,
};

/// Calibrated widths 2, 4, ..., 38 px
pub fn even_widths() -> [u8; REF_CAL_INTERP_WIDTH] {
    core::array::from_fn(|i| 2 + 2 * i as u8)
}

/// Tested wavelengths 900 nm .. 1684 nm in 16 nm steps
pub fn nir_wavelengths() -> [f64; REF_CAL_INTERP_WAVELENGTH] {
    core::array::from_fn(|i| 900.0 + 16.0 * i as f64)
}

/// Factory-like coefficient set
pub fn factory_coefficients() -> CalibrationCoefficients {
    CalibrationCoefficients::new([-3.5, 0.018, -1.2e-5], [901.2, 0.981, -1.48e-4])
}

/// Reference matrix with a lamp-shaped curve scaled by pattern width
pub fn factory_matrix() -> ReferenceCalibrationMatrix {
    let widths = even_widths();
    let grid = core::array::from_fn(|k| {
        core::array::from_fn(|j| {
            let lamp = 1.0 - ((j as f64 - 20.0) / 30.0).powi(2);
            let counts = 400.0 * f64::from(widths[k]) * lamp.max(0.05);
            counts as u16
        })
    });
    ReferenceCalibrationMatrix::new(widths, nir_wavelengths(), grid).unwrap()
}

/// Strictly increasing width axis with random spacing
pub fn arb_widths() -> impl Strategy<Value = [u8; REF_CAL_INTERP_WIDTH]> {
    prop::array::uniform19(1u8..=10).prop_map(|steps| {
        let mut widths = [0u8; REF_CAL_INTERP_WIDTH];
        let mut w = 0u8;
        for (dst, step) in widths.iter_mut().zip(steps) {
            w += step;
            *dst = w;
        }
        widths
    })
}

/// Any valid reference matrix
pub fn arb_matrix() -> impl Strategy<Value = ReferenceCalibrationMatrix> {
    (
        arb_widths(),
        800.0f64..1000.0,
        0.5f64..20.0,
        prop::collection::vec(any::<u16>(), REF_CAL_INTERP_WIDTH * REF_CAL_INTERP_WAVELENGTH),
    )
        .prop_map(|(widths, start, step, flat)| {
            let nm = core::array::from_fn(|i| start + step * i as f64);
            let grid = core::array::from_fn(|k| {
                core::array::from_fn(|j| flat[k * REF_CAL_INTERP_WAVELENGTH + j])
            });
            ReferenceCalibrationMatrix::new(widths, nm, grid).unwrap()
        })
}

/// Any finite coefficient set
pub fn arb_coefficients() -> impl Strategy<Value = CalibrationCoefficients> {
    (
        prop::array::uniform3(-1e3f64..1e3),
        prop::array::uniform3(-1e3f64..1e3),
    )
        .prop_map(|(shift, px)| CalibrationCoefficients::new(shift, px))
}
