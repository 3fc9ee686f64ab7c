//! Shared fixtures for codec integration tests

#![allow(dead_code)]

use proptest::prelude::*;

use spectracal_core::{
    constants::{ADC_DATA_LEN, REF_CAL_INTERP_WAVELENGTH, REF_CAL_INTERP_WIDTH},
    CalibrationCoefficients, ReferenceCalibrationMatrix, ScanConfig, ScanData, ScanTimestamp,
    ScanType,
};

/// Factory-like coefficient set
pub fn factory_coefficients() -> CalibrationCoefficients {
    CalibrationCoefficients::new([-3.5, 0.018, -1.2e-5], [901.2, 0.981, -1.48e-4])
}

/// Reference matrix over even widths 2..=38 px and 900..1684 nm
pub fn factory_matrix() -> ReferenceCalibrationMatrix {
    let widths: [u8; REF_CAL_INTERP_WIDTH] = core::array::from_fn(|i| 2 + 2 * i as u8);
    let nm = core::array::from_fn(|i| 900.0 + 16.0 * i as f64);
    let grid = core::array::from_fn(|k| {
        core::array::from_fn(|j| (300 * (k + 1) + 7 * j) as u16)
    });
    ReferenceCalibrationMatrix::new(widths, nm, grid).unwrap()
}

/// Column scan as shipped in the default configuration slot
pub fn column_config() -> ScanConfig {
    ScanConfig::column(900, 1700, 6, 228)
        .with_name("Column 1")
        .with_serial("NS000042")
}

/// Scan of `column_config` with a ramp of samples
pub fn column_scan(samples: usize) -> ScanData {
    let mut scan = ScanData::new(column_config()).with_name("wheat flour");
    scan.timestamp = ScanTimestamp {
        year: 26,
        month: 10,
        day: 18,
        day_of_week: 0,
        hour: 14,
        minute: 2,
        second: 59,
    };
    scan.detector_temp_hundredths = 3125;
    scan.humidity_hundredths = 4010;
    scan.lamp_pd = 2150;
    scan.pga_gain = 64;
    let ramp: Vec<i32> = (0..samples as i32).map(|i| 1000 * i - 50_000).collect();
    scan.set_samples(&ramp).unwrap();
    scan
}

/// Any finite f64, including subnormals and signed zero
pub fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

/// Any finite coefficient set
pub fn arb_coefficients() -> impl Strategy<Value = CalibrationCoefficients> {
    (
        prop::array::uniform3(finite_f64()),
        prop::array::uniform3(finite_f64()),
    )
        .prop_map(|(shift, px)| CalibrationCoefficients::new(shift, px))
}

/// Any valid reference matrix
pub fn arb_matrix() -> impl Strategy<Value = ReferenceCalibrationMatrix> {
    (
        prop::array::uniform19(1u8..=10),
        800.0f64..1000.0,
        0.5f64..20.0,
        prop::collection::vec(any::<u16>(), REF_CAL_INTERP_WIDTH * REF_CAL_INTERP_WAVELENGTH),
    )
        .prop_map(|(steps, start, step, flat)| {
            let mut widths = [0u8; REF_CAL_INTERP_WIDTH];
            let mut w = 0u8;
            for (dst, s) in widths.iter_mut().zip(steps) {
                w += s;
                *dst = w;
            }
            let nm = core::array::from_fn(|i| start + step * i as f64);
            let grid = core::array::from_fn(|k| {
                core::array::from_fn(|j| flat[k * REF_CAL_INTERP_WAVELENGTH + j])
            });
            ReferenceCalibrationMatrix::new(widths, nm, grid).unwrap()
        })
}

/// Any valid scan configuration
pub fn arb_config() -> impl Strategy<Value = ScanConfig> {
    (
        prop_oneof![Just(ScanType::Column), Just(ScanType::Hadamard), Just(ScanType::Slew)],
        any::<u16>(),
        prop::array::uniform8(any::<u8>()),
        0u16..2000,
        1u16..500,
        1u8..=80,
        1u16..=624,
        1u16..=100,
    )
        .prop_map(|(scan_type, index, serial, start, span, width, patterns, repeats)| {
            let mut cfg = ScanConfig::column(start, start + span, width, patterns);
            cfg.scan_type = scan_type;
            cfg.config_index = index;
            cfg.serial_number = serial;
            cfg.num_repeats = repeats;
            cfg
        })
}

/// Any valid scan
pub fn arb_scan() -> impl Strategy<Value = ScanData> {
    (
        arb_config(),
        any::<i16>(),
        any::<u16>(),
        any::<u8>(),
        prop::collection::vec(any::<i32>(), 0..=ADC_DATA_LEN),
    )
        .prop_map(|(config, temp, lamp, gain, samples)| {
            let mut scan = ScanData::new(config).with_name("prop");
            scan.detector_temp_hundredths = temp;
            scan.lamp_pd = lamp;
            scan.pga_gain = gain;
            scan.set_samples(&samples).unwrap();
            scan
        })
}
