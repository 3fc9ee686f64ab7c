//! Constants for SpectraCal Core
//!
//! Every fixed dimension and numeric default lives here with its unit.
//! Record layouts depend on the calibration dimensions, so changing any of
//! them changes the stored format of every unit calibrated afterwards.
//!
//! ## Organization
//!
//! - **Calibration**: record dimensions fixed at factory calibration
//! - **Instrument**: optical-engine geometry and solver limits

/// Record dimensions shared by the calibration model and its serialized form.
pub mod calibration;

/// Instrument geometry, recognized pattern widths and solver limits.
pub mod instrument;

pub use calibration::{
    ADC_DATA_LEN, CONFIG_NAME_LEN, NUM_POL_COEFF, REF_CAL_INTERP_WAVELENGTH,
    REF_CAL_INTERP_WIDTH, SCAN_NAME_LEN, SERIAL_NUMBER_LEN, TIMESTAMP_LEN,
};

pub use instrument::{
    DEFAULT_MAX_PATTERN_WIDTH_PX, DEFAULT_MIN_PATTERN_WIDTH_PX, DMD_COLUMNS, DMD_ROWS,
};
