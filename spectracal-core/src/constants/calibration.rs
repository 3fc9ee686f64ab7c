//! Calibration Record Dimensions
//!
//! These sizes are part of the stored format. A unit calibrated with one set
//! of dimensions can only be read back by firmware built with the same set.

/// Number of polynomial coefficients in both the pixel-to-wavelength and the
/// shift-vector polynomial (constant, linear and quadratic term).
///
/// Both polynomials share this arity; a coefficient set of any other length is
/// rejected.
pub const NUM_POL_COEFF: usize = 3;

/// Number of tested pattern widths in the reference calibration matrix.
pub const REF_CAL_INTERP_WIDTH: usize = 19;

/// Number of tested wavelengths in the reference calibration matrix.
pub const REF_CAL_INTERP_WAVELENGTH: usize = 50;

/// Maximum number of ADC samples in one scan.
///
/// Sized for the longest Hadamard sequence the optical engine can project
/// (624 patterns) plus black/reference patterns and repeats margin.
pub const ADC_DATA_LEN: usize = 864;

/// Bytes reserved for a scan name, NUL padded.
pub const SCAN_NAME_LEN: usize = 20;

/// Bytes reserved for a serial number, NUL padded.
pub const SERIAL_NUMBER_LEN: usize = 8;

/// Bytes reserved for a scan configuration name, NUL padded.
pub const CONFIG_NAME_LEN: usize = 40;

/// Bytes in a packed scan timestamp:
/// year since 2000, month, day, day of week, hour, minute, second.
pub const TIMESTAMP_LEN: usize = 7;
