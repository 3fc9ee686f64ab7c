//! Instrument Geometry and Solver Limits
//!
//! Values for the NIR optical engine: a DMD that projects column patterns onto
//! a single-element detector. One DMD column corresponds to one "pixel" of the
//! pixel-to-wavelength polynomial; DMD rows are the axis the shift-vector
//! polynomial bends patterns along.

// ===== DMD GEOMETRY =====

/// Columns on the DMD. Pixel indices of the wavelength polynomial run over
/// `0..DMD_COLUMNS`.
pub const DMD_COLUMNS: usize = 854;

/// Rows on the DMD. The shift vector holds one column offset per row.
pub const DMD_ROWS: usize = 480;

// ===== PATTERN WIDTHS =====

/// Narrowest pattern width the instrument class accepts, in DMD columns.
///
/// A width of zero would project no light at all.
pub const DEFAULT_MIN_PATTERN_WIDTH_PX: u8 = 1;

/// Widest pattern width the instrument class accepts, in DMD columns.
///
/// Wider patterns blur spectral resolution beyond the slit function the
/// reference matrix was characterized for.
pub const DEFAULT_MAX_PATTERN_WIDTH_PX: u8 = 80;

// ===== INVERSE MAPPING =====

/// Iteration cap for the wavelength-to-pixel solver.
///
/// Calibration polynomials are near-linear, so Newton steps converge in
/// three or four iterations; the cap bounds runtime when they do not.
pub const INVERSE_MAX_ITERATIONS: usize = 32;

/// Convergence tolerance for the wavelength-to-pixel solver, in pixels.
pub const INVERSE_TOLERANCE_PX: f64 = 1e-9;
