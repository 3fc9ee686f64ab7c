//! Reference calibration matrix images (`c#f#v##`)

use spectracal_core::{
    constants::{REF_CAL_INTERP_WAVELENGTH, REF_CAL_INTERP_WIDTH},
    CalError, CalResult, ReferenceCalibrationMatrix, Validate,
};

use crate::{
    constants::REF_CAL_MATRIX_BLOB_OVERHEAD,
    format::FormatDescriptor,
    image,
};

/// Layout descriptor
pub const FORMAT: FormatDescriptor = FormatDescriptor::REFERENCE_MATRIX;

const EXTENTS: [u32; 4] = [
    REF_CAL_INTERP_WIDTH as u32,
    REF_CAL_INTERP_WAVELENGTH as u32,
    REF_CAL_INTERP_WIDTH as u32,
    REF_CAL_INTERP_WAVELENGTH as u32,
];

/// Storage budget for one matrix image: record size plus a fixed margin
pub const fn budget() -> usize {
    core::mem::size_of::<ReferenceCalibrationMatrix>() + REF_CAL_MATRIX_BLOB_OVERHEAD
}

/// Image size in bytes
pub fn encoded_len() -> CalResult<usize> {
    image::image_len(&FORMAT, &EXTENTS)
}

/// Write `matrix` into `out`, returning the image length
pub fn encode(matrix: &ReferenceCalibrationMatrix, out: &mut [u8]) -> CalResult<usize> {
    matrix.validate()?;
    let (mut w, len) = super::begin(out, &FORMAT, &EXTENTS)?;

    w.put_bytes(&matrix.widths)?;
    for &nm in &matrix.wavelengths {
        w.put_f64(nm)?;
    }
    for row in &matrix.intensities {
        for &value in row {
            w.put_u16(value)?;
        }
    }
    super::finish(w.position(), len)
}

/// Read a matrix back from an image
pub fn decode(image: &[u8]) -> CalResult<ReferenceCalibrationMatrix> {
    let header = image::read_header(image, &FORMAT)?;
    if header.extents[..] != EXTENTS {
        return Err(CalError::Fail {
            reason: "reference matrix dimensions",
        });
    }

    let mut r = header.payload;
    let widths = r.array::<REF_CAL_INTERP_WIDTH>()?;

    let mut wavelengths = [0.0; REF_CAL_INTERP_WAVELENGTH];
    for nm in wavelengths.iter_mut() {
        *nm = r.f64()?;
    }

    let mut intensities = [[0u16; REF_CAL_INTERP_WAVELENGTH]; REF_CAL_INTERP_WIDTH];
    for row in intensities.iter_mut() {
        for value in row.iter_mut() {
            *value = r.u16()?;
        }
    }

    ReferenceCalibrationMatrix::new(widths, wavelengths, intensities)
}
