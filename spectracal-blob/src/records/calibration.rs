//! Calibration coefficient images (`f#f#`)

use spectracal_core::{
    constants::NUM_POL_COEFF, CalError, CalResult, CalibrationCoefficients, Validate,
};

use crate::{format::FormatDescriptor, image};

/// Layout descriptor
pub const FORMAT: FormatDescriptor = FormatDescriptor::CALIBRATION;

const EXTENTS: [u32; 2] = [NUM_POL_COEFF as u32, NUM_POL_COEFF as u32];

/// Image size in bytes
pub fn encoded_len() -> CalResult<usize> {
    image::image_len(&FORMAT, &EXTENTS)
}

/// Write `coeffs` into `out`, returning the image length
pub fn encode(coeffs: &CalibrationCoefficients, out: &mut [u8]) -> CalResult<usize> {
    coeffs.validate()?;
    let (mut w, len) = super::begin(out, &FORMAT, &EXTENTS)?;

    for &c in &coeffs.shift_vector {
        w.put_f64(c)?;
    }
    for &c in &coeffs.pixel_to_wavelength {
        w.put_f64(c)?;
    }
    super::finish(w.position(), len)
}

/// Read coefficients back from an image
pub fn decode(image: &[u8]) -> CalResult<CalibrationCoefficients> {
    let header = image::read_header(image, &FORMAT)?;
    if header.extents[..] != EXTENTS {
        return Err(CalError::InvalidInput {
            reason: "calibration coefficient count",
        });
    }

    let mut r = header.payload;
    let mut coeffs = CalibrationCoefficients::default();
    for c in coeffs.shift_vector.iter_mut() {
        *c = r.f64()?;
    }
    for c in coeffs.pixel_to_wavelength.iter_mut() {
        *c = r.f64()?;
    }
    coeffs.validate()?;
    Ok(coeffs)
}
