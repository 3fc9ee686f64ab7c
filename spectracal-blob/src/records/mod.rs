//! Explicit encode/decode pairs, one per library record type
//!
//! Each pair writes and reads fields in descriptor order. Adding a field means
//! a new descriptor; old images keep decoding through the old one.

pub mod calibration;
pub mod config;
pub mod reference;
pub mod scan;

use spectracal_core::{CalError, CalResult};

use crate::{
    format::FormatDescriptor,
    image::{self, ByteWriter},
};

/// Check `out` can hold the image, write its header and hand back a writer
/// positioned at the payload together with the image length
fn begin<'a>(
    out: &'a mut [u8],
    format: &FormatDescriptor,
    extents: &[u32],
) -> CalResult<(ByteWriter<'a>, usize)> {
    let len = image::image_len(format, extents)?;
    if out.len() < len {
        return Err(CalError::InsufficientMemory {
            required: len,
            available: out.len(),
        });
    }

    let mut w = ByteWriter::new(out);
    image::write_header(&mut w, format, extents, len)?;
    Ok((w, len))
}

/// Payload must end exactly where the header said it would
fn finish(written: usize, len: usize) -> CalResult<usize> {
    if written != len {
        return Err(CalError::Fail {
            reason: "encoded length disagrees with descriptor",
        });
    }
    Ok(len)
}
