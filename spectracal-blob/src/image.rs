//! Image header and byte cursors
//!
//! Every library image starts with the same header. All multi-byte values are
//! little-endian; images written by big-endian producers are not accepted.
//!
//! ```text
//! offset  size  field
//! 0       3     magic "tpl"
//! 3       1     flags
//! 4       4     total image size (u32)
//! 8       n+1   format string, NUL terminated
//! ...     4*k   one u32 extent per '#' in the format string
//! ...           payload
//! ```

use heapless::Vec;
use spectracal_core::{CalError, CalResult};

use crate::{
    constants::{FLAG_BIG_ENDIAN, IMAGE_MAGIC, MAX_EXTENTS},
    format::{self, FormatDescriptor},
};

/// Header bytes for a descriptor: fixed prefix, NUL-terminated format string
/// and its extents
pub fn header_len(format: &FormatDescriptor) -> usize {
    IMAGE_MAGIC.len() + 1 + 4 + format.as_str().len() + 1 + 4 * format.extent_count()
}

/// Whole image size for a descriptor and its extents
pub fn image_len(format: &FormatDescriptor, extents: &[u32]) -> CalResult<usize> {
    Ok(header_len(format) + format.payload_size(extents)?)
}

/// Sequential little-endian writer over a caller buffer
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Start writing at the beginning of `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Append raw bytes
    pub fn put_bytes(&mut self, bytes: &[u8]) -> CalResult<()> {
        let end = self.pos + bytes.len();
        let available = self.buf.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(CalError::InsufficientMemory {
                required: end,
                available,
            })?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Append a u8
    pub fn put_u8(&mut self, value: u8) -> CalResult<()> {
        self.put_bytes(&[value])
    }

    /// Append an i16
    pub fn put_i16(&mut self, value: i16) -> CalResult<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Append a u16
    pub fn put_u16(&mut self, value: u16) -> CalResult<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Append an i32
    pub fn put_i32(&mut self, value: i32) -> CalResult<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Append a u32
    pub fn put_u32(&mut self, value: u32) -> CalResult<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Append an f64, bit pattern preserved
    pub fn put_f64(&mut self, value: f64) -> CalResult<()> {
        self.put_bytes(&value.to_bits().to_le_bytes())
    }
}

/// Sequential little-endian reader; running past the end is a format error
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Take the next `n` bytes
    pub fn take(&mut self, n: usize) -> CalResult<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(TRUNCATED)?;
        let out = self.bytes.get(self.pos..end).ok_or(TRUNCATED)?;
        self.pos = end;
        Ok(out)
    }

    /// Take exactly `N` bytes
    pub fn array<const N: usize>(&mut self) -> CalResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a u8
    pub fn u8(&mut self) -> CalResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    /// Read an i16
    pub fn i16(&mut self) -> CalResult<i16> {
        Ok(i16::from_le_bytes(self.array()?))
    }

    /// Read a u16
    pub fn u16(&mut self) -> CalResult<u16> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    /// Read an i32
    pub fn i32(&mut self) -> CalResult<i32> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    /// Read a u32
    pub fn u32(&mut self) -> CalResult<u32> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    /// Read an f64, bit pattern preserved
    pub fn f64(&mut self) -> CalResult<f64> {
        Ok(f64::from_bits(u64::from_le_bytes(self.array()?)))
    }
}

const TRUNCATED: CalError = CalError::Fail {
    reason: "image truncated",
};

/// Write the header for `format` with the given extents and total size
pub fn write_header(
    w: &mut ByteWriter<'_>,
    format: &FormatDescriptor,
    extents: &[u32],
    total_len: usize,
) -> CalResult<()> {
    let total = u32::try_from(total_len).map_err(|_| CalError::InvalidInput {
        reason: "image larger than 4 GiB",
    })?;

    w.put_bytes(IMAGE_MAGIC)?;
    w.put_u8(0)?;
    w.put_u32(total)?;
    w.put_bytes(format.as_str().as_bytes())?;
    w.put_u8(0)?;
    for &extent in extents {
        w.put_u32(extent)?;
    }
    Ok(())
}

/// Parsed image header
#[derive(Debug)]
pub struct Header<'a> {
    /// Format string as stored, without the terminator
    pub format: &'a [u8],
    /// Extents in header order
    pub extents: Vec<u32, MAX_EXTENTS>,
    /// Reader positioned at the start of the payload
    pub payload: ByteReader<'a>,
}

impl core::fmt::Debug for ByteReader<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByteReader")
            .field("len", &self.bytes.len())
            .field("pos", &self.pos)
            .finish()
    }
}

/// Parse and check the header of `image` against the expected descriptor.
///
/// Any disagreement in magic, flags, declared size, format string or payload
/// length fails with `Fail`. Extent values are returned unchecked; each record
/// decides which extents it accepts.
pub fn read_header<'a>(image: &'a [u8], expected: &FormatDescriptor) -> CalResult<Header<'a>> {
    let mut r = ByteReader::new(image);

    if r.take(IMAGE_MAGIC.len())? != IMAGE_MAGIC {
        return Err(CalError::Fail { reason: "bad image magic" });
    }
    if r.u8()? & FLAG_BIG_ENDIAN != 0 {
        return Err(CalError::Fail {
            reason: "big-endian image",
        });
    }
    let total = r.u32()? as usize;
    if total != image.len() {
        return Err(CalError::Fail {
            reason: "declared image size mismatch",
        });
    }

    let rest = &image[r.position()..];
    let nul = rest.iter().position(|&b| b == 0).ok_or(CalError::Fail {
        reason: "unterminated format string",
    })?;
    let format = r.take(nul)?;
    r.u8()?;
    if format != expected.as_str().as_bytes() {
        return Err(CalError::Fail {
            reason: "format string mismatch",
        });
    }

    let mut extents = Vec::new();
    for _ in 0..expected.extent_count() {
        extents.push(r.u32()?).map_err(|_| CalError::Fail {
            reason: "too many extents",
        })?;
    }

    let payload = format::payload_size(format, &extents)?;
    if r.position().checked_add(payload) != Some(image.len()) {
        return Err(CalError::Fail {
            reason: "payload length mismatch",
        });
    }

    Ok(Header {
        format,
        extents,
        payload: r,
    })
}
