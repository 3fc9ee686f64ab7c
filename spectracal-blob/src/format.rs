//! Format Descriptors
//!
//! A descriptor is a short token string stored in every image header. Each
//! token names one structural field in payload order:
//!
//! | Token | Field |
//! |-------|-------|
//! | `c` | u8 |
//! | `j` | i16 |
//! | `v` | u16 |
//! | `i` | i32 |
//! | `f` | f64 |
//! | `X#` | array of `X`, extent stored in the header |
//! | `X##` | 2-D array of `X`, rows and columns stored in the header |
//!
//! Descriptors are metadata. Encoding and decoding are explicit per record
//! type; the descriptor only determines the header text, how many extents
//! follow it, and how many payload bytes those extents imply.

use spectracal_core::{CalError, CalResult};

/// Primitive element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// `c`
    U8,
    /// `j`
    I16,
    /// `v`
    U16,
    /// `i`
    I32,
    /// `f`
    F64,
}

impl Element {
    fn from_char(c: u8) -> Option<Self> {
        match c {
            b'c' => Some(Self::U8),
            b'j' => Some(Self::I16),
            b'v' => Some(Self::U16),
            b'i' => Some(Self::I32),
            b'f' => Some(Self::F64),
            _ => None,
        }
    }

    /// Encoded width in bytes
    pub const fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 => 4,
            Self::F64 => 8,
        }
    }
}

/// One structural field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Single element
    Scalar(Element),
    /// Counted array
    Array(Element),
    /// Counted 2-D array, row-major
    Grid(Element),
}

impl Token {
    /// Number of header extents the token consumes
    pub const fn extents(self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Array(_) => 1,
            Self::Grid(_) => 2,
        }
    }
}

/// Token string describing one record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor(&'static str);

impl FormatDescriptor {
    /// Calibration coefficients: shift vector, pixel-to-wavelength
    pub const CALIBRATION: Self = Self("f#f#");

    /// Reference matrix: widths, wavelengths, intensity grid
    pub const REFERENCE_MATRIX: Self = Self("c#f#v##");

    /// Scan configuration
    pub const CONFIG: Self = Self("cvc#c#vvcvv");

    /// Scan data: name, timestamp, environment, gain, inline config, samples
    pub const SCAN_DATA: Self = Self("c#c#jvvccvc#c#vvcvvi#");

    /// Header text
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Tokens in payload order
    pub fn tokens(&self) -> Tokens<'static> {
        Tokens::new(self.0.as_bytes())
    }

    /// Number of extents stored in the header
    pub fn extent_count(&self) -> usize {
        self.0.bytes().filter(|&b| b == b'#').count()
    }

    /// Payload bytes implied by `extents`
    pub fn payload_size(&self, extents: &[u32]) -> CalResult<usize> {
        payload_size(self.0.as_bytes(), extents)
    }
}

/// Payload bytes a format string implies for the given extents.
///
/// Fails when the string is not a token sequence or the extent count does not
/// match its `#` markers.
pub fn payload_size(format: &[u8], extents: &[u32]) -> CalResult<usize> {
    let mut remaining = extents;
    let mut size = 0usize;

    for token in Tokens::new(format) {
        let token = token?;
        let (dims, rest) = split_extents(remaining, token.extents())?;
        remaining = rest;

        let (count, element) = match token {
            Token::Scalar(e) => (1usize, e),
            Token::Array(e) => (dims[0] as usize, e),
            Token::Grid(e) => ((dims[0] as usize).saturating_mul(dims[1] as usize), e),
        };
        size = size.saturating_add(count.saturating_mul(element.width()));
    }

    if !remaining.is_empty() {
        return Err(CalError::Fail {
            reason: "more extents than format markers",
        });
    }
    Ok(size)
}

fn split_extents(extents: &[u32], n: usize) -> CalResult<(&[u32], &[u32])> {
    if extents.len() < n {
        return Err(CalError::Fail {
            reason: "fewer extents than format markers",
        });
    }
    Ok(extents.split_at(n))
}

/// Iterator over the tokens of a format string
pub struct Tokens<'a> {
    format: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(format: &'a [u8]) -> Self {
        Self { format, pos: 0 }
    }
}

impl Iterator for Tokens<'_> {
    type Item = CalResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let &c = self.format.get(self.pos)?;
        self.pos += 1;

        let Some(element) = Element::from_char(c) else {
            // Stop after the first bad token
            self.pos = self.format.len();
            return Some(Err(CalError::Fail {
                reason: "unknown format token",
            }));
        };

        let mut marks = 0;
        while marks < 2 && self.format.get(self.pos) == Some(&b'#') {
            marks += 1;
            self.pos += 1;
        }

        Some(Ok(match marks {
            0 => Token::Scalar(element),
            1 => Token::Array(element),
            _ => Token::Grid(element),
        }))
    }
}
