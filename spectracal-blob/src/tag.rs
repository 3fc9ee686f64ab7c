//! Blob tags
//!
//! ```text
//! 0..=3      library record types
//! 4..=127    reserved for future library types (rejected today)
//! 128..=255  vendor extension types, passed through uninterpreted
//! ```

use spectracal_core::{CalError, CalResult};

use crate::constants::{LIBRARY_TAG_MAX, VENDOR_TAG_MIN};

/// Tag in the vendor extension range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VendorTag(u8);

impl VendorTag {
    /// Wrap a raw tag, rejecting anything in the library range
    pub const fn new(raw: u8) -> CalResult<Self> {
        if raw < VENDOR_TAG_MIN {
            return Err(CalError::InvalidInput {
                reason: "vendor tags start at 128",
            });
        }
        Ok(Self(raw))
    }

    /// Raw tag byte
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Type of record a blob holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobType {
    /// Raw scan data
    ScanData,
    /// Scan configuration
    Config,
    /// Calibration coefficients
    Calibration,
    /// Reference calibration matrix
    ReferenceMatrix,
    /// Vendor extension record, opaque to the library
    Vendor(VendorTag),
}

impl BlobType {
    /// Decode a raw tag.
    ///
    /// Tags reserved for future library types are unrecognized and fail with
    /// `InvalidInput`. Whether a vendor tag is usable is decided by the codec's
    /// registry, not here.
    pub const fn from_u8(raw: u8) -> CalResult<Self> {
        match raw {
            0 => Ok(Self::ScanData),
            1 => Ok(Self::Config),
            2 => Ok(Self::Calibration),
            3 => Ok(Self::ReferenceMatrix),
            4..=LIBRARY_TAG_MAX => Err(CalError::InvalidInput {
                reason: "reserved library tag",
            }),
            _ => Ok(Self::Vendor(VendorTag(raw))),
        }
    }

    /// Raw tag byte
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::ScanData => 0,
            Self::Config => 1,
            Self::Calibration => 2,
            Self::ReferenceMatrix => 3,
            Self::Vendor(tag) => tag.0,
        }
    }
}
