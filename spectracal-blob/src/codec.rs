//! Blob codec
//!
//! Dispatches on the tag to the record's encode/decode pair and handles the
//! vendor pass-through. The only state is the vendor registry, fixed once the
//! codec is built.

use spectracal_core::{
    constants::ADC_DATA_LEN, CalError, CalResult, CalibrationCoefficients,
    ReferenceCalibrationMatrix, ScanConfig, ScanData,
};

use crate::{
    blob::Blob,
    records::{calibration, config, reference, scan},
    registry::VendorRegistry,
    tag::{BlobType, VendorTag},
};

/// Record to encode, borrowed from the caller
#[derive(Debug, Clone, Copy)]
pub enum Record<'r> {
    /// Raw scan data
    ScanData(&'r ScanData),
    /// Scan configuration
    Config(&'r ScanConfig),
    /// Calibration coefficients
    Calibration(&'r CalibrationCoefficients),
    /// Reference calibration matrix
    ReferenceMatrix(&'r ReferenceCalibrationMatrix),
    /// Vendor record, stored as given
    Vendor(&'r [u8]),
}

impl Record<'_> {
    #[cfg_attr(not(feature = "log"), allow(dead_code))]
    fn kind(&self) -> &'static str {
        match self {
            Self::ScanData(_) => "scan data",
            Self::Config(_) => "config",
            Self::Calibration(_) => "calibration",
            Self::ReferenceMatrix(_) => "reference matrix",
            Self::Vendor(_) => "vendor",
        }
    }
}

/// Decoded record. Vendor bytes borrow the image they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<'a> {
    /// Raw scan data
    ScanData(ScanData),
    /// Scan configuration
    Config(ScanConfig),
    /// Calibration coefficients
    Calibration(CalibrationCoefficients),
    /// Reference calibration matrix
    ReferenceMatrix(ReferenceCalibrationMatrix),
    /// Vendor record, uninterpreted
    Vendor(&'a [u8]),
}

/// Encoder/decoder for tagged record images
#[derive(Debug, Clone, Default)]
pub struct BlobCodec {
    registry: VendorRegistry,
}

impl BlobCodec {
    /// Codec that knows only the library record types
    pub const fn new() -> Self {
        Self {
            registry: VendorRegistry::new(),
        }
    }

    /// Codec with vendor types already registered
    pub const fn with_registry(registry: VendorRegistry) -> Self {
        Self { registry }
    }

    /// Register a vendor type and its largest record size
    pub fn register_vendor(mut self, tag: VendorTag, max_size: usize) -> CalResult<Self> {
        self.registry.register(tag, max_size)?;
        Ok(self)
    }

    /// Vendor registry in use
    pub fn registry(&self) -> &VendorRegistry {
        &self.registry
    }

    /// Encode `record` under `tag` into `out`.
    ///
    /// The returned blob borrows the written prefix of `out`.
    pub fn encode<'b>(
        &self,
        tag: BlobType,
        record: Option<Record<'_>>,
        out: &'b mut [u8],
    ) -> CalResult<Blob<'b>> {
        let record = record.ok_or(CalError::NullPointer { what: "record" })?;

        let len = match (tag, record) {
            (BlobType::ScanData, Record::ScanData(s)) => scan::encode(s, out)?,
            (BlobType::Config, Record::Config(c)) => config::encode(c, out)?,
            (BlobType::Calibration, Record::Calibration(c)) => calibration::encode(c, out)?,
            (BlobType::ReferenceMatrix, Record::ReferenceMatrix(m)) => reference::encode(m, out)?,
            (BlobType::Vendor(vendor), Record::Vendor(bytes)) => {
                self.copy_vendor(vendor, bytes, out)?
            }
            _ => {
                log_debug!("{} record offered under tag {}", record.kind(), tag.as_u8());
                return Err(CalError::InvalidInput {
                    reason: "record kind does not match tag",
                });
            }
        };

        let out: &'b [u8] = out;
        Ok(Blob::new(tag, &out[..len]))
    }

    fn copy_vendor(&self, tag: VendorTag, bytes: &[u8], out: &mut [u8]) -> CalResult<usize> {
        let entry = self.registry.require(tag)?;
        if bytes.is_empty() {
            return Err(CalError::NullPointer {
                what: "vendor record bytes",
            });
        }
        if bytes.len() > entry.max_size {
            return Err(CalError::InvalidInput {
                reason: "vendor record exceeds registered size",
            });
        }
        let available = out.len();
        let dst = out.get_mut(..bytes.len()).ok_or(CalError::InsufficientMemory {
            required: bytes.len(),
            available,
        })?;
        dst.copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Decode a blob back into its record
    pub fn decode<'a>(&self, blob: &Blob<'a>) -> CalResult<(BlobType, Decoded<'a>)> {
        let tag = blob.tag();
        let bytes = blob.as_bytes();

        match self.decode_inner(tag, bytes) {
            Ok(record) => Ok((tag, record)),
            Err(err) => {
                log_debug!("decode of tag {} failed: {}", tag.as_u8(), err);
                Err(err)
            }
        }
    }

    /// Decode from a raw tag byte as kept by storage
    pub fn decode_raw<'a>(&self, tag: u8, bytes: &'a [u8]) -> CalResult<(BlobType, Decoded<'a>)> {
        self.decode(&Blob::new(BlobType::from_u8(tag)?, bytes))
    }

    fn decode_inner<'a>(&self, tag: BlobType, bytes: &'a [u8]) -> CalResult<Decoded<'a>> {
        if let BlobType::Vendor(vendor) = tag {
            self.registry.require(vendor)?;
        }
        if bytes.is_empty() {
            return Err(CalError::NullPointer { what: "blob bytes" });
        }

        Ok(match tag {
            BlobType::ScanData => Decoded::ScanData(scan::decode(bytes)?),
            BlobType::Config => Decoded::Config(config::decode(bytes)?),
            BlobType::Calibration => Decoded::Calibration(calibration::decode(bytes)?),
            BlobType::ReferenceMatrix => Decoded::ReferenceMatrix(reference::decode(bytes)?),
            BlobType::Vendor(_) => Decoded::Vendor(bytes),
        })
    }

    /// Worst-case image size for `tag`.
    ///
    /// Reference matrices report their fixed storage budget; vendor tags report
    /// the registered maximum.
    pub fn size_of(&self, tag: BlobType) -> CalResult<usize> {
        match tag {
            BlobType::ScanData => scan::encoded_len(ADC_DATA_LEN),
            BlobType::Config => config::encoded_len(),
            BlobType::Calibration => calibration::encoded_len(),
            BlobType::ReferenceMatrix => Ok(reference::budget()),
            BlobType::Vendor(vendor) => Ok(self.registry.require(vendor)?.max_size),
        }
    }

    /// Encode into a freshly allocated buffer sized with [`Self::size_of`]
    #[cfg(feature = "std")]
    pub fn encode_to_vec(
        &self,
        tag: BlobType,
        record: Option<Record<'_>>,
    ) -> CalResult<crate::blob::OwnedBlob> {
        let mut buf = vec![0u8; self.size_of(tag)?];
        let len = self.encode(tag, record, &mut buf)?.len();
        buf.truncate(len);
        Ok(crate::blob::OwnedBlob::new(tag, buf))
    }
}
