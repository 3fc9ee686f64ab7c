//! Tagged binary images of SpectraCal records
//!
//! Calibration coefficients, reference matrices, scan configurations and raw
//! scans are stored on the instrument as compact self-describing images. Each
//! image carries a header naming its field layout, so a reader rejects an
//! image whose layout it does not expect instead of misreading it.
//!
//! ```
//! use spectracal_blob::{BlobCodec, BlobType, Decoded, Record};
//! use spectracal_core::CalibrationCoefficients;
//!
//! let coeffs = CalibrationCoefficients::new([0.0, 0.01, 0.0], [900.0, 0.98, -1.5e-4]);
//! let codec = BlobCodec::new();
//!
//! let mut buf = [0u8; 128];
//! let blob = codec.encode(BlobType::Calibration, Some(Record::Calibration(&coeffs)), &mut buf)?;
//! let (tag, record) = codec.decode(&blob)?;
//!
//! assert_eq!(tag, BlobType::Calibration);
//! assert_eq!(record, Decoded::Calibration(coeffs));
//! # Ok::<(), spectracal_core::CalError>(())
//! ```
//!
//! Tags 128-255 belong to vendors. Register them on the codec and their bytes
//! are stored and returned untouched.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod blob;
pub mod codec;
pub mod constants;
pub mod format;
pub mod image;
pub mod records;
pub mod registry;
pub mod tag;

pub use blob::Blob;
#[cfg(feature = "std")]
pub use blob::OwnedBlob;
pub use codec::{BlobCodec, Decoded, Record};
pub use format::FormatDescriptor;
pub use registry::{VendorEntry, VendorRegistry};
pub use tag::{BlobType, VendorTag};
