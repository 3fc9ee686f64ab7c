//! Image and tag-space constants
//!
//! Changing any of these breaks compatibility with images already stored on
//! calibrated units.

// ===== IMAGE HEADER =====

/// First bytes of every library image
pub const IMAGE_MAGIC: &[u8; 3] = b"tpl";

/// Header flag set by big-endian producers
pub const FLAG_BIG_ENDIAN: u8 = 1 << 0;

/// Most extents any library format stores (scan data has five)
pub const MAX_EXTENTS: usize = 8;

// ===== SIZING =====

/// Margin added to the in-memory reference matrix size when budgeting its
/// stored image. Storage partitions were laid out with this margin; the actual
/// image is smaller.
pub const REF_CAL_MATRIX_BLOB_OVERHEAD: usize = 100;

// ===== TAG SPACE =====

/// Highest tag reserved for library record types
pub const LIBRARY_TAG_MAX: u8 = 127;

/// Lowest tag available to vendor extension types
pub const VENDOR_TAG_MIN: u8 = 128;

/// Vendor extension types one codec can register
pub const MAX_VENDOR_TYPES: usize = 16;

// ===== STORAGE FRAME =====

/// Tag byte plus u32 length in front of an image
pub const FRAME_HEADER_LEN: usize = 5;
