//! Tagged byte images
//!
//! A [`Blob`] borrows the buffer it was encoded into, so encoding never
//! allocates. Storage layers that keep many records in one partition wrap each
//! image in a frame so the tag travels with it:
//!
//! ```text
//! [tag u8][image length u32 LE][image]
//! ```

use spectracal_core::{CalError, CalResult};

use crate::{constants::FRAME_HEADER_LEN, image::ByteReader, tag::BlobType};

/// Tag plus encoded image, borrowing the bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob<'a> {
    tag: BlobType,
    bytes: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Pair a tag with image bytes read from storage
    pub const fn new(tag: BlobType, bytes: &'a [u8]) -> Self {
        Self { tag, bytes }
    }

    /// Record type
    pub const fn tag(&self) -> BlobType {
        self.tag
    }

    /// Encoded image
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Image length in bytes
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the image is empty
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Frame size for this blob
    pub const fn frame_len(&self) -> usize {
        FRAME_HEADER_LEN + self.bytes.len()
    }

    /// Write the storage frame into `out`, returning bytes written
    pub fn write_frame(&self, out: &mut [u8]) -> CalResult<usize> {
        let len = self.frame_len();
        let available = out.len();
        let dst = out.get_mut(..len).ok_or(CalError::InsufficientMemory {
            required: len,
            available,
        })?;

        let image_len = u32::try_from(self.bytes.len()).map_err(|_| CalError::InvalidInput {
            reason: "image larger than 4 GiB",
        })?;
        dst[0] = self.tag.as_u8();
        dst[1..FRAME_HEADER_LEN].copy_from_slice(&image_len.to_le_bytes());
        dst[FRAME_HEADER_LEN..].copy_from_slice(self.bytes);
        Ok(len)
    }

    /// Read one frame from the front of `bytes`.
    ///
    /// Returns the blob and the bytes following the frame, so a partition can
    /// be walked frame by frame.
    pub fn from_frame(bytes: &'a [u8]) -> CalResult<(Self, &'a [u8])> {
        if bytes.is_empty() {
            return Err(CalError::NullPointer { what: "frame" });
        }
        let mut r = ByteReader::new(bytes);
        let tag = BlobType::from_u8(r.u8()?)?;
        let len = r.u32()? as usize;
        let image = r.take(len)?;
        Ok((Self::new(tag, image), &bytes[r.position()..]))
    }
}

#[cfg(feature = "std")]
pub use owned::OwnedBlob;

#[cfg(feature = "std")]
mod owned {
    use super::*;

    /// Tag plus encoded image owned by the caller
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct OwnedBlob {
        tag: BlobType,
        bytes: Vec<u8>,
    }

    impl OwnedBlob {
        /// Take ownership of an encoded image
        pub fn new(tag: BlobType, bytes: Vec<u8>) -> Self {
            Self { tag, bytes }
        }

        /// Record type
        pub fn tag(&self) -> BlobType {
            self.tag
        }

        /// Borrowed view for decoding or framing
        pub fn as_blob(&self) -> Blob<'_> {
            Blob::new(self.tag, &self.bytes)
        }

        /// Give up the image bytes
        pub fn into_bytes(self) -> Vec<u8> {
            self.bytes
        }
    }

    impl From<Blob<'_>> for OwnedBlob {
        fn from(blob: Blob<'_>) -> Self {
            Self::new(blob.tag(), blob.as_bytes().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::VendorTag;

    #[test]
    fn frames_walk_in_order() {
        let a = Blob::new(BlobType::Calibration, &[1, 2, 3]);
        let b = Blob::new(BlobType::Vendor(VendorTag::new(140).unwrap()), &[9; 4]);

        let mut partition = [0u8; 32];
        let n = a.write_frame(&mut partition).unwrap();
        assert_eq!(n, 8);
        let m = b.write_frame(&mut partition[n..]).unwrap();
        assert_eq!(&partition[..5], &[2, 3, 0, 0, 0]);

        let (first, rest) = Blob::from_frame(&partition[..n + m]).unwrap();
        assert_eq!(first, a);
        let (second, rest) = Blob::from_frame(rest).unwrap();
        assert_eq!(second, b);
        assert!(rest.is_empty());
    }

    #[test]
    fn frame_errors() {
        let blob = Blob::new(BlobType::Config, &[0; 10]);
        assert_eq!(
            blob.write_frame(&mut [0u8; 8]),
            Err(CalError::InsufficientMemory { required: 15, available: 8 })
        );

        assert!(matches!(Blob::from_frame(&[]), Err(CalError::NullPointer { .. })));
        assert!(matches!(
            Blob::from_frame(&[7, 0, 0, 0, 0]),
            Err(CalError::InvalidInput { .. })
        ));
        // Declared length runs past the end
        assert!(matches!(
            Blob::from_frame(&[1, 9, 0, 0, 0, 1, 2]),
            Err(CalError::Fail { .. })
        ));
    }
}
