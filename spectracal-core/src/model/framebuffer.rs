//! Frame buffer descriptor
//!
//! Describes the multi-buffer pattern store the display path fills with DMD
//! patterns. The engine never owns or writes the memory; it only reads the
//! geometry to decide whether a scan configuration fits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multi-frame pattern store geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameBufferDescriptor {
    /// Start of frame buffer memory, opaque to the engine
    pub address: usize,
    /// Number of consecutive buffers available to be filled with patterns
    pub num_buffers: u32,
    /// Horizontal pixels in frame memory
    pub width: u32,
    /// Vertical pixels in frame memory
    pub height: u32,
    /// Bits per pixel
    pub bits_per_pixel: u32,
}

impl FrameBufferDescriptor {
    /// Number of binary patterns the store can hold.
    ///
    /// Each bit plane of each buffer carries one pattern.
    pub fn pattern_capacity(&self) -> u32 {
        self.num_buffers.saturating_mul(self.bits_per_pixel)
    }

    /// Size of one buffer in bytes
    pub fn buffer_bytes(&self) -> usize {
        let bits = self.width as usize * self.height as usize * self.bits_per_pixel as usize;
        bits.div_ceil(8)
    }
}
