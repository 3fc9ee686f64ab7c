//! Vendor extension registry
//!
//! Vendors may store their own records next to library records under tags
//! 128-255. The library never looks inside them; it only needs to know a tag
//! is in use and how much storage its records may take. Decoding a vendor tag
//! nobody registered is an error rather than an empty record.

use heapless::Vec;
use spectracal_core::{CalError, CalResult};

use crate::{constants::MAX_VENDOR_TYPES, tag::VendorTag};

/// Registered vendor type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorEntry {
    /// Tag the records are stored under
    pub tag: VendorTag,
    /// Largest record the vendor will store, in bytes
    pub max_size: usize,
}

/// Fixed-capacity set of registered vendor types
#[derive(Debug, Clone, Default)]
pub struct VendorRegistry {
    entries: Vec<VendorEntry, MAX_VENDOR_TYPES>,
}

impl VendorRegistry {
    /// Empty registry
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a vendor type.
    ///
    /// Re-registering a tag replaces its size limit.
    pub fn register(&mut self, tag: VendorTag, max_size: usize) -> CalResult<()> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.tag == tag) {
            entry.max_size = max_size;
            return Ok(());
        }
        self.entries
            .push(VendorEntry { tag, max_size })
            .map_err(|_| CalError::InsufficientMemory {
                required: MAX_VENDOR_TYPES + 1,
                available: MAX_VENDOR_TYPES,
            })
    }

    /// Entry for `tag`, if registered
    pub fn get(&self, tag: VendorTag) -> Option<&VendorEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Entry for `tag`, or `InvalidInput` if nobody registered it
    pub fn require(&self, tag: VendorTag) -> CalResult<&VendorEntry> {
        self.get(tag).ok_or(CalError::InvalidInput {
            reason: "unregistered vendor tag",
        })
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no vendor type is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
