use crate::error::{DocumentError, SlotError};
use std::path::Path;

/// One raster image embedded in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Container-internal name of the part holding the bytes
    pub part_name: String,
    /// Encoded image bytes (PNG, JPEG, ...)
    pub bytes: Vec<u8>,
}

impl EmbeddedImage {
    pub fn new(part_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            part_name: part_name.into(),
            bytes,
        }
    }
}

/// Trait for documents that carry replaceable embedded images
pub trait ImageContainer {
    /// File the container was read from, if any
    fn source_path(&self) -> Option<&Path>;

    /// Extension used when naming the output file (without the dot)
    fn extension(&self) -> &str;

    /// Embedded images in document order
    fn images(&self) -> &[EmbeddedImage];

    /// Swap the bytes behind one image slot
    fn replace_image(&mut self, slot: usize, bytes: Vec<u8>) -> Result<(), SlotError>;

    /// Persist the container, including replaced images, to `path`
    fn save_to(&self, path: &Path) -> Result<(), DocumentError>;
}
