use super::container::{EmbeddedImage, ImageContainer};
use crate::error::{DocumentError, SlotError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A container snapshot taken by [`InMemoryContainer::save_to`]
#[derive(Debug, Clone)]
pub struct SavedCopy {
    pub path: PathBuf,
    pub images: Vec<EmbeddedImage>,
}

/// In-memory image container
///
/// Saves are recorded rather than written. Keep a handle from
/// [`saves`](Self::saves) to inspect them after the container has been
/// handed to a session.
pub struct InMemoryContainer {
    source: Option<PathBuf>,
    images: Vec<EmbeddedImage>,
    detached: HashSet<usize>,
    fail_saves: bool,
    saves: Arc<Mutex<Vec<SavedCopy>>>,
}

impl InMemoryContainer {
    pub fn new(images: Vec<EmbeddedImage>) -> Self {
        Self {
            source: None,
            images,
            detached: HashSet::new(),
            fail_saves: false,
            saves: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pretend the container was read from `path`
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Make `slot` unreplaceable, as if its relationship were gone
    pub fn detach(mut self, slot: usize) -> Self {
        self.detached.insert(slot);
        self
    }

    /// Make every save fail
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn saves(&self) -> Arc<Mutex<Vec<SavedCopy>>> {
        Arc::clone(&self.saves)
    }
}

impl ImageContainer for InMemoryContainer {
    fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn extension(&self) -> &str {
        "docx"
    }

    fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    fn replace_image(&mut self, slot: usize, bytes: Vec<u8>) -> Result<(), SlotError> {
        if self.detached.contains(&slot) {
            return Err(SlotError::RelationshipNotFound { slot });
        }
        let image = self
            .images
            .get_mut(slot)
            .ok_or(SlotError::RelationshipNotFound { slot })?;
        image.bytes = bytes;
        Ok(())
    }

    fn save_to(&self, path: &Path) -> Result<(), DocumentError> {
        let save_error = |reason: &str| DocumentError::Save {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        if self.fail_saves {
            return Err(save_error("save disabled"));
        }
        let mut saves = self.saves.lock().map_err(|_| save_error("lock poisoned"))?;
        saves.push(SavedCopy {
            path: path.to_path_buf(),
            images: self.images.clone(),
        });
        Ok(())
    }
}
