use super::codec;
use super::container::{EmbeddedImage, ImageContainer};
use super::docx::DocxContainer;
use super::visits::VisitLog;
use crate::error::{DocumentError, SlotError};
use image::RgbImage;
use region_recolor::Recolorer;
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback stem when the container has no source path
const UNNAMED_STEM: &str = "document";

/// Outcome of pushing processed files back into the container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated: usize,
    pub attempted: usize,
}

/// Ordered access to a container's image slots
///
/// Slots are identified by their 0-based position in document order. The
/// relevant subset is always a subsequence of that order.
pub struct DocumentBridge {
    container: Box<dyn ImageContainer>,
    relevant: Vec<usize>,
    visits: VisitLog,
}

impl DocumentBridge {
    /// Wrap a container. Fails when it holds no images.
    pub fn open(container: Box<dyn ImageContainer>) -> Result<Self, DocumentError> {
        if container.images().is_empty() {
            return Err(DocumentError::NoImages);
        }
        tracing::info!(images = container.images().len(), "Opened document");
        Ok(Self {
            container,
            relevant: Vec::new(),
            visits: VisitLog::new(),
        })
    }

    /// Open a DOCX file
    pub fn open_docx(path: &Path) -> Result<Self, DocumentError> {
        Self::open(Box::new(DocxContainer::open(path)?))
    }

    pub fn slot_count(&self) -> usize {
        self.container.images().len()
    }

    pub fn slot(&self, slot: usize) -> Option<&EmbeddedImage> {
        self.container.images().get(slot)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.container.source_path()
    }

    /// Decode one slot to RGB
    pub fn decode(&self, slot: usize) -> Result<RgbImage, SlotError> {
        let image = self.slot(slot).ok_or_else(|| SlotError::Decode {
            slot,
            reason: "no such slot".to_string(),
        })?;
        codec::decode(slot, &image.bytes)
    }

    /// Slots that decode, in document order
    pub fn decodable(&self) -> Vec<usize> {
        (0..self.slot_count())
            .filter(|&slot| self.decode(slot).is_ok())
            .collect()
    }

    /// Recompute the slots containing at least one target pixel
    ///
    /// Slots that fail to decode are skipped with a warning.
    pub fn filter_relevant(&mut self, recolorer: &Recolorer) -> &[usize] {
        let mut relevant = Vec::new();
        for slot in 0..self.slot_count() {
            match self.decode(slot) {
                Ok(image) => {
                    if recolorer.is_relevant(&image) {
                        relevant.push(slot);
                    }
                }
                Err(e) => tracing::warn!(slot, error = %e, "Skipping undecodable image"),
            }
        }
        tracing::info!(
            relevant = relevant.len(),
            total = self.slot_count(),
            "Scanned document for target colors"
        );
        self.relevant = relevant;
        &self.relevant
    }

    pub fn relevant(&self) -> &[usize] {
        &self.relevant
    }

    pub fn visits(&self) -> &VisitLog {
        &self.visits
    }

    pub fn visits_mut(&mut self) -> &mut VisitLog {
        &mut self.visits
    }

    /// Replace the bytes behind one slot
    pub fn replace_slot(&mut self, slot: usize, bytes: Vec<u8>) -> Result<(), SlotError> {
        self.container.replace_image(slot, bytes)?;
        tracing::debug!(slot, "Replaced image in document");
        Ok(())
    }

    /// Push every visit's processed file back into the container
    ///
    /// Failures are logged and counted; they never stop the batch.
    pub fn apply_processed(&mut self) -> UpdateSummary {
        let updates: Vec<(usize, PathBuf)> = self
            .visits
            .iter()
            .map(|v| (v.slot, v.processed.clone()))
            .collect();

        let mut summary = UpdateSummary {
            updated: 0,
            attempted: updates.len(),
        };
        for (slot, path) in updates {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(slot, path = %path.display(), error = %e, "Processed image unreadable");
                    continue;
                }
            };
            match self.replace_slot(slot, bytes) {
                Ok(()) => summary.updated += 1,
                Err(e) => tracing::warn!(slot, error = %e, "Image update skipped"),
            }
        }
        tracing::info!(
            updated = summary.updated,
            attempted = summary.attempted,
            "Updated images in document"
        );
        summary
    }

    /// `<stem>_processed.<ext>` next to the source
    pub fn output_path(&self) -> PathBuf {
        let ext = self.container.extension();
        match self.container.source_path() {
            Some(source) => {
                let stem = source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| UNNAMED_STEM.to_string());
                source.with_file_name(format!("{stem}_processed.{ext}"))
            }
            None => PathBuf::from(format!("{UNNAMED_STEM}_processed.{ext}")),
        }
    }

    /// Save to [`output_path`](Self::output_path)
    pub fn save(&self) -> Result<PathBuf, DocumentError> {
        let path = self.output_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), DocumentError> {
        self.container.save_to(path)?;
        tracing::info!(path = %path.display(), "Saved document");
        Ok(())
    }
}
