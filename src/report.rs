//! Processing reports: comparisons, no-match export and summaries

use crate::document::codec;
use crate::document::{DocumentBridge, Visit, VisitLog};
use crate::error::SessionError;
use image::RgbImage;
use region_recolor::replace::side_by_side;
use region_recolor::Recolorer;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary of a finished session
#[derive(Debug, Clone, Serialize)]
pub struct FinishReport {
    pub output_path: PathBuf,
    pub total_images: usize,
    pub relevant_images: usize,
    pub visited: usize,
    pub processed: usize,
    pub updated: usize,
    pub attempted: usize,
    /// 1-based document positions whose pixels changed
    pub changed_positions: Vec<usize>,
    pub comparison_dir: PathBuf,
    pub unmatched_exported: usize,
    pub no_match_dir: PathBuf,
    /// No image matched and every image was shown
    pub fallback: bool,
}

impl fmt::Display for FinishReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved: {}", self.output_path.display())?;
        writeln!(f, "Images in document: {}", self.total_images)?;
        if self.fallback {
            writeln!(f, "Images with target colors: none (all images were shown)")?;
        } else {
            writeln!(f, "Images with target colors: {}", self.relevant_images)?;
        }
        writeln!(f, "Visited: {}, processed: {}", self.visited, self.processed)?;
        writeln!(f, "Updated {} of {} images", self.updated, self.attempted)?;
        if self.changed_positions.is_empty() {
            writeln!(f, "No images changed")?;
        } else {
            let positions: Vec<String> = self
                .changed_positions
                .iter()
                .map(|p| p.to_string())
                .collect();
            writeln!(
                f,
                "Changed images (document positions): {}",
                positions.join(", ")
            )?;
            writeln!(f, "Comparisons: {}", self.comparison_dir.display())?;
        }
        if self.unmatched_exported > 0 {
            write!(
                f,
                "Images without target colors: {} exported to {}",
                self.unmatched_exported,
                self.no_match_dir.display()
            )?;
        } else {
            write!(f, "Images without target colors: none exported")?;
        }
        Ok(())
    }
}

/// `comparison_{PPP}.png`, PPP the 1-based document position
pub fn comparison_file_name(slot: usize) -> String {
    format!("comparison_{:03}.png", slot + 1)
}

/// `no_color_{NNN}.png`, NNN the 1-based index among exported slots
pub fn no_match_file_name(index: usize) -> String {
    format!("no_color_{:03}.png", index + 1)
}

/// Write a side-by-side comparison for every visit whose pixels changed
///
/// Returns the 1-based document positions written. Visits whose files do
/// not decode are skipped with a warning.
pub fn write_comparisons(visits: &VisitLog, dir: &Path) -> Result<Vec<usize>, SessionError> {
    let mut written = Vec::new();

    for visit in visits.iter() {
        let (original, processed) = match load_pair(visit) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(slot = visit.slot + 1, error = %e, "Cannot compare image");
                continue;
            }
        };

        if original == processed {
            continue;
        }

        fs::create_dir_all(dir)?;
        let comparison = side_by_side(&original, &processed);
        let path = dir.join(comparison_file_name(visit.slot));
        fs::write(&path, codec::encode_png(&comparison)?)?;
        tracing::debug!(path = %path.display(), "Wrote comparison");
        written.push(visit.slot + 1);
    }

    Ok(written)
}

fn load_pair(visit: &Visit) -> Result<(RgbImage, RgbImage), SessionError> {
    let original = codec::decode(visit.slot, &fs::read(&visit.original)?)?;
    let processed = codec::decode(visit.slot, &fs::read(&visit.processed)?)?;
    Ok((original, processed))
}

/// Export the given slots as PNG for manual checking
///
/// Files are numbered by position in `slots`. Returns how many were
/// written; undecodable slots are skipped but keep their number.
pub fn export_unmatched(
    bridge: &DocumentBridge,
    slots: &[usize],
    dir: &Path,
) -> Result<usize, SessionError> {
    let mut exported = 0;
    for (index, &slot) in slots.iter().enumerate() {
        let image = match bridge.decode(slot) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(slot = slot + 1, error = %e, "Cannot export image");
                continue;
            }
        };
        fs::create_dir_all(dir)?;
        fs::write(dir.join(no_match_file_name(index)), codec::encode_png(&image)?)?;
        exported += 1;
    }
    if exported > 0 {
        tracing::info!(count = exported, dir = %dir.display(), "Exported images without target colors");
    }
    Ok(exported)
}

/// One image as seen by `scan`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotSummary {
    /// 1-based document position
    pub position: usize,
    pub part_name: String,
    pub width: u32,
    pub height: u32,
    pub target_pixels: u64,
}

/// Relevance scan of a whole document
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub total_images: usize,
    pub relevant: Vec<SlotSummary>,
    pub unmatched: Vec<SlotSummary>,
    /// 1-based positions of images that failed to decode
    pub undecodable: Vec<usize>,
}

/// Count target pixels in every slot without changing anything
pub fn scan(bridge: &DocumentBridge, recolorer: &Recolorer) -> ScanReport {
    let mut report = ScanReport {
        total_images: bridge.slot_count(),
        relevant: Vec::new(),
        unmatched: Vec::new(),
        undecodable: Vec::new(),
    };

    for slot in 0..bridge.slot_count() {
        let image = match bridge.decode(slot) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(slot = slot + 1, error = %e, "Skipping undecodable image");
                report.undecodable.push(slot + 1);
                continue;
            }
        };
        let summary = SlotSummary {
            position: slot + 1,
            part_name: bridge
                .slot(slot)
                .map(|s| s.part_name.clone())
                .unwrap_or_default(),
            width: image.width(),
            height: image.height(),
            target_pixels: recolorer.count(&image),
        };
        if recolorer.is_relevant(&image) {
            report.relevant.push(summary);
        } else {
            report.unmatched.push(summary);
        }
    }

    report
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} images, {} with target colors",
            self.total_images,
            self.relevant.len()
        )?;
        for s in &self.relevant {
            writeln!(
                f,
                "  #{:<3} {:<32} {}x{}  target pixels: {}",
                s.position, s.part_name, s.width, s.height, s.target_pixels
            )?;
        }
        if !self.undecodable.is_empty() {
            let positions: Vec<String> = self.undecodable.iter().map(|p| p.to_string()).collect();
            writeln!(f, "Undecodable: {}", positions.join(", "))?;
        }
        Ok(())
    }
}
