use super::progress::Progress;
use super::workspace::Workspace;
use crate::document::codec;
use crate::document::visits::{original_file_name, processed_file_name};
use crate::document::DocumentBridge;
use crate::error::SessionError;
use crate::models::AppConfig;
use crate::report::{self, FinishReport};
use image::RgbImage;
use region_recolor::replace::highlight_changes;
use region_recolor::{
    EditHistory, HistoryState, MaskRegion, MatchThresholds, Recolorer, Region, Replacement, Rgb,
    ViewTransform,
};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the highlighted preview written by [`EditSession::write_preview`]
pub const PREVIEW_FILE_NAME: &str = "preview.png";

/// What [`EditSession::process_or_skip`] did with the slot it left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Replacement ran; `changed` pixels were recolored
    Processed { slot: usize, changed: u64 },
    /// No edits; the original was carried forward
    Skipped { slot: usize },
}

struct CurrentImage {
    slot: usize,
    image: RgbImage,
}

/// Interactive editing state for one document
///
/// The session walks the visiting order (the relevant slots, or every
/// decodable slot when none are relevant). Each slot starts with empty
/// region lists and a history holding one empty baseline.
pub struct EditSession {
    config: AppConfig,
    recolorer: Recolorer,
    bridge: DocumentBridge,
    workspace: Workspace,
    order: Vec<usize>,
    fallback: bool,
    position: usize,
    current: Option<CurrentImage>,
    regions: Vec<Region>,
    mask_regions: Vec<MaskRegion>,
    history: EditHistory,
    preview: Option<Replacement>,
    auto_preview: bool,
    view: Option<(u32, u32)>,
    finished: bool,
}

impl EditSession {
    /// Open a DOCX file and load its first image
    pub fn open(path: &Path, config: AppConfig) -> Result<Self, SessionError> {
        let bridge = DocumentBridge::open_docx(path)?;
        Self::with_bridge(bridge, config)
    }

    /// Start a session on an already opened document
    pub fn with_bridge(mut bridge: DocumentBridge, config: AppConfig) -> Result<Self, SessionError> {
        let recolorer = config.recolorer()?;

        let relevant = bridge.filter_relevant(&recolorer).to_vec();
        let fallback = relevant.is_empty();
        let order = if fallback {
            tracing::warn!("No images contain the target colors, showing every image");
            bridge.decodable()
        } else {
            relevant
        };

        let workspace = Workspace::create()?;
        let mut session = Self {
            history: EditHistory::new(config.history_depth),
            auto_preview: config.auto_preview,
            config,
            recolorer,
            bridge,
            workspace,
            order,
            fallback,
            position: 0,
            current: None,
            regions: Vec::new(),
            mask_regions: Vec::new(),
            preview: None,
            view: None,
            finished: false,
        };
        session.load_current()?;
        Ok(session)
    }

    fn load_current(&mut self) -> Result<(), SessionError> {
        self.regions.clear();
        self.mask_regions.clear();
        self.preview = None;
        self.history.clear();

        let Some(&slot) = self.order.get(self.position) else {
            self.current = None;
            return Ok(());
        };

        let image = self.bridge.decode(slot)?;
        self.history.record(&self.regions, &self.mask_regions);

        if self.bridge.visits().len() <= self.position {
            let bytes = self
                .bridge
                .slot(slot)
                .map(|s| s.bytes.clone())
                .unwrap_or_default();
            let name = original_file_name(self.position, slot, codec::extension_for(&bytes));
            let path = self.workspace.write(&name, &bytes)?;
            self.bridge
                .visits_mut()
                .record(self.position, slot, &path);
        }

        tracing::info!(
            position = self.position + 1,
            total = self.order.len(),
            slot = slot + 1,
            width = image.width(),
            height = image.height(),
            "Loaded image"
        );
        self.current = Some(CurrentImage { slot, image });
        Ok(())
    }

    fn current(&self) -> Result<&CurrentImage, SessionError> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        self.current.as_ref().ok_or(SessionError::NoCurrentImage)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn recolorer(&self) -> &Recolorer {
        &self.recolorer
    }

    pub fn bridge(&self) -> &DocumentBridge {
        &self.bridge
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Slots visited, in order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// True when no slot matched and every image is being shown
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// 0-based position in [`order`](Self::order)
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True once every slot in the order has been left behind
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_slot(&self) -> Option<usize> {
        self.current.as_ref().map(|c| c.slot)
    }

    pub fn current_image(&self) -> Option<&RgbImage> {
        self.current.as_ref().map(|c| &c.image)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn mask_regions(&self) -> &[MaskRegion] {
        &self.mask_regions
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn has_edits(&self) -> bool {
        !self.regions.is_empty() || !self.mask_regions.is_empty()
    }

    /// The last computed preview, if still valid
    pub fn cached_preview(&self) -> Option<&Replacement> {
        self.preview.as_ref()
    }

    pub fn auto_preview(&self) -> bool {
        self.auto_preview
    }

    pub fn set_auto_preview(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.auto_preview = enabled;
        self.edits_changed()
    }

    /// Set the displayed size region coordinates refer to; `None` means
    /// coordinates are image pixels
    pub fn set_view(&mut self, display: Option<(u32, u32)>) {
        self.view = display;
    }

    pub fn view(&self) -> Option<ViewTransform> {
        let display = self.view?;
        let image = self.current.as_ref()?.image.dimensions();
        Some(ViewTransform::new(display, image))
    }

    /// The view transform, or the identity over the current image so
    /// coordinates are still clamped to its bounds
    fn transform(&self) -> Result<ViewTransform, SessionError> {
        let (width, height) = self.current()?.image.dimensions();
        Ok(self
            .view()
            .unwrap_or_else(|| ViewTransform::identity(width, height)))
    }

    /// Add a region drawn in view coordinates
    ///
    /// Returns false when the region was ignored (a lasso with fewer than
    /// three points).
    pub fn add_region(&mut self, region: Region) -> Result<bool, SessionError> {
        self.current()?;
        if let Region::Lasso { ref points } = region {
            if points.len() < 3 {
                tracing::debug!(points = points.len(), "Ignoring lasso with too few points");
                return Ok(false);
            }
        }
        let region = self.transform()?.region_to_image(&region);
        tracing::debug!(kind = region.kind(), "Added region");
        self.regions.push(region);
        self.history.record(&self.regions, &self.mask_regions);
        self.edits_changed()?;
        Ok(true)
    }

    /// Add a draw/erase polygon in view coordinates
    ///
    /// Returns false when the polygon was ignored (fewer than three points).
    pub fn add_mask_region(&mut self, mask_region: MaskRegion) -> Result<bool, SessionError> {
        self.current()?;
        if mask_region.points.len() < 3 {
            tracing::debug!(
                points = mask_region.points.len(),
                "Ignoring mask polygon with too few points"
            );
            return Ok(false);
        }
        let mask_region = self.transform()?.mask_to_image(&mask_region);
        tracing::debug!(tool = mask_region.tool.as_str(), "Added mask polygon");
        self.mask_regions.push(mask_region);
        self.history.record(&self.regions, &self.mask_regions);
        self.edits_changed()?;
        Ok(true)
    }

    pub fn undo(&mut self) -> Result<bool, SessionError> {
        self.current()?;
        match self.history.undo().cloned() {
            Some(state) => {
                self.restore(state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self) -> Result<bool, SessionError> {
        self.current()?;
        match self.history.redo().cloned() {
            Some(state) => {
                self.restore(state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Put a snapshot back without recording it
    fn restore(&mut self, state: HistoryState) -> Result<(), SessionError> {
        self.regions = state.regions;
        self.mask_regions = state.mask_regions;
        self.edits_changed()
    }

    /// Drop the cached preview and recompute it if auto-preview is on
    fn edits_changed(&mut self) -> Result<(), SessionError> {
        self.preview = None;
        if self.auto_preview && self.current.is_some() && !self.finished {
            self.preview()?;
        }
        Ok(())
    }

    /// Run the replacement on the current image and cache the result
    pub fn preview(&mut self) -> Result<&Replacement, SessionError> {
        let current = self.current()?;
        let result = self
            .recolorer
            .apply(&current.image, &self.regions, &self.mask_regions)?;
        tracing::debug!(changed = result.changed, "Preview updated");
        Ok(self.preview.insert(result))
    }

    /// Write the preview with changed pixels tinted green to the workspace
    pub fn write_preview(&mut self) -> Result<(PathBuf, u64), SessionError> {
        if self.preview.is_none() {
            self.preview()?;
        }
        let current = self.current()?;
        let preview = self.preview.as_ref().ok_or(SessionError::NoCurrentImage)?;
        let highlighted = highlight_changes(&current.image, &preview.image);
        let bytes = codec::encode_png(&highlighted)?;
        let path = self.workspace.write(PREVIEW_FILE_NAME, &bytes)?;
        Ok((path, preview.changed))
    }

    /// Process the current slot when it has edits, otherwise skip it; then
    /// move to the next slot
    pub fn process_or_skip(&mut self) -> Result<Step, SessionError> {
        let slot = self.current()?.slot;
        let step = if self.has_edits() {
            let changed = self.process_current()?;
            Step::Processed { slot, changed }
        } else {
            tracing::info!(slot = slot + 1, "Skipped image");
            Step::Skipped { slot }
        };
        self.position += 1;
        self.load_current()?;
        Ok(step)
    }

    /// Move on without processing, keeping the original
    pub fn skip(&mut self) -> Result<Step, SessionError> {
        let slot = self.current()?.slot;
        tracing::info!(slot = slot + 1, "Skipped image");
        self.position += 1;
        self.load_current()?;
        Ok(Step::Skipped { slot })
    }

    /// Step back one slot, forgetting the bookkeeping of the slot being left
    ///
    /// Returns false on the first slot.
    pub fn previous(&mut self) -> Result<bool, SessionError> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        if self.position == 0 {
            return Ok(false);
        }
        self.bridge.visits_mut().truncate(self.position);
        self.position -= 1;
        self.load_current()?;
        Ok(true)
    }

    /// Write the processed file for the current slot and update the container
    fn process_current(&mut self) -> Result<u64, SessionError> {
        let result = match self.preview.take() {
            Some(result) => result,
            None => self.preview()?.clone(),
        };
        let slot = self.current()?.slot;
        let position = self.position;

        let visit = self
            .bridge
            .visits()
            .get(position)
            .cloned()
            .ok_or(SessionError::NoCurrentImage)?;

        let processed = if result.changed > 0 {
            let bytes = codec::encode_png(&result.image)?;
            self.workspace
                .write(&processed_file_name(position, slot, "png"), &bytes)?
        } else if visit.is_processed() {
            // Revisited after `previous`: the shown pixels are the earlier result
            visit.processed
        } else {
            let original = visit.original;
            let ext = original
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_else(|| "bin".to_string());
            self.workspace
                .copy(&original, &processed_file_name(position, slot, &ext))?
        };

        self.bridge
            .visits_mut()
            .set_processed(position, processed.clone());

        let bytes = fs::read(&processed)?;
        if let Err(e) = self.bridge.replace_slot(slot, bytes) {
            tracing::warn!(slot = slot + 1, error = %e, "Image update skipped");
        }

        let changed = result.changed;
        tracing::info!(slot = slot + 1, changed, "Processed image");
        self.preview = Some(result);
        Ok(changed)
    }

    /// Finish the document
    ///
    /// Processes the current slot if it has edits, writes every processed
    /// image back, saves the container and writes the reports. A failed
    /// save leaves the session open so the operator can retry.
    pub fn finish(&mut self) -> Result<FinishReport, SessionError> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        if self.current.is_some() && self.has_edits() {
            self.process_current()?;
        }

        let summary = self.bridge.apply_processed();
        let output_path = self.bridge.save()?;

        let base = output_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let comparison_dir = base.join(&self.config.comparison_dir);
        let no_match_dir = base.join(&self.config.no_match_dir);

        let changed_positions = report::write_comparisons(self.bridge.visits(), &comparison_dir)?;
        let unmatched: Vec<usize> = (0..self.bridge.slot_count())
            .filter(|slot| !self.order.contains(slot))
            .collect();
        let unmatched_exported = report::export_unmatched(&self.bridge, &unmatched, &no_match_dir)?;

        self.finished = true;
        self.current = None;

        let report = FinishReport {
            output_path,
            total_images: self.bridge.slot_count(),
            relevant_images: self.bridge.relevant().len(),
            visited: self.bridge.visits().len(),
            processed: self.bridge.visits().iter().filter(|v| v.is_processed()).count(),
            updated: summary.updated,
            attempted: summary.attempted,
            changed_positions,
            comparison_dir,
            unmatched_exported,
            no_match_dir,
            fallback: self.fallback,
        };
        tracing::info!(
            output = %report.output_path.display(),
            updated = report.updated,
            attempted = report.attempted,
            "Finished document"
        );
        Ok(report)
    }

    pub fn add_target(&mut self, color: Rgb) -> Result<bool, SessionError> {
        let added = self.recolorer.add_target(color);
        if added {
            tracing::info!(color = %color, "Added target color");
            self.edits_changed()?;
        }
        Ok(added)
    }

    pub fn remove_target(&mut self, color: Rgb) -> Result<bool, SessionError> {
        let removed = self.recolorer.remove_target(color);
        if removed {
            tracing::info!(color = %color, "Removed target color");
            self.edits_changed()?;
        }
        Ok(removed)
    }

    pub fn set_replacement(&mut self, color: Rgb) -> Result<(), SessionError> {
        self.recolorer.set_replacement(color);
        tracing::info!(color = %color, "Set replacement color");
        self.edits_changed()
    }

    pub fn set_thresholds(&mut self, thresholds: MatchThresholds) -> Result<(), SessionError> {
        self.recolorer.set_thresholds(thresholds);
        self.edits_changed()
    }

    /// Re-run the relevance scan with the current colors
    ///
    /// The visiting order is not changed; the result is informational.
    pub fn rescan(&mut self) -> Vec<usize> {
        self.bridge.filter_relevant(&self.recolorer).to_vec()
    }

    pub fn progress(&self) -> Option<Progress> {
        let current = self.current.as_ref()?;
        Some(Progress {
            position: self.position + 1,
            total: self.order.len(),
            document_position: current.slot + 1,
            document_total: self.bridge.slot_count(),
            target_pixels: self.recolorer.count(&current.image),
        })
    }
}
