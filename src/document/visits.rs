//! Original/processed file bookkeeping for visited slots

use std::path::{Path, PathBuf};

/// Workspace files belonging to one visited slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// Document position (0-based) of the slot
    pub slot: usize,
    /// Copy of the bytes as first loaded
    pub original: PathBuf,
    /// Bytes to put back into the container; equals `original` until processed
    pub processed: PathBuf,
}

impl Visit {
    pub fn is_processed(&self) -> bool {
        self.original != self.processed
    }
}

/// Visits indexed by position in the visiting order
#[derive(Debug, Clone, Default)]
pub struct VisitLog {
    visits: Vec<Visit>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note the original for `position`. Returns false when the position
    /// was already recorded, in which case the earlier entry is kept.
    pub fn record(&mut self, position: usize, slot: usize, original: &Path) -> bool {
        if position < self.visits.len() {
            return false;
        }
        self.visits.push(Visit {
            slot,
            original: original.to_path_buf(),
            processed: original.to_path_buf(),
        });
        true
    }

    pub fn set_processed(&mut self, position: usize, processed: PathBuf) {
        if let Some(visit) = self.visits.get_mut(position) {
            visit.processed = processed;
        }
    }

    /// Forget every visit from `position` onwards
    pub fn truncate(&mut self, position: usize) {
        self.visits.truncate(position);
    }

    pub fn get(&self, position: usize) -> Option<&Visit> {
        self.visits.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Visit> {
        self.visits.iter()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// `original_{NNN}_docpos_{PPP}.{ext}`, both numbers 1-based
pub fn original_file_name(position: usize, slot: usize, ext: &str) -> String {
    format!("original_{:03}_docpos_{:03}.{}", position + 1, slot + 1, ext)
}

/// `processed_{NNN}_docpos_{PPP}.{ext}`, both numbers 1-based
pub fn processed_file_name(position: usize, slot: usize, ext: &str) -> String {
    format!("processed_{:03}_docpos_{:03}.{}", position + 1, slot + 1, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(original_file_name(0, 4, "png"), "original_001_docpos_005.png");
        assert_eq!(
            processed_file_name(11, 122, "jpg"),
            "processed_012_docpos_123.jpg"
        );
    }

    #[test]
    fn test_record_keeps_first_original() {
        let mut log = VisitLog::new();
        assert!(log.record(0, 3, Path::new("a.png")));
        assert!(!log.record(0, 3, Path::new("b.png")));
        assert_eq!(log.get(0).unwrap().original, PathBuf::from("a.png"));
        assert!(!log.get(0).unwrap().is_processed());
    }

    #[test]
    fn test_processed_and_truncate() {
        let mut log = VisitLog::new();
        log.record(0, 1, Path::new("o1.png"));
        log.record(1, 4, Path::new("o2.png"));
        log.set_processed(1, PathBuf::from("p2.png"));
        assert!(log.get(1).unwrap().is_processed());

        log.truncate(1);
        assert_eq!(log.len(), 1);
        assert!(log.get(1).is_none());
    }
}
