use std::fmt;

/// Where the session stands, for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position in the visiting order
    pub position: usize,
    pub total: usize,
    /// 1-based document position of the current slot
    pub document_position: usize,
    pub document_total: usize,
    /// Target pixels in the current image, summed over target colors
    pub target_pixels: u64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "image {}/{} (document position {} of {}), target pixels: {}",
            self.position,
            self.total,
            self.document_position,
            self.document_total,
            self.target_pixels
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let progress = Progress {
            position: 2,
            total: 3,
            document_position: 5,
            document_total: 9,
            target_pixels: 1200,
        };
        assert_eq!(
            progress.to_string(),
            "image 2/3 (document position 5 of 9), target pixels: 1200"
        );
    }
}
