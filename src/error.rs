use std::path::PathBuf;

use thiserror::Error;

/// Failures opening or persisting a document container.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to open document {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("Document contains no images")]
    NoImages,

    #[error("Failed to save document {path}: {reason}")]
    Save { path: PathBuf, reason: String },
}

/// Failures affecting a single image slot. Never fatal for a batch.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Image slot {slot} could not be decoded: {reason}")]
    Decode { slot: usize, reason: String },

    #[error("No relationship maps to image slot {slot}")]
    RelationshipNotFound { slot: usize },

    #[error("Image encode error: {0}")]
    Encode(String),
}

/// Failures of an editing session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("Invalid color: {0}")]
    Color(#[from] region_recolor::ParseColorError),

    #[error("Recolor error: {0}")]
    Recolor(#[from] region_recolor::RecolorError),

    #[error("No image is loaded")]
    NoCurrentImage,

    #[error("Session is already finished")]
    Finished,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures loading an edit plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to read plan {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid plan: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Plan references document position {position}, but the document has {total} images")]
    PositionOutOfRange { position: usize, total: usize },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Console input that could not be understood.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid number: {0}")]
    Number(String),

    #[error("Invalid point '{0}', expected x,y")]
    Point(String),

    #[error("Invalid color: {0}")]
    Color(String),
}
