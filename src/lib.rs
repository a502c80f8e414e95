//! Redshape - recolor marked regions of images embedded in documents
//!
//! Opens a DOCX file, finds the embedded images that contain any of the
//! target colors, lets the operator mark regions on each one and replaces
//! the matching pixels inside those regions. The result is saved as a new
//! `<stem>_processed.docx` next to the original.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod console;
pub mod document;
pub mod error;
pub mod models;
pub mod plan;
pub mod report;
pub mod session;
