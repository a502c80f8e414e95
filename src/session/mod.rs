//! Interactive editing of one document, one image at a time

mod editor;
mod progress;
pub mod workspace;

pub use editor::{EditSession, Step, PREVIEW_FILE_NAME};
pub use progress::Progress;
pub use workspace::Workspace;
