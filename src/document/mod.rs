//! Document containers and the slot-level bridge the editor works through

pub mod bridge;
pub mod codec;
pub mod container;
pub mod docx;
pub mod memory;
pub mod visits;

pub use bridge::{DocumentBridge, UpdateSummary};
pub use container::{EmbeddedImage, ImageContainer};
pub use docx::DocxContainer;
pub use memory::InMemoryContainer;
pub use visits::{Visit, VisitLog};
