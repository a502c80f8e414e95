//! Line-oriented operator console
//!
//! Regions are entered as commands (`rect`, `ellipse`, `lasso`, `draw`,
//! `erase`) in image pixels, or in the coordinates of a scaled view after
//! `view W H`. Previews are written as PNG into the session workspace.

mod command;
mod repl;

pub use command::{Command, HELP};
pub use repl::{run, Outcome};
