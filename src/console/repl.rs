use super::command::{Command, HELP};
use crate::error::SessionError;
use crate::report::FinishReport;
use crate::session::{EditSession, Step};
use region_recolor::{MaskRegion, MatchThresholds, Region};
use std::io::{BufRead, Write};

/// How a console run ended
#[derive(Debug)]
pub enum Outcome {
    /// The document was saved
    Finished(FinishReport),
    /// The operator quit without saving
    Quit,
    /// Input ran out before the document was finished
    EndOfInput,
}

enum Flow {
    Continue,
    Finished(FinishReport),
    Quit,
}

const PROMPT: &str = "redshape> ";

/// Read commands line by line and drive the session until it is finished
///
/// Command and session errors are printed and the loop goes on; only
/// failures to write to `out` end the run.
pub fn run<R: BufRead, W: Write>(
    session: &mut EditSession,
    input: R,
    out: &mut W,
) -> std::io::Result<Outcome> {
    print_status(session, out)?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            continue;
        }

        let flow = match line.parse::<Command>() {
            Ok(command) => match execute(session, command, out) {
                Ok(flow) => flow,
                Err(e) => {
                    writeln!(out, "Error: {e}")?;
                    Flow::Continue
                }
            },
            Err(e) => {
                writeln!(out, "{e}")?;
                Flow::Continue
            }
        };

        match flow {
            Flow::Continue => {}
            Flow::Finished(report) => {
                writeln!(out, "{report}")?;
                return Ok(Outcome::Finished(report));
            }
            Flow::Quit => {
                writeln!(out, "Leaving without saving.")?;
                return Ok(Outcome::Quit);
            }
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(Outcome::EndOfInput)
}

fn execute<W: Write>(
    session: &mut EditSession,
    command: Command,
    out: &mut W,
) -> Result<Flow, SessionError> {
    match command {
        Command::Rect { x1, y1, x2, y2 } => {
            let added = session.add_region(Region::rectangle(x1, y1, x2, y2))?;
            report_edit(session, added, out)?;
        }
        Command::Ellipse { x1, y1, x2, y2 } => {
            let added = session.add_region(Region::ellipse(x1, y1, x2, y2))?;
            report_edit(session, added, out)?;
        }
        Command::Lasso(points) => {
            let added = session.add_region(Region::lasso(points))?;
            report_edit(session, added, out)?;
        }
        Command::Draw(points) => {
            let added = session.add_mask_region(MaskRegion::draw(points))?;
            report_edit(session, added, out)?;
        }
        Command::Erase(points) => {
            let added = session.add_mask_region(MaskRegion::erase(points))?;
            report_edit(session, added, out)?;
        }
        Command::View(display) => {
            session.set_view(display);
            match display {
                Some((w, h)) => writeln!(out, "Coordinates refer to a {w}x{h} view")?,
                None => writeln!(out, "Coordinates are image pixels")?,
            }
        }
        Command::Undo => {
            if session.undo()? {
                report_edit(session, true, out)?;
            } else {
                writeln!(out, "Nothing to undo")?;
            }
        }
        Command::Redo => {
            if session.redo()? {
                report_edit(session, true, out)?;
            } else {
                writeln!(out, "Nothing to redo")?;
            }
        }
        Command::Preview => {
            let (path, changed) = session.write_preview()?;
            writeln!(out, "{changed} pixels would change, preview: {}", path.display())?;
        }
        Command::Next => {
            let step = session.process_or_skip()?;
            return advance(session, step, out);
        }
        Command::Skip => {
            let step = session.skip()?;
            return advance(session, step, out);
        }
        Command::Prev => {
            if session.previous()? {
                print_status(session, out)?;
            } else {
                writeln!(out, "Already at the first image")?;
            }
        }
        Command::Status => print_status(session, out)?,
        Command::Colors => print_colors(session, out)?,
        Command::TargetAdd(color) => {
            if session.add_target(color)? {
                writeln!(out, "Added target {color}")?;
            } else {
                writeln!(out, "{color} is already a target")?;
            }
        }
        Command::TargetRemove(color) => {
            if session.remove_target(color)? {
                writeln!(out, "Removed target {color}")?;
            } else {
                writeln!(out, "{color} is not a target")?;
            }
        }
        Command::Replace(color) => {
            session.set_replacement(color)?;
            writeln!(out, "Replacement color is now {color}")?;
        }
        Command::Tolerance(n) => set_threshold(session, out, |t| t.tolerance = n)?,
        Command::Saturation(n) => set_threshold(session, out, |t| t.saturation_floor = n)?,
        Command::Value(n) => set_threshold(session, out, |t| t.value_floor = n)?,
        Command::AutoPreview(enabled) => {
            session.set_auto_preview(enabled)?;
            let state = if enabled { "on" } else { "off" };
            writeln!(out, "Auto-preview {state}")?;
        }
        Command::Rescan => {
            let relevant = session.rescan();
            let positions: Vec<String> = relevant.iter().map(|s| (s + 1).to_string()).collect();
            writeln!(
                out,
                "{} of {} images contain the current target colors{}{}",
                relevant.len(),
                session.bridge().slot_count(),
                if positions.is_empty() { "" } else { ": " },
                positions.join(", ")
            )?;
        }
        Command::Finish => return Ok(Flow::Finished(session.finish()?)),
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => write!(out, "{HELP}")?,
    }
    Ok(Flow::Continue)
}

/// Report a navigation step, finishing the document after the last image
fn advance<W: Write>(
    session: &mut EditSession,
    step: Step,
    out: &mut W,
) -> Result<Flow, SessionError> {
    match step {
        Step::Processed { slot, changed } => {
            writeln!(out, "Image {} processed, {changed} pixels recolored", slot + 1)?
        }
        Step::Skipped { slot } => writeln!(out, "Image {} kept as is", slot + 1)?,
    }
    if session.at_end() {
        writeln!(out, "All images visited, saving.")?;
        return Ok(Flow::Finished(session.finish()?));
    }
    print_status(session, out)?;
    Ok(Flow::Continue)
}

fn report_edit<W: Write>(
    session: &EditSession,
    added: bool,
    out: &mut W,
) -> Result<(), SessionError> {
    if !added {
        writeln!(out, "Ignored: a polygon needs at least 3 points")?;
        return Ok(());
    }
    write!(
        out,
        "{} regions, {} mask polygons",
        session.regions().len(),
        session.mask_regions().len()
    )?;
    match session.cached_preview() {
        Some(preview) => writeln!(out, ", {} pixels would change", preview.changed)?,
        None => writeln!(out)?,
    }
    Ok(())
}

fn set_threshold<W: Write>(
    session: &mut EditSession,
    out: &mut W,
    update: impl FnOnce(&mut MatchThresholds),
) -> Result<(), SessionError> {
    let mut thresholds = session.recolorer().thresholds();
    update(&mut thresholds);
    session.set_thresholds(thresholds)?;
    writeln!(
        out,
        "Tolerance {}, saturation floor {}, value floor {}",
        thresholds.tolerance, thresholds.saturation_floor, thresholds.value_floor
    )?;
    Ok(())
}

fn print_status<W: Write>(session: &EditSession, out: &mut W) -> std::io::Result<()> {
    let Some(progress) = session.progress() else {
        return writeln!(out, "No image loaded");
    };
    if session.is_fallback() {
        writeln!(out, "No image contains the target colors; showing all of them.")?;
    }
    writeln!(out, "{progress}")?;
    if let Some(image) = session.current_image() {
        writeln!(out, "Size: {}x{}", image.width(), image.height())?;
    }
    let history = session.history();
    writeln!(
        out,
        "{} regions, {} mask polygons, history {}/{}",
        session.regions().len(),
        session.mask_regions().len(),
        history.cursor().map_or(0, |c| c + 1),
        history.len()
    )
}

fn print_colors<W: Write>(session: &EditSession, out: &mut W) -> std::io::Result<()> {
    let recolorer = session.recolorer();
    let targets: Vec<String> = recolorer
        .target_colors()
        .iter()
        .map(|t| t.color.to_hex())
        .collect();
    let thresholds = recolorer.thresholds();
    writeln!(out, "Targets: {}", targets.join(", "))?;
    writeln!(out, "Replacement: {}", recolorer.replacement().to_hex())?;
    writeln!(
        out,
        "Tolerance {}, saturation floor {}, value floor {}",
        thresholds.tolerance, thresholds.saturation_floor, thresholds.value_floor
    )
}
