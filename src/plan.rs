//! Non-interactive edit plans
//!
//! A plan lists, per 1-based document position, the regions and mask
//! polygons to apply:
//!
//! ```yaml
//! slots:
//!   1:
//!     regions:
//!       - shape: rectangle
//!         bounds: [10, 10, 200, 80]
//!       - shape: lasso
//!         points: [[0, 0], [50, 0], [25, 40]]
//!     masks:
//!       - tool: erase
//!         points: [[20, 20], [40, 20], [30, 30]]
//!   3:
//!     view: [800, 600]
//!     regions:
//!       - shape: ellipse
//!         bounds: [100, 100, 300, 200]
//! ```
//!
//! Slots in the visiting order that the plan does not list are skipped.

use crate::error::PlanError;
use crate::report::FinishReport;
use crate::session::{EditSession, Step};
use region_recolor::{MaskRegion, MaskTool, Point, Region};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EditPlan {
    /// Keyed by 1-based document position
    #[serde(default)]
    pub slots: BTreeMap<usize, SlotPlan>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SlotPlan {
    /// Displayed size the coordinates refer to; image pixels when absent
    #[serde(default)]
    pub view: Option<[u32; 2]>,
    #[serde(default)]
    pub regions: Vec<PlanRegion>,
    #[serde(default)]
    pub masks: Vec<PlanMask>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum PlanRegion {
    Rectangle { bounds: [i32; 4] },
    Ellipse { bounds: [i32; 4] },
    Lasso { points: Vec<[i32; 2]> },
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanTool {
    Draw,
    Erase,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlanMask {
    pub tool: PlanTool,
    pub points: Vec<[i32; 2]>,
}

fn to_points(points: &[[i32; 2]]) -> Vec<Point> {
    points.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

impl From<&PlanRegion> for Region {
    fn from(region: &PlanRegion) -> Self {
        match region {
            PlanRegion::Rectangle { bounds: [x1, y1, x2, y2] } => {
                Region::rectangle(*x1, *y1, *x2, *y2)
            }
            PlanRegion::Ellipse { bounds: [x1, y1, x2, y2] } => {
                Region::ellipse(*x1, *y1, *x2, *y2)
            }
            PlanRegion::Lasso { points } => Region::lasso(to_points(points)),
        }
    }
}

impl From<&PlanMask> for MaskRegion {
    fn from(mask: &PlanMask) -> Self {
        let tool = match mask.tool {
            PlanTool::Draw => MaskTool::Draw,
            PlanTool::Erase => MaskTool::Erase,
        };
        MaskRegion::new(tool, to_points(&mask.points))
    }
}

impl EditPlan {
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(yaml: &str) -> Result<Self, PlanError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check every position against a document with `total` images
    pub fn validate(&self, total: usize) -> Result<(), PlanError> {
        match self.slots.keys().find(|&&p| p == 0 || p > total) {
            Some(&position) => Err(PlanError::PositionOutOfRange { position, total }),
            None => Ok(()),
        }
    }
}

/// Walk the whole session, applying the plan, then finish the document
pub fn run_plan(session: &mut EditSession, plan: &EditPlan) -> Result<FinishReport, PlanError> {
    plan.validate(session.bridge().slot_count())?;

    for position in plan.slots.keys() {
        if !session.order().contains(&(position - 1)) {
            tracing::warn!(
                position,
                "Plan lists an image that is not visited, ignoring it"
            );
        }
    }

    session.set_auto_preview(false)?;

    while let Some(slot) = session.current_slot() {
        let step = match plan.slots.get(&(slot + 1)) {
            Some(slot_plan) => {
                session.set_view(slot_plan.view.map(|[w, h]| (w, h)));
                for region in &slot_plan.regions {
                    if !session.add_region(region.into())? {
                        tracing::warn!(position = slot + 1, "Ignoring lasso with fewer than 3 points");
                    }
                }
                for mask in &slot_plan.masks {
                    if !session.add_mask_region(mask.into())? {
                        tracing::warn!(position = slot + 1, "Ignoring mask with fewer than 3 points");
                    }
                }
                session.process_or_skip()?
            }
            None => session.skip()?,
        };
        if let Step::Processed { slot, changed } = step {
            tracing::info!(position = slot + 1, changed, "Applied plan");
        }
    }

    Ok(session.finish()?)
}
