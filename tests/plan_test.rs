//! Non-interactive plan runs against DOCX files.

mod common;

use common::fixtures::{self, colors, DocxBuilder};
use common::{assert_pixel, assert_solid, decode, read_part};
use pretty_assertions::assert_eq;
use redshape::error::PlanError;
use redshape::models::{AppConfig, ConfigOverrides};
use redshape::plan::{run_plan, EditPlan};
use redshape::session::EditSession;

const PLAN: &str = r#"
slots:
  1:
    regions:
      - shape: rectangle
        bounds: [0, 0, 7, 7]
    masks:
      - tool: erase
        points: [[0, 0], [7, 0], [7, 3], [0, 3]]
  3:
    view: [16, 16]
    regions:
      - shape: ellipse
        bounds: [0, 0, 16, 16]
"#;

#[test]
fn test_plan_processes_listed_slots() {
    let dir = tempfile::tempdir().unwrap();
    let docx = DocxBuilder::new()
        .image("image1.png", fixtures::solid_png(8, 8, colors::TARGET))
        .image("image2.png", fixtures::solid_png(8, 8, colors::TARGET))
        .image("image3.png", fixtures::solid_png(8, 8, colors::TARGET))
        .write(dir.path(), "batch.docx");
    let plan_path = dir.path().join("plan.yaml");
    std::fs::write(&plan_path, PLAN).unwrap();

    let plan = EditPlan::load(&plan_path).unwrap();
    let mut session = EditSession::open(&docx, AppConfig::default()).unwrap();
    let report = run_plan(&mut session, &plan).unwrap();

    assert_eq!(report.visited, 3);
    assert_eq!(report.processed, 2);
    assert_eq!(report.changed_positions, vec![1, 3]);

    let first = decode(&read_part(&report.output_path, "word/media/image1.png"));
    assert_pixel(&first, 2, 2, colors::TARGET);
    assert_pixel(&first, 2, 4, colors::REPLACEMENT);

    let second = decode(&read_part(&report.output_path, "word/media/image2.png"));
    assert_solid(&second, colors::TARGET);

    // Ellipse centered in the image; corners stay untouched
    let third = decode(&read_part(&report.output_path, "word/media/image3.png"));
    assert_pixel(&third, 4, 4, colors::REPLACEMENT);
    assert_pixel(&third, 0, 0, colors::TARGET);
}

#[test]
fn test_plan_with_overridden_colors() {
    let dir = tempfile::tempdir().unwrap();
    let docx = DocxBuilder::new()
        .image("image1.png", fixtures::solid_png(4, 4, colors::GREEN))
        .write(dir.path(), "green.docx");

    let mut config = AppConfig::default();
    config.apply_overrides(&ConfigOverrides {
        target_colors: vec!["0,200,0".to_string()],
        replacement_color: Some("#FFFFFF".to_string()),
        ..Default::default()
    });

    let plan = EditPlan::parse(
        "slots:\n  1:\n    regions:\n      - shape: rectangle\n        bounds: [0, 0, 3, 3]\n",
    )
    .unwrap();
    let mut session = EditSession::open(&docx, config).unwrap();
    assert!(!session.is_fallback());

    let report = run_plan(&mut session, &plan).unwrap();
    let image = decode(&read_part(&report.output_path, "word/media/image1.png"));
    assert_solid(&image, colors::WHITE);
}

#[test]
fn test_plan_out_of_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let docx = DocxBuilder::new()
        .image("image1.png", fixtures::solid_png(4, 4, colors::TARGET))
        .write(dir.path(), "short.docx");

    let plan = EditPlan::parse("slots:\n  4: {}\n").unwrap();
    let mut session = EditSession::open(&docx, AppConfig::default()).unwrap();

    let err = run_plan(&mut session, &plan).unwrap_err();
    assert!(matches!(
        err,
        PlanError::PositionOutOfRange {
            position: 4,
            total: 1
        }
    ));
    assert!(!session.is_finished());
    assert!(!dir.path().join("short_processed.docx").exists());
}
