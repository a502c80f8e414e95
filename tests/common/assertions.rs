//! Assertion helpers for tests.

use image::RgbImage;
use pretty_assertions::assert_eq;
use std::io::Read;
use std::path::Path;

/// Read one part out of a saved package
pub fn read_part(docx: &Path, name: &str) -> Vec<u8> {
    let file = std::fs::File::open(docx).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("{} has no part {name}", docx.display()));
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    bytes
}

/// Part names of a package, in stored order
pub fn part_names(docx: &Path) -> Vec<String> {
    let file = std::fs::File::open(docx).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Decode a PNG (or any supported image) to RGB
pub fn decode(bytes: &[u8]) -> RgbImage {
    image::load_from_memory(bytes)
        .unwrap_or_else(|e| panic!("Expected a decodable image: {e}"))
        .to_rgb8()
}

/// Assert a pixel has the expected color
pub fn assert_pixel(image: &RgbImage, x: u32, y: u32, expected: [u8; 3]) {
    assert_eq!(
        image.get_pixel(x, y).0,
        expected,
        "Unexpected color at ({x}, {y})"
    );
}

/// Assert every pixel in the image has one color
pub fn assert_solid(image: &RgbImage, expected: [u8; 3]) {
    let off = image.pixels().filter(|p| p.0 != expected).count();
    assert_eq!(off, 0, "{off} pixels differ from {expected:?}");
}
