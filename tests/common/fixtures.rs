//! Test fixtures: images and minimal DOCX packages.

use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Colors used across the tests
pub mod colors {
    /// Default target color (#EC131B)
    pub const TARGET: [u8; 3] = [236, 19, 27];

    /// Default replacement color (#0000FF)
    pub const REPLACEMENT: [u8; 3] = [0, 0, 255];

    pub const WHITE: [u8; 3] = [255, 255, 255];

    pub const GREEN: [u8; 3] = [0, 200, 0];
}

pub const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

pub const HYPERLINK_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

pub const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Figure</w:t></w:r></w:p></w:body></w:document>"#;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="png" ContentType="image/png"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

/// Solid-color PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    png(&RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Left half `left`, right half `right`
pub fn split_png(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    png(&RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb(left)
        } else {
            Rgb(right)
        }
    }))
}

pub fn png(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

struct Rel {
    id: String,
    rel_type: String,
    target: String,
    external: bool,
}

/// Builds a minimal Word package on disk
pub struct DocxBuilder {
    parts: Vec<(String, Vec<u8>)>,
    rels: Vec<Rel>,
}

impl Default for DocxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            rels: Vec::new(),
        }
    }

    /// Add `word/media/<name>` with an image relationship to it
    pub fn image(mut self, name: &str, bytes: Vec<u8>) -> Self {
        let id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Rel {
            id,
            rel_type: IMAGE_REL_TYPE.to_string(),
            target: format!("media/{name}"),
            external: false,
        });
        self.parts.push((format!("word/media/{name}"), bytes));
        self
    }

    /// Add a relationship without a part
    pub fn relationship(mut self, rel_type: &str, target: &str, external: bool) -> Self {
        let id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Rel {
            id,
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            external,
        });
        self
    }

    /// Add a package part that no relationship points at
    pub fn part(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.parts.push((name.to_string(), bytes));
        self
    }

    fn rels_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for rel in &self.rels {
            let mode = if rel.external {
                r#" TargetMode="External""#
            } else {
                ""
            };
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{mode}/>"#,
                rel.id, rel.rel_type, rel.target
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    /// Write the package to `dir/name`
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(DOCUMENT_XML.as_bytes()).unwrap();
        writer
            .start_file("word/_rels/document.xml.rels", options)
            .unwrap();
        writer.write_all(self.rels_xml().as_bytes()).unwrap();
        for (name, bytes) in &self.parts {
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(bytes).unwrap();
        }

        writer.finish().unwrap();
        path
    }
}
