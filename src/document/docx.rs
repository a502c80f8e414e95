//! DOCX (OPC zip package) image container
//!
//! Image parts are found through the relationships of the main document
//! part (`word/_rels/document.xml.rels`). Every other package entry is
//! carried through untouched on save.

use super::container::{EmbeddedImage, ImageContainer};
use crate::error::{DocumentError, SlotError};
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Relationships of the main document part
pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// Directory relationship targets are relative to
const DOCUMENT_DIR: &str = "word";

/// A `<Relationship>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

impl Relationship {
    /// Internal relationship pointing at an image part
    pub fn is_image(&self) -> bool {
        !self.external && self.rel_type.contains("image")
    }

    /// Package part name the target resolves to
    pub fn part_name(&self) -> String {
        resolve_target(&self.target)
    }
}

#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    is_dir: bool,
    data: Vec<u8>,
}

/// DOCX document opened from disk
pub struct DocxContainer {
    path: PathBuf,
    entries: Vec<PackageEntry>,
    images: Vec<EmbeddedImage>,
    /// Package entry index for each image slot
    image_entries: Vec<usize>,
}

impl DocxContainer {
    /// Open a DOCX file
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|e| open_error(path, e))?;
        Self::from_bytes(path, bytes)
    }

    /// Parse a DOCX package held in memory; `path` is used for naming only
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| open_error(path, e))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(|e| open_error(path, e))?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| open_error(path, e))?;
            entries.push(PackageEntry {
                name: file.name().to_string(),
                is_dir: file.is_dir(),
                data,
            });
        }

        let relationships = match entries.iter().find(|e| e.name == DOCUMENT_RELS) {
            Some(entry) => {
                let xml = String::from_utf8_lossy(&entry.data);
                parse_relationships(&xml).map_err(|e| open_error(path, e))?
            }
            None => {
                tracing::warn!(path = %path.display(), "Package has no document relationships");
                Vec::new()
            }
        };

        let mut images = Vec::new();
        let mut image_entries = Vec::new();
        for rel in relationships.iter().filter(|r| r.is_image()) {
            let part_name = rel.part_name();
            if images
                .iter()
                .any(|img: &EmbeddedImage| img.part_name == part_name)
            {
                continue;
            }
            match entries.iter().position(|e| e.name == part_name) {
                Some(index) => {
                    images.push(EmbeddedImage::new(
                        part_name,
                        entries[index].data.clone(),
                    ));
                    image_entries.push(index);
                }
                None => {
                    tracing::warn!(id = %rel.id, part = %part_name, "Image relationship points at a missing part");
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            images = images.len(),
            "Opened DOCX package"
        );

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            images,
            image_entries,
        })
    }
}

impl ImageContainer for DocxContainer {
    fn source_path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn extension(&self) -> &str {
        "docx"
    }

    fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    fn replace_image(&mut self, slot: usize, bytes: Vec<u8>) -> Result<(), SlotError> {
        let entry_index = *self
            .image_entries
            .get(slot)
            .ok_or(SlotError::RelationshipNotFound { slot })?;
        let entry = self
            .entries
            .get_mut(entry_index)
            .ok_or(SlotError::RelationshipNotFound { slot })?;

        entry.data = bytes.clone();
        self.images[slot].bytes = bytes;
        Ok(())
    }

    fn save_to(&self, path: &Path) -> Result<(), DocumentError> {
        let save_error = |reason: String| DocumentError::Save {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::create(path).map_err(|e| save_error(e.to_string()))?;
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            if entry.is_dir {
                writer
                    .add_directory(entry.name.as_str(), options)
                    .map_err(|e| save_error(e.to_string()))?;
                continue;
            }
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| save_error(e.to_string()))?;
            writer
                .write_all(&entry.data)
                .map_err(|e| save_error(e.to_string()))?;
        }

        writer.finish().map_err(|e| save_error(e.to_string()))?;
        tracing::debug!(path = %path.display(), "Saved DOCX package");
        Ok(())
    }
}

fn open_error(path: &Path, err: impl std::fmt::Display) -> DocumentError {
    DocumentError::Open {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Parse the `<Relationship>` elements of a relationships part, in order
pub fn parse_relationships(xml: &str) -> Result<Vec<Relationship>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut relationships = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut rel = Relationship::default();
                for attr in e.attributes().flatten() {
                    let raw = String::from_utf8_lossy(&attr.value).into_owned();
                    let value = match unescape(&raw) {
                        Ok(v) => v.into_owned(),
                        Err(_) => raw.clone(),
                    };
                    match attr.key.local_name().as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        b"TargetMode" => rel.external = value.eq_ignore_ascii_case("External"),
                        _ => {}
                    }
                }
                relationships.push(rel);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}

/// Resolve a relationship target against the `word/` directory
pub fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = vec![DOCUMENT_DIR];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}
