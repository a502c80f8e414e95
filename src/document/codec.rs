//! Image byte decoding and encoding

use crate::error::SlotError;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Decode embedded bytes to RGB. Alpha is dropped.
pub fn decode(slot: usize, bytes: &[u8]) -> Result<RgbImage, SlotError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| SlotError::Decode {
            slot,
            reason: e.to_string(),
        })
}

/// Encode as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, SlotError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| SlotError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// File extension matching the encoded bytes, `bin` if unknown.
pub fn extension_for(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}
