use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use carousel::SlideDeck;

/// EXIF orientation of a JPEG, 1 (upright) when absent or unreadable.
fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Non-critical: proceed without rotation
            warn!(path = %image_path.display(), error = %e, "could not read EXIF data");
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {}", image_path.display()))?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // EXIF is only read reliably from JPEG
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow!("Failed to load image data for {}: {e}", image_path.display()))?;

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored here.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    debug!(path = %image_path.display(), orientation, "loaded image");

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture for {}: {e}", image_path.display()))
}

/// One still texture per slide: the image itself, or the video's poster.
/// Stills that fail to load are skipped with a warning; the slide renders
/// on black instead.
pub fn load_stills(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    deck: &SlideDeck,
) -> Vec<Option<Texture2D>> {
    deck.iter()
        .map(|slide| {
            let path = slide.media.still()?;
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    warn!(slide = slide.index(), error = %e, "could not load slide image");
                    None
                }
            }
        })
        .collect()
}

/// A blank RGBA texture that video frames are streamed into.
pub fn create_video_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    width: i32,
    height: i32,
) -> Result<Texture2D> {
    let blank = Image::gen_image_color(width, height, Color::BLACK);
    rl.load_texture_from_image(thread, &blank)
        .map_err(|e| anyhow!("Failed to create video texture: {e}"))
}
