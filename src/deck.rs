//! Slide deck loading.
//!
//! A deck is either a TOML file:
//!
//! ```toml
//! [carousel]
//! image_duration = 8.0
//!
//! [[slides]]
//! kind = "video"
//! source = "videos/hero-video.mp4"
//! poster = "images/hero.jpg"
//! title = "Dragon City"
//! subtitle = "Bahrain"
//! tag_line = "Bahrain's Premier Destination"
//!
//! [[slides]]
//! kind = "image"
//! path = "images/hero-img2.jpg"
//! title = "799+ Stores"
//! ```
//!
//! or a plain directory of images and videos, shown in file name order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::CarouselConfig;
use crate::error::DeckError;
use crate::slide::{Media, Slide, SlideDeck};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv"];

/// A loaded deck plus the carousel settings that came with it.
#[derive(Debug, Clone)]
pub struct Deck {
    pub config: CarouselConfig,
    pub slides: SlideDeck,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeckFile {
    #[serde(default)]
    carousel: CarouselConfig,
    #[serde(default)]
    slides: Vec<SlideEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Image,
    Video,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SlideEntry {
    kind: EntryKind,
    path: Option<PathBuf>,
    source: Option<PathBuf>,
    poster: Option<PathBuf>,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tag_line: String,
    native_title: Option<String>,
}

impl SlideEntry {
    fn into_slide(self, position: usize, base_dir: &Path) -> Result<Slide, DeckError> {
        let media = match self.kind {
            EntryKind::Image => {
                if self.source.is_some() || self.poster.is_some() {
                    return Err(DeckError::Validation(format!(
                        "slide {position}: image slides take `path`, not `source`/`poster`"
                    )));
                }
                let path = self.path.ok_or_else(|| {
                    DeckError::Validation(format!("slide {position}: image slide is missing `path`"))
                })?;
                Media::Image(base_dir.join(path))
            }
            EntryKind::Video => {
                if self.path.is_some() {
                    return Err(DeckError::Validation(format!(
                        "slide {position}: video slides take `source`, not `path`"
                    )));
                }
                let source = self.source.ok_or_else(|| {
                    DeckError::Validation(format!("slide {position}: video slide is missing `source`"))
                })?;
                Media::Video {
                    source: base_dir.join(source),
                    poster: self.poster.map(|p| base_dir.join(p)),
                }
            }
        };

        let slide = Slide::new(media, self.title)
            .with_subtitle(self.subtitle)
            .with_description(self.description)
            .with_tag_line(self.tag_line);
        Ok(match self.native_title {
            Some(native) => slide.with_native_title(native),
            None => slide,
        })
    }
}

/// Load a deck from a TOML file or a media directory.
pub fn load_deck(path: &Path) -> Result<Deck, DeckError> {
    if path.is_dir() {
        let slides = scan_directory(path)?;
        info!(path = %path.display(), slides = slides.len(), "loaded slides from directory");
        return Ok(Deck {
            config: CarouselConfig::default(),
            slides,
        });
    }

    let text = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let deck = parse_deck(&text, base_dir)?;
    info!(path = %path.display(), slides = deck.slides.len(), "loaded deck file");
    Ok(deck)
}

/// Parse deck TOML. Relative media paths resolve against `base_dir`.
pub fn parse_deck(text: &str, base_dir: &Path) -> Result<Deck, DeckError> {
    let file: DeckFile = toml::from_str(text)?;
    file.carousel.validate()?;

    let slides = file
        .slides
        .into_iter()
        .enumerate()
        .map(|(position, entry)| entry.into_slide(position, base_dir))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Deck {
        config: file.carousel,
        slides: SlideDeck::new(slides)?,
    })
}

/// Build a deck from every image and video in `dir`, sorted by file name.
pub fn scan_directory(dir: &Path) -> Result<SlideDeck, DeckError> {
    let entries = fs::read_dir(dir).map_err(|source| DeckError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && media_for(&path).is_some() {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-media entry");
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let slides = paths
        .into_iter()
        .filter_map(|path| {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            media_for(&path).map(|media| Slide::new(media, title))
        })
        .collect();

    SlideDeck::new(slides)
}

fn media_for(path: &Path) -> Option<Media> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(Media::Image(path.to_path_buf()))
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(Media::Video {
            source: path.to_path_buf(),
            poster: None,
        })
    } else {
        None
    }
}
