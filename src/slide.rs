use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::error::DeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// What a slide shows behind its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Image(PathBuf),
    Video {
        source: PathBuf,
        poster: Option<PathBuf>, // Still shown until frames arrive
    },
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Image(_) => MediaKind::Image,
            Media::Video { .. } => MediaKind::Video,
        }
    }

    /// The asset behind the slide: the image itself or the video source.
    pub fn media_ref(&self) -> &Path {
        match self {
            Media::Image(path) => path,
            Media::Video { source, .. } => source,
        }
    }

    /// The image a renderer can show without decoding video.
    pub fn still(&self) -> Option<&Path> {
        match self {
            Media::Image(path) => Some(path),
            Media::Video { poster, .. } => poster.as_deref(),
        }
    }
}

/// One immutable entry of the hero sequence. The text is opaque to the
/// controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    index: usize,
    pub media: Media,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub tag_line: String,
    pub native_title: Option<String>,
}

impl Slide {
    pub fn new(media: Media, title: impl Into<String>) -> Self {
        Self {
            index: 0,
            media,
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            tag_line: String::new(),
            native_title: None,
        }
    }

    pub fn image(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self::new(Media::Image(path.into()), title)
    }

    pub fn video(source: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self::new(
            Media::Video {
                source: source.into(),
                poster: None,
            },
            title,
        )
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag_line(mut self, tag_line: impl Into<String>) -> Self {
        self.tag_line = tag_line.into();
        self
    }

    pub fn with_native_title(mut self, native_title: impl Into<String>) -> Self {
        self.native_title = Some(native_title.into());
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> MediaKind {
        self.media.kind()
    }

    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }
}

/// The fixed, non-empty, ordered slide sequence a controller runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    /// Build a deck, numbering the slides in the order given.
    pub fn new(slides: Vec<Slide>) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        let slides = slides
            .into_iter()
            .enumerate()
            .map(|(index, slide)| Slide { index, ..slide })
            .collect();
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    // A deck is never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    pub fn has_video(&self) -> bool {
        self.slides.iter().any(Slide::is_video)
    }
}

impl Index<usize> for SlideDeck {
    type Output = Slide;

    fn index(&self, index: usize) -> &Slide {
        &self.slides[index]
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(SlideDeck::new(Vec::new()), Err(DeckError::Empty)));
    }

    #[test]
    fn indices_follow_insertion_order() {
        let deck = SlideDeck::new(vec![
            Slide::video("hero.mp4", "Dragon City"),
            Slide::image("a.jpg", "10th Year"),
            Slide::image("b.jpg", "799+ Stores"),
        ])
        .unwrap();

        let indices: Vec<usize> = deck.iter().map(Slide::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(deck[1].title, "10th Year");
        assert!(deck.has_video());
    }

    #[test]
    fn media_kind_and_still() {
        let image = Media::Image("a.jpg".into());
        let video = Media::Video {
            source: "v.mp4".into(),
            poster: Some("poster.jpg".into()),
        };
        assert_eq!(image.kind(), MediaKind::Image);
        assert_eq!(video.kind(), MediaKind::Video);
        assert_eq!(video.media_ref(), Path::new("v.mp4"));
        assert_eq!(video.still(), Some(Path::new("poster.jpg")));
        assert_eq!(image.still(), Some(Path::new("a.jpg")));
    }
}
