use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected controller commands. State is left untouched whenever one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("slide index {index} is out of range for a deck of {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("slide {index} has no media to play or pause")]
    NoMedia { index: usize },
}

/// Playback failures. The controller logs and swallows these.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("no media source loaded")]
    NoSource,
    #[error("failed to start `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },
    #[error("media IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("a slide deck needs at least one slide")]
    Empty,
    #[error("Deck validation error: {0}")]
    Validation(String),
    #[error("Failed to read directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<ConfigError> for DeckError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Validation(msg) => DeckError::Validation(msg),
        }
    }
}
