use std::path::Path;

use crate::error::MediaError;

/// The media element behind video slides. One player serves the whole
/// deck; the controller loads whichever video slide is current.
pub trait MediaPlayer {
    /// Point the player at `source`. Loading the source already loaded is a
    /// no-op.
    fn load(&mut self, source: &Path) -> Result<(), MediaError>;
    /// Seek back to the first frame.
    fn rewind(&mut self);
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
}

impl<P: MediaPlayer + ?Sized> MediaPlayer for Box<P> {
    fn load(&mut self, source: &Path) -> Result<(), MediaError> {
        (**self).load(source)
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }

    fn play(&mut self) -> Result<(), MediaError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }
}

/// Notifications a player (or its host) reports back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaNotice {
    Ready, // First frame is available
    Ended,
    Failed(String),
}
