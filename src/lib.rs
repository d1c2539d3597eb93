//! Hero banner carousel: autoplay, manual navigation, swipe gestures and
//! video playback sync for a fixed deck of slides.
//!
//! [`CarouselController`] is the single owner of carousel state. A
//! presentation layer feeds it frame time, input and media notices, and
//! reads back what to draw.

pub mod autoplay;
pub mod config;
pub mod constants;
pub mod controller;
pub mod deck;
pub mod error;
pub mod events;
pub mod ffmpeg;
pub mod input;
pub mod media;
pub mod slide;
pub mod state;

pub use config::CarouselConfig;
pub use controller::CarouselController;
pub use deck::{Deck, load_deck};
pub use error::{CarouselError, ConfigError, DeckError, MediaError};
pub use events::{CarouselEvent, CarouselObserver, Cause, SubscriptionId};
pub use input::{Control, InputEvent, PointerTarget};
pub use media::{MediaNotice, MediaPlayer};
pub use slide::{Media, MediaKind, Slide, SlideDeck};
pub use state::{Direction, PauseReasons};
