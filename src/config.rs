//! Carousel timing and gesture settings.
//!
//! Loaded from the optional `[carousel]` table of a deck file:
//!
//! ```toml
//! [carousel]
//! image_duration = 8.0
//! video_duration = 12.0
//! swipe_threshold = 50.0
//! loop_video = true
//! ```
//!
//! Every key is optional. Unknown keys are rejected to catch typos early.

use serde::Deserialize;

use crate::constants::{SLIDE_DURATION, SWIPE_THRESHOLD, VIDEO_SLIDE_DURATION};
use crate::error::ConfigError;
use crate::slide::MediaKind;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Seconds an image slide stays up before autoplay advances.
    pub image_duration: f32,
    /// Seconds a video slide stays up before autoplay advances.
    pub video_duration: f32,
    /// Minimum horizontal drag, in pixels, that counts as a swipe.
    pub swipe_threshold: f32,
    /// Restart a video slide when its media ends.
    pub loop_video: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            image_duration: SLIDE_DURATION,
            video_duration: VIDEO_SLIDE_DURATION,
            swipe_threshold: SWIPE_THRESHOLD,
            loop_video: true,
        }
    }
}

impl CarouselConfig {
    pub fn duration_for(&self, kind: MediaKind) -> f32 {
        match kind {
            MediaKind::Image => self.image_duration,
            MediaKind::Video => self.video_duration,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("image_duration", self.image_duration),
            ("video_duration", self.video_duration),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a positive number of seconds, got {value}"
                )));
            }
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::Validation(format!(
                "swipe_threshold must be zero or more pixels, got {}",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}
