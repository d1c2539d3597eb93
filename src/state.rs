/// Which way the last transition moved. Presentation layers pick their
/// enter/exit animation from it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// +1.0 for forward, -1.0 for backward. Handy for offsetting slide art.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Everything that can be holding autoplay back. Tracked independently so a
/// hover-leave never clears a manual pause and vice versa.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct PauseReasons {
    pub manual: bool,     // pause() / resume()
    pub hover: bool,      // pointer over the hero
    pub drag: bool,       // pointer-down on the swipe surface
    pub media_hold: bool, // user paused the current video
}

impl PauseReasons {
    pub fn any(&self) -> bool {
        self.manual || self.hover || self.drag || self.media_hold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub direction: Direction,
    pub paused: PauseReasons,
    pub media_playing: bool,
}

impl CarouselState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            direction: Direction::Forward,
            paused: PauseReasons::default(),
            media_playing: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.any()
    }
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new()
    }
}
