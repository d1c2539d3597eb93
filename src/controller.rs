use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::autoplay::Countdown;
use crate::config::CarouselConfig;
use crate::error::{CarouselError, MediaError};
use crate::events::{CarouselEvent, CarouselObserver, Cause, EventBus, SubscriptionId};
use crate::input::{Control, DragTracker, InputEvent, PointerTarget, Swipe};
use crate::media::{MediaNotice, MediaPlayer};
use crate::slide::{Media, Slide, SlideDeck};
use crate::state::{CarouselState, Direction, PauseReasons};

/// Drives the hero carousel: which slide is up, when autoplay moves on, how
/// gestures navigate, and whether the current video is playing.
///
/// Everything runs on the caller's thread through `&mut self`, so autoplay
/// ticks, input and media notices can never interleave. Tearing down
/// (`unmount` or drop) disarms the countdown and releases every subscriber.
pub struct CarouselController<P: MediaPlayer> {
    deck: SlideDeck,
    config: CarouselConfig,
    state: CarouselState,
    autoplay: Countdown,
    drag: DragTracker,
    player: P,
    bus: EventBus,
    mounted: bool,
}

impl<P: MediaPlayer> CarouselController<P> {
    /// Seed at slide 0, start its video if it has one, and arm autoplay.
    pub fn mount(deck: SlideDeck, config: CarouselConfig, player: P) -> Self {
        let mut controller = Self {
            deck,
            config,
            state: CarouselState::new(),
            autoplay: Countdown::new(),
            drag: DragTracker::new(config.swipe_threshold),
            player,
            bus: EventBus::new(),
            mounted: true,
        };
        controller.enter_current_slide();
        controller.reset_countdown();
        info!(slides = controller.deck.len(), "carousel mounted");
        controller
    }

    // --- Reads ---

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn pause_reasons(&self) -> PauseReasons {
        self.state.paused
    }

    pub fn media_playing(&self) -> bool {
        self.state.media_playing
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current_slide(&self) -> &Slide {
        &self.deck[self.state.current_index]
    }

    pub fn slides(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// How far the autoplay countdown has run, or `None` while paused.
    pub fn progress(&self) -> Option<f32> {
        self.autoplay.progress()
    }

    /// Zero-padded "current / total" labels, e.g. `("01", "04")`.
    pub fn counter(&self) -> (String, String) {
        (
            format!("{:02}", self.state.current_index + 1),
            format!("{:02}", self.deck.len()),
        )
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    // --- Subscriptions ---

    pub fn subscribe(&mut self, observer: impl CarouselObserver + 'static) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // --- Commands ---

    pub fn advance(&mut self) {
        self.step_forward(Cause::Control);
    }

    pub fn retreat(&mut self) {
        self.step_back(Cause::Control);
    }

    /// Jump to `index`. Out-of-range targets are rejected and leave the
    /// carousel exactly as it was.
    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        let len = self.deck.len();
        if index >= len {
            return Err(CarouselError::InvalidIndex { index, len });
        }
        let direction = if index > self.state.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.transition(index, direction, Cause::Control);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.update_pause(|p| p.manual = true);
    }

    pub fn resume(&mut self) {
        self.update_pause(|p| p.manual = false);
    }

    /// Play or pause the current video. Pausing also holds autoplay so the
    /// carousel does not move away from a video being watched.
    ///
    /// Returns whether the video is playing afterwards.
    pub fn toggle_media_playback(&mut self) -> Result<bool, CarouselError> {
        let index = self.state.current_index;
        if !self.deck[index].is_video() {
            return Err(CarouselError::NoMedia { index });
        }

        let was_paused = self.state.is_paused();
        if self.state.media_playing {
            self.player.pause();
            self.state.media_playing = false;
            self.state.paused.media_hold = true;
            self.bus.emit(&CarouselEvent::MediaPaused { index });
        } else {
            let result = self.player.play();
            self.record_playback(index, result);
            self.state.paused.media_hold = false;
        }
        self.settle_pause(was_paused);
        Ok(self.state.media_playing)
    }

    /// Advance the autoplay countdown by `dt` seconds. Returns true when it
    /// fired and moved the carousel on.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.autoplay.tick(dt) {
            return false;
        }
        debug!(from = self.state.current_index, "autoplay fired");
        self.step_forward(Cause::Autoplay);
        true
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), CarouselError> {
        match event {
            InputEvent::PointerDown {
                x,
                target: PointerTarget::Surface,
            } => {
                self.drag.pointer_down(x);
                self.update_pause(|p| p.drag = true);
            }
            InputEvent::PointerDown {
                target: PointerTarget::Control,
                ..
            } => {
                // Contained by the control; the surface never sees it.
            }
            InputEvent::PointerUp { x } => {
                let swipe = self.drag.pointer_up(x);
                self.update_pause(|p| p.drag = false);
                match swipe {
                    Some(Swipe::Left) => self.step_forward(Cause::Swipe),
                    Some(Swipe::Right) => self.step_back(Cause::Swipe),
                    None => {}
                }
            }
            InputEvent::PointerCancel => {
                self.drag.cancel();
                self.update_pause(|p| p.drag = false);
            }
            InputEvent::PointerLeave => {
                self.drag.cancel();
                self.update_pause(|p| {
                    p.drag = false;
                    p.hover = false;
                });
            }
            InputEvent::HoverEnter => self.update_pause(|p| p.hover = true),
            InputEvent::HoverLeave => self.update_pause(|p| p.hover = false),
            InputEvent::Control(control) => self.apply_control(control)?,
        }
        Ok(())
    }

    /// React to the player reporting on the current video. Notices that
    /// arrive while an image slide is up are stale and ignored.
    pub fn handle_media(&mut self, notice: MediaNotice) {
        let index = self.state.current_index;
        if !self.deck[index].is_video() {
            debug!(index, ?notice, "ignoring media notice for image slide");
            return;
        }

        match notice {
            MediaNotice::Ready => {
                if !self.state.paused.media_hold && !self.state.media_playing {
                    self.state.media_playing = true;
                    self.bus.emit(&CarouselEvent::MediaStarted { index });
                }
            }
            MediaNotice::Ended => {
                if self.config.loop_video {
                    self.player.rewind();
                    let result = self.player.play();
                    self.record_playback(index, result);
                } else {
                    self.state.media_playing = false;
                    self.bus.emit(&CarouselEvent::MediaPaused { index });
                }
            }
            MediaNotice::Failed(reason) => {
                warn!(index, %reason, "media playback failed");
                self.state.media_playing = false;
                self.bus.emit(&CarouselEvent::MediaFailed { index, reason });
            }
        }
    }

    /// Tear down now. Dropping the controller does the same.
    pub fn unmount(mut self) {
        self.teardown();
    }

    // --- Internals ---

    fn apply_control(&mut self, control: Control) -> Result<(), CarouselError> {
        match control {
            Control::Previous => self.retreat(),
            Control::Next => self.advance(),
            Control::Dot(index) => self.go_to(index)?,
            Control::ToggleMedia => {
                self.toggle_media_playback()?;
            }
            Control::Pause => self.pause(),
            Control::Resume => self.resume(),
        }
        Ok(())
    }

    fn step_forward(&mut self, cause: Cause) {
        let next = (self.state.current_index + 1) % self.deck.len();
        self.transition(next, Direction::Forward, cause);
    }

    fn step_back(&mut self, cause: Cause) {
        let len = self.deck.len();
        let prev = (self.state.current_index + len - 1) % len;
        self.transition(prev, Direction::Backward, cause);
    }

    fn transition(&mut self, to: usize, direction: Direction, cause: Cause) {
        let from = self.state.current_index;
        let was_paused = self.state.is_paused();

        self.state.current_index = to;
        self.state.direction = direction;
        // A media hold belongs to the video that was on screen.
        self.state.paused.media_hold = false;

        debug!(from, to, ?direction, ?cause, "slide changed");
        self.bus.emit(&CarouselEvent::SlideChanged {
            from,
            to,
            direction,
            cause,
        });

        if from != to {
            self.enter_current_slide();
        }
        self.settle_pause(was_paused);
        self.reset_countdown();
    }

    fn enter_current_slide(&mut self) {
        let slide = &self.deck[self.state.current_index];
        let index = slide.index();
        let source: PathBuf = match &slide.media {
            Media::Video { source, .. } => source.clone(),
            Media::Image(_) => {
                self.state.media_playing = false;
                return;
            }
        };

        let result = self.player.load(&source).and_then(|()| {
            self.player.rewind();
            self.player.play()
        });
        self.record_playback(index, result);
    }

    fn record_playback(&mut self, index: usize, result: Result<(), MediaError>) {
        match result {
            Ok(()) => {
                self.state.media_playing = true;
                self.bus.emit(&CarouselEvent::MediaStarted { index });
            }
            Err(e) => {
                warn!(index, error = %e, "media playback did not start");
                self.state.media_playing = false;
                self.bus.emit(&CarouselEvent::MediaFailed {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn update_pause(&mut self, change: impl FnOnce(&mut PauseReasons)) {
        let was_paused = self.state.is_paused();
        change(&mut self.state.paused);
        self.settle_pause(was_paused);
    }

    /// Emit `PauseChanged` if the overall paused flag flipped. A flip back
    /// to running re-arms a full countdown.
    fn settle_pause(&mut self, was_paused: bool) {
        let paused = self.state.is_paused();
        if paused != was_paused {
            self.bus.emit(&CarouselEvent::PauseChanged { paused });
            self.reset_countdown();
        }
    }

    fn reset_countdown(&mut self) {
        if self.state.is_paused() {
            self.autoplay.disarm();
        } else {
            let duration = self.config.duration_for(self.current_slide().kind());
            self.autoplay.arm(duration);
        }
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.autoplay.disarm();
        self.drag.cancel();
        self.bus.emit(&CarouselEvent::Unmounted);
        self.bus.clear();
        info!("carousel unmounted");
    }
}

impl<P: MediaPlayer> Drop for CarouselController<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
