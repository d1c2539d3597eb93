mod hero;
mod ken_burns;
mod texture_loader;

use std::path::{Path, PathBuf};

use anyhow::Result;
use raylib::prelude::*;
use tracing::{debug, info, warn};

use carousel::constants::FPS;
use carousel::ffmpeg::{FfmpegPlayer, FrameStatus};
use carousel::{
    CarouselConfig, CarouselController, CarouselEvent, Control, Direction, InputEvent,
    PointerTarget, SlideDeck,
};

use self::hero::{Backdrop, HeroLayout};
use self::ken_burns::KenBurns;
use self::texture_loader::{create_video_texture, load_stills};

const COPY_ENTRANCE: f32 = 0.7; // Seconds for slide copy to settle
const COPY_OFFSET: f32 = 60.0;  // Pixels the copy slides in from

pub struct ViewOptions {
    pub width: i32,
    pub height: i32,
    pub ffmpeg: String,
    pub font: Option<PathBuf>, // Font covering the slides' native titles
}

/// Per-slide presentation state, rebuilt whenever the carousel moves.
struct Scene {
    index: usize,
    ken_burns: Option<KenBurns>,
    copy_entrance: ease::Tween,
    copy_offset: f32,
    video_frame: bool, // A decoded frame is in the video texture
}

impl Scene {
    fn enter(index: usize, direction: Direction, is_video: bool, duration: f32) -> Self {
        let from = COPY_OFFSET * direction.sign();
        Self {
            index,
            ken_burns: (!is_video).then(|| KenBurns::new(duration)),
            copy_entrance: ease::Tween::new(ease::cubic_out, from, 0.0, COPY_ENTRANCE),
            copy_offset: from,
            video_frame: false,
        }
    }

    /// The video backdrop replaces the poster only once a frame has really
    /// reached the texture.
    fn record_upload<E: std::fmt::Display>(&mut self, upload: Result<(), E>) {
        match upload {
            Ok(()) => self.video_frame = true,
            Err(e) => warn!(slide = self.index, error = %e, "failed to upload video frame"),
        }
    }

    fn update(&mut self, dt: f32) {
        if let Some(kb) = self.ken_burns.as_mut() {
            kb.update(dt);
        }
        self.copy_offset = self.copy_entrance.apply(dt);
    }
}

/// Load `path` with just the glyphs the deck's native titles need.
fn load_native_font(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Path,
    slides: &SlideDeck,
) -> Option<Font> {
    let glyphs = hero::native_glyphs(slides);
    if glyphs.is_empty() {
        return None;
    }
    match rl.load_font_ex(thread, &path.to_string_lossy(), hero::NATIVE_TITLE_SIZE, Some(&glyphs)) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load native title font");
            None
        }
    }
}

fn log_event(event: &CarouselEvent) {
    match event {
        CarouselEvent::MediaFailed { index, reason } => {
            warn!(slide = index, %reason, "video unavailable, showing poster")
        }
        other => debug!(event = ?other, "carousel event"),
    }
}

/// Translates raylib mouse state into carousel input.
#[derive(Default)]
struct PointerState {
    hovering: bool,
    pressed_control: Option<Control>,
}

impl PointerState {
    fn poll(&mut self, rl: &RaylibHandle, layout: &HeroLayout, video_slide: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let on_screen = rl.is_cursor_on_screen();
        if on_screen != self.hovering {
            self.hovering = on_screen;
            if on_screen {
                events.push(InputEvent::HoverEnter);
            } else {
                self.pressed_control = None;
                events.push(InputEvent::PointerLeave);
            }
        }

        let pos = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            self.pressed_control = layout.hit_test(pos, video_slide);
            let target = if self.pressed_control.is_some() {
                PointerTarget::Control
            } else {
                PointerTarget::Surface
            };
            events.push(InputEvent::PointerDown { x: pos.x, target });
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            match self.pressed_control.take() {
                Some(control) if layout.hit_test(pos, video_slide) == Some(control) => {
                    events.push(InputEvent::Control(control));
                }
                Some(_) => {}
                None => events.push(InputEvent::PointerUp { x: pos.x }),
            }
        }
        events
    }
}

fn poll_keys(rl: &RaylibHandle, manual_pause: bool) -> Vec<InputEvent> {
    const DIGITS: [KeyboardKey; 9] = [
        KeyboardKey::KEY_ONE,
        KeyboardKey::KEY_TWO,
        KeyboardKey::KEY_THREE,
        KeyboardKey::KEY_FOUR,
        KeyboardKey::KEY_FIVE,
        KeyboardKey::KEY_SIX,
        KeyboardKey::KEY_SEVEN,
        KeyboardKey::KEY_EIGHT,
        KeyboardKey::KEY_NINE,
    ];

    let mut events = Vec::new();
    if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
        events.push(InputEvent::Control(Control::Next));
    }
    if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
        events.push(InputEvent::Control(Control::Previous));
    }
    if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
        events.push(InputEvent::Control(Control::ToggleMedia));
    }
    if rl.is_key_pressed(KeyboardKey::KEY_P) {
        let control = if manual_pause { Control::Resume } else { Control::Pause };
        events.push(InputEvent::Control(control));
    }
    for (i, key) in DIGITS.iter().enumerate() {
        if rl.is_key_pressed(*key) {
            events.push(InputEvent::Control(Control::Dot(i)));
        }
    }
    events
}

pub fn run(slides: SlideDeck, config: CarouselConfig, options: ViewOptions) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(options.width, options.height)
        .title("Hero Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let player = FfmpegPlayer::new(options.width, options.height, FPS).with_binary(options.ffmpeg);
    let mut carousel = CarouselController::mount(slides, config, player);
    carousel.subscribe(log_event);

    // --- Load Slides ---
    let stills = load_stills(&mut rl, &thread, carousel.slides());
    let mut video_texture = if carousel.slides().has_video() {
        Some(create_video_texture(&mut rl, &thread, options.width, options.height)?)
    } else {
        None
    };
    let native_font = options
        .font
        .as_deref()
        .and_then(|path| load_native_font(&mut rl, &thread, path, carousel.slides()));

    let first = carousel.current_slide();
    let mut scene = Scene::enter(
        0,
        Direction::Forward,
        first.is_video(),
        carousel.config().duration_for(first.kind()),
    );
    let mut pointer = PointerState::default();
    info!(
        slides = carousel.len(),
        "viewer started; arrows/digits navigate, space toggles video, P pauses"
    );

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let screen_w = rl.get_screen_width() as f32;
        let screen_h = rl.get_screen_height() as f32;
        let layout = HeroLayout::new(screen_w, screen_h, carousel.len(), carousel.current_index());
        let video_slide = carousel.current_slide().is_video();

        // 1. Input
        let mut events = pointer.poll(&rl, &layout, video_slide);
        events.extend(poll_keys(&rl, carousel.pause_reasons().manual));
        for event in events {
            if let Err(e) = carousel.handle_input(event) {
                debug!(error = %e, "input ignored");
            }
        }

        // 2. Media, only while a video slide is up
        if carousel.current_slide().is_video() {
            let status = carousel.player_mut().advance(dt);
            if matches!(status, FrameStatus::Ready | FrameStatus::Frame) {
                if let Some(texture) = video_texture.as_mut() {
                    // Frames are decoded at the texture's size.
                    scene.record_upload(texture.update_texture(carousel.player().frame()));
                }
            }
            if let Some(notice) = status.notice() {
                carousel.handle_media(notice);
            }
        }

        // 3. Autoplay
        carousel.tick(dt);

        if carousel.current_index() != scene.index {
            let slide = carousel.current_slide();
            scene = Scene::enter(
                carousel.current_index(),
                carousel.direction(),
                slide.is_video(),
                carousel.config().duration_for(slide.kind()),
            );
        }
        scene.update(dt);

        // --- Draw ---
        let layout = HeroLayout::new(screen_w, screen_h, carousel.len(), carousel.current_index());
        let slide = carousel.current_slide();
        let backdrop = match (&video_texture, &stills[scene.index]) {
            (Some(texture), _) if slide.is_video() && scene.video_frame => Backdrop::Video(texture),
            (_, Some(still)) => Backdrop::Still(still, scene.ken_burns.as_ref()),
            _ => Backdrop::Black,
        };
        let (current, total) = carousel.counter();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        hero::draw_backdrop(&mut d, backdrop, screen_w, screen_h);
        hero::draw_counter(&mut d, &current, &total, screen_w);
        hero::draw_copy(&mut d, slide, native_font.as_ref(), screen_h, scene.copy_offset);
        hero::draw_controls(&mut d, &layout, &carousel);
    }

    // Stop the autoplay countdown and the decoder before the window goes.
    carousel.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_upload_keeps_the_poster() {
        let mut scene = Scene::enter(0, Direction::Forward, true, 12.0);
        scene.record_upload(Err("texture size mismatch"));
        assert!(!scene.video_frame);

        scene.record_upload(Ok::<(), &str>(()));
        assert!(scene.video_frame);
    }

    #[test]
    fn image_scenes_get_ken_burns_and_video_scenes_do_not() {
        assert!(Scene::enter(1, Direction::Backward, false, 8.0).ken_burns.is_some());
        assert!(Scene::enter(0, Direction::Forward, true, 12.0).ken_burns.is_none());
    }
}
