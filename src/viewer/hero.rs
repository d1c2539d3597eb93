use raylib::prelude::*;

use carousel::{CarouselController, Control, MediaPlayer, Slide, SlideDeck};

use crate::viewer::ken_burns::{KenBurns, cover_source};

const DRAGON: Color = Color::new(203, 51, 59, 255);
const GOLD: Color = Color::new(212, 175, 55, 255);
const SCRIM: Color = Color::new(0, 0, 0, 40);
const SHADE: Color = Color::new(0, 0, 0, 190);
const CLEAR: Color = Color::new(0, 0, 0, 0);
const FAINT: Color = Color::new(255, 255, 255, 40);
const DIM: Color = Color::new(255, 255, 255, 90);
const SOFT: Color = Color::new(255, 255, 255, 200);

const BUTTON_RADIUS: f32 = 20.0;
pub const NATIVE_TITLE_SIZE: i32 = 32;
const MARGIN: f32 = 48.0;
const DOT_HEIGHT: f32 = 4.0;
const DOT_WIDTH: f32 = 24.0;
const DOT_ACTIVE_WIDTH: f32 = 48.0;
const DOT_GAP: f32 = 8.0;
const DOT_HIT_PAD: f32 = 10.0;

/// Where the hero's controls sit for the current window size.
pub struct HeroLayout {
    pub previous: Vector2,
    pub next: Vector2,
    pub media_toggle: Vector2,
    pub dots: Vec<Rectangle>,
}

impl HeroLayout {
    pub fn new(screen_w: f32, screen_h: f32, count: usize, current: usize) -> Self {
        let baseline = screen_h - MARGIN - BUTTON_RADIUS;

        // Dots run right-to-left from the right margin; the active one is wider.
        let mut dots = vec![Rectangle::new(0.0, 0.0, 0.0, 0.0); count];
        let mut right = screen_w - MARGIN;
        for i in (0..count).rev() {
            let width = if i == current { DOT_ACTIVE_WIDTH } else { DOT_WIDTH };
            dots[i] = Rectangle::new(right - width, baseline - DOT_HEIGHT * 0.5, width, DOT_HEIGHT);
            right -= width + DOT_GAP;
        }

        let arrows_right = right - 2.0 * DOT_GAP;
        Self {
            next: Vector2::new(arrows_right - BUTTON_RADIUS, baseline),
            previous: Vector2::new(arrows_right - 3.0 * BUTTON_RADIUS - DOT_GAP, baseline),
            media_toggle: Vector2::new(MARGIN + BUTTON_RADIUS, baseline),
            dots,
        }
    }

    /// The control under `point`, if any. The media toggle only exists on
    /// video slides.
    pub fn hit_test(&self, point: Vector2, video_slide: bool) -> Option<Control> {
        let in_button = |centre: Vector2| {
            let dx = point.x - centre.x;
            let dy = point.y - centre.y;
            dx * dx + dy * dy <= BUTTON_RADIUS * BUTTON_RADIUS
        };

        if in_button(self.previous) {
            return Some(Control::Previous);
        }
        if in_button(self.next) {
            return Some(Control::Next);
        }
        if video_slide && in_button(self.media_toggle) {
            return Some(Control::ToggleMedia);
        }
        self.dots.iter().position(|dot| {
            let padded = Rectangle::new(
                dot.x - DOT_GAP * 0.5,
                dot.y - DOT_HIT_PAD,
                dot.width + DOT_GAP,
                dot.height + 2.0 * DOT_HIT_PAD,
            );
            padded.check_collision_point_rec(point)
        })
        .map(Control::Dot)
    }
}

/// What the background of the current slide should show this frame.
pub enum Backdrop<'a> {
    Video(&'a Texture2D),
    Still(&'a Texture2D, Option<&'a KenBurns>),
    Black,
}

pub fn draw_backdrop(d: &mut RaylibDrawHandle, backdrop: Backdrop<'_>, screen_w: f32, screen_h: f32) {
    let dest = Rectangle::new(0.0, 0.0, screen_w, screen_h);
    match backdrop {
        Backdrop::Video(texture) => {
            let (w, h) = (texture.width() as f32, texture.height() as f32);
            let source = cover_source(w, h, screen_w, screen_h);
            d.draw_texture_pro(texture, source, dest, Vector2::zero(), 0.0, Color::WHITE);
        }
        Backdrop::Still(texture, ken_burns) => {
            let (w, h) = (texture.width() as f32, texture.height() as f32);
            let source = match ken_burns {
                Some(kb) => kb.source_rect(w, h, screen_w, screen_h),
                None => cover_source(w, h, screen_w, screen_h),
            };
            d.draw_texture_pro(texture, source, dest, Vector2::zero(), 0.0, Color::WHITE);
        }
        Backdrop::Black => d.clear_background(Color::BLACK),
    }

    // Bottom shade keeps the text legible.
    let (w, h) = (screen_w as i32, screen_h as i32);
    d.draw_rectangle(0, 0, w, h, SCRIM);
    d.draw_rectangle_gradient_v(0, h / 3, w, h - h / 3, CLEAR, SHADE);
}

/// Tag line, title, subtitle and description, slid in by `offset_x`.
/// Every distinct character used by the deck's native titles, in first-seen
/// order. Fonts are loaded with only these glyphs.
pub fn native_glyphs(slides: &SlideDeck) -> String {
    let mut glyphs = String::new();
    for title in slides.iter().filter_map(|s| s.native_title.as_deref()) {
        for c in title.chars().filter(|c| !c.is_whitespace()) {
            if !glyphs.contains(c) {
                glyphs.push(c);
            }
        }
    }
    glyphs
}

pub fn draw_copy(
    d: &mut RaylibDrawHandle,
    slide: &Slide,
    native_font: Option<&Font>,
    screen_h: f32,
    offset_x: f32,
) {
    let x = (MARGIN + offset_x) as i32;
    let mut y = (screen_h * 0.45) as i32;

    // The default font only covers ASCII.
    if let Some(native) = slide.native_title.as_deref() {
        let size = NATIVE_TITLE_SIZE;
        match native_font {
            Some(font) => {
                let at = Vector2::new(x as f32, (y - 48) as f32);
                d.draw_text_ex(font, native, at, size as f32, 2.0, GOLD);
            }
            None if native.is_ascii() => d.draw_text(native, x, y - 48, size, GOLD),
            None => {}
        }
    }

    if !slide.tag_line.is_empty() {
        d.draw_rectangle(x, y + 8, 36, 2, GOLD);
        d.draw_text(&slide.tag_line.to_uppercase(), x + 48, y, 18, DRAGON);
        y += 40;
    }

    let title_size = if slide.is_video() { 72 } else { 56 };
    d.draw_text(&slide.title, x, y, title_size, Color::WHITE);
    y += title_size + 4;

    if !slide.subtitle.is_empty() {
        d.draw_text(&slide.subtitle, x, y, title_size, DIM);
        y += title_size + 16;
    }

    if !slide.description.is_empty() {
        for line in wrap(&slide.description, 60) {
            d.draw_text(&line, x, y, 20, SOFT);
            y += 26;
        }
    }
}

pub fn draw_counter(d: &mut RaylibDrawHandle, current: &str, total: &str, screen_w: f32) {
    let right = (screen_w - MARGIN) as i32;
    let big = measure_text(current, 72);
    d.draw_text(current, right - big, 96, 72, FAINT);
    let small = format!("/ {total}");
    let small_w = measure_text(&small, 14);
    d.draw_text(&small, right - small_w, 172, 14, DIM);
}

pub fn draw_controls<P: MediaPlayer>(
    d: &mut RaylibDrawHandle,
    layout: &HeroLayout,
    carousel: &CarouselController<P>,
) {
    for (centre, glyph) in [(layout.previous, "<"), (layout.next, ">")] {
        d.draw_circle_v(centre, BUTTON_RADIUS, FAINT);
        d.draw_circle_lines(centre.x as i32, centre.y as i32, BUTTON_RADIUS, DIM);
        let w = measure_text(glyph, 20);
        d.draw_text(glyph, centre.x as i32 - w / 2, centre.y as i32 - 10, 20, Color::WHITE);
    }

    let current = carousel.current_index();
    for (i, dot) in layout.dots.iter().enumerate() {
        if i == current {
            d.draw_rectangle_rec(*dot, DIM);
            let fill = carousel.progress().unwrap_or(0.0);
            let mut filled = *dot;
            filled.width *= fill;
            d.draw_rectangle_rec(filled, DRAGON);
        } else {
            d.draw_rectangle_rec(*dot, FAINT);
        }
    }

    if carousel.current_slide().is_video() {
        let c = layout.media_toggle;
        let (ring, fill) = if carousel.media_playing() {
            (DRAGON, Color::new(203, 51, 59, 40))
        } else {
            (DIM, FAINT)
        };
        d.draw_circle_v(c, BUTTON_RADIUS, fill);
        d.draw_circle_lines(c.x as i32, c.y as i32, BUTTON_RADIUS, ring);
        if carousel.media_playing() {
            // Pause glyph
            d.draw_rectangle(c.x as i32 - 6, c.y as i32 - 7, 4, 14, DRAGON);
            d.draw_rectangle(c.x as i32 + 2, c.y as i32 - 7, 4, 14, DRAGON);
        } else {
            // Play glyph, counter-clockwise winding
            d.draw_triangle(
                Vector2::new(c.x - 5.0, c.y - 8.0),
                Vector2::new(c.x - 5.0, c.y + 8.0),
                Vector2::new(c.x + 8.0, c.y),
                SOFT,
            );
        }
    }

    if carousel.pause_reasons().manual {
        d.draw_text("PAUSED", MARGIN as i32, MARGIN as i32, 16, DIM);
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
