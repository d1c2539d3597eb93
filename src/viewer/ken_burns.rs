use rand::Rng;
use raylib::prelude::*;

use carousel::constants::{KEN_BURNS_PAN, KEN_BURNS_ZOOM};

/// Largest centred region of a `tex_w` x `tex_h` texture with the aspect of
/// the destination, i.e. "object-fit: cover".
pub fn cover_source(tex_w: f32, tex_h: f32, dst_w: f32, dst_h: f32) -> Rectangle {
    if tex_w <= 0.0 || tex_h <= 0.0 || dst_w <= 0.0 || dst_h <= 0.0 {
        return Rectangle::new(0.0, 0.0, tex_w.max(0.0), tex_h.max(0.0));
    }
    let dst_aspect = dst_w / dst_h;
    if tex_w / tex_h > dst_aspect {
        let w = tex_h * dst_aspect;
        Rectangle::new((tex_w - w) * 0.5, 0.0, w, tex_h)
    } else {
        let h = tex_w / dst_aspect;
        Rectangle::new(0.0, (tex_h - h) * 0.5, tex_w, h)
    }
}

/// Slow zoom and pan across an image slide while it is on screen.
pub struct KenBurns {
    pan_direction: i32,
    zoom: f32,
    pan: f32,
    tween_zoom: ease::Tween,
    tween_pan: ease::Tween,
}

impl KenBurns {
    pub fn new(duration: f32) -> Self {
        // Randomly choose a panning direction: left-to-right, right-to-left, top-to-bottom, or bottom-to-top
        let pan_direction = rand::rng().random_range(0..4);
        let (pan_from, pan_to) = match pan_direction {
            0 | 2 => (-KEN_BURNS_PAN, KEN_BURNS_PAN),
            _ => (KEN_BURNS_PAN, -KEN_BURNS_PAN),
        };

        Self {
            pan_direction,
            zoom: 1.0,
            pan: pan_from,
            tween_zoom: ease::Tween::new(ease::linear_none, 1.0, 1.0 + KEN_BURNS_ZOOM, duration),
            tween_pan: ease::Tween::new(ease::linear_none, pan_from, pan_to, duration),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.zoom = self.tween_zoom.apply(dt);
        self.pan = self.tween_pan.apply(dt);
    }

    /// Source rectangle to sample this frame.
    pub fn source_rect(&self, tex_w: f32, tex_h: f32, dst_w: f32, dst_h: f32) -> Rectangle {
        let base = cover_source(tex_w, tex_h, dst_w, dst_h);
        let zoom = self.zoom.max(1.0);
        let w = base.width / zoom;
        let h = base.height / zoom;

        let (dx, dy) = match self.pan_direction {
            0 | 1 => (self.pan * tex_w, 0.0), // horizontal
            _ => (0.0, self.pan * tex_h),     // vertical
        };

        // Keep the window inside the texture.
        let cx = (base.x + base.width * 0.5 + dx).max(w * 0.5).min(tex_w - w * 0.5);
        let cy = (base.y + base.height * 0.5 + dy).max(h * 0.5).min(tex_h - h * 0.5);
        Rectangle::new(cx - w * 0.5, cy - h * 0.5, w, h)
    }
}
