/// Where a pointer-down landed. Presses on controls are contained: they
/// never start a drag on the surface underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Surface,
    Control,
}

/// Discrete controls the presentation layer exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Dot(usize),
    ToggleMedia,
    Pause,
    Resume,
}

/// Raw input, already normalised to hero-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, target: PointerTarget },
    PointerUp { x: f32 },
    PointerCancel,
    PointerLeave, // Cancels any drag and ends hover
    HoverEnter,
    HoverLeave,
    Control(Control),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,  // Content moves left: go forward
    Right, // Content moves right: go back
}

/// Turns pointer-down / pointer-up pairs into swipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start_x: None,
            threshold,
        }
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish a drag. Always clears the tracked start, swipe or not.
    pub fn pointer_up(&mut self, x: f32) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta.abs() <= self.threshold {
            return None;
        }
        if delta < 0.0 {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_drag_past_threshold_is_swipe_left() {
        let mut drag = DragTracker::new(50.0);
        drag.pointer_down(100.0);
        assert_eq!(drag.pointer_up(30.0), Some(Swipe::Left));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn rightward_drag_past_threshold_is_swipe_right() {
        let mut drag = DragTracker::new(50.0);
        drag.pointer_down(100.0);
        assert_eq!(drag.pointer_up(151.0), Some(Swipe::Right));
    }

    #[test]
    fn short_drag_is_not_a_swipe() {
        let mut drag = DragTracker::new(50.0);
        drag.pointer_down(100.0);
        assert_eq!(drag.pointer_up(80.0), None);
        // Exactly at the threshold does not count either.
        drag.pointer_down(100.0);
        assert_eq!(drag.pointer_up(50.0), None);
    }

    #[test]
    fn cancel_forgets_the_start() {
        let mut drag = DragTracker::new(50.0);
        drag.pointer_down(100.0);
        drag.cancel();
        assert_eq!(drag.pointer_up(0.0), None);
    }

    #[test]
    fn pointer_up_without_down_is_ignored() {
        let mut drag = DragTracker::new(50.0);
        assert_eq!(drag.pointer_up(500.0), None);
    }
}
