/// One-shot autoplay countdown, advanced by frame time like the rest of the
/// render loop. Either disarmed or counting toward a single deadline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    duration: f32,
    elapsed: f32,
}

impl Countdown {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Start a fresh full-length countdown, replacing any pending one.
    pub fn arm(&mut self, duration: f32) {
        self.pending = Some(Pending {
            duration,
            elapsed: 0.0,
        });
    }

    pub fn disarm(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance by `dt` seconds. Returns true exactly once, on the tick that
    /// reaches the deadline; the countdown is disarmed at that point and any
    /// overshoot is dropped.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        pending.elapsed += dt.max(0.0);
        if pending.elapsed >= pending.duration {
            self.pending = None;
            return true;
        }
        false
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> Option<f32> {
        self.pending
            .map(|p| (p.elapsed / p.duration).clamp(0.0, 1.0))
    }

    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|p| (p.duration - p.elapsed).max(0.0))
    }
}
