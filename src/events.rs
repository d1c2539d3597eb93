//! Change notifications from the carousel.
//!
//! Subscribers are registered explicitly and owned by the controller's bus.
//! They are dropped when the controller unmounts, after one final
//! [`CarouselEvent::Unmounted`].

use crate::state::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Autoplay,
    Control,
    Swipe,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    SlideChanged {
        from: usize,
        to: usize,
        direction: Direction,
        cause: Cause,
    },
    PauseChanged {
        paused: bool,
    },
    MediaStarted {
        index: usize,
    },
    MediaPaused {
        index: usize,
    },
    MediaFailed {
        index: usize,
        reason: String,
    },
    Unmounted,
}

pub trait CarouselObserver {
    fn on_event(&mut self, event: &CarouselEvent);
}

impl<F> CarouselObserver for F
where
    F: FnMut(&CarouselEvent),
{
    fn on_event(&mut self, event: &CarouselEvent) {
        (*self)(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn CarouselObserver>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl CarouselObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &CarouselEvent) {
        for (_, observer) in self.subscribers.iter_mut() {
            observer.on_event(event);
        }
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
