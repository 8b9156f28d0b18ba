//! Carousel controller.
//!
//! Two independent pieces of state: the current slide index, which always
//! stays in `[0, N)`, and whether an autoplay timer is running. Every user
//! interaction that moves the carousel stops autoplay first and restarts it
//! afterwards, so the idle countdown starts over instead of racing the user.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::autoplay::{Scheduler, TimerId};
use crate::config::Configuration;
use crate::error::SetupError;
use crate::events::{CarouselEvent, Direction, Key};

mod gesture;
mod render;

pub use gesture::SwipeTracker;
pub use render::{Easing, LogTrack, Track, Transform, Transition};

/// One opaque display item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub label: String,
}

impl Slide {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Which navigation controls exist on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub previous: bool,
    pub next: bool,
}

impl Controls {
    pub const BOTH: Self = Self {
        previous: true,
        next: true,
    };

    fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Previous => self.previous,
            Direction::Next => self.next,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub autoplay_interval: Duration,
    pub swipe_threshold_px: f32,
    pub transition: Transition,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(5_000),
            swipe_threshold_px: 50.0,
            transition: Transition::default(),
        }
    }
}

impl From<&Configuration> for CarouselSettings {
    fn from(cfg: &Configuration) -> Self {
        Self {
            autoplay_interval: cfg.autoplay_interval,
            swipe_threshold_px: cfg.swipe_threshold_px,
            transition: Transition {
                duration: cfg.transition.duration,
                easing: cfg.transition.easing,
            },
        }
    }
}

pub struct Carousel<S, T> {
    slides: Vec<Slide>,
    controls: Controls,
    settings: CarouselSettings,
    index: usize,
    autoplay: Option<TimerId>,
    swipe: SwipeTracker,
    scheduler: S,
    track: T,
}

impl<S: Scheduler, T: Track> Carousel<S, T> {
    pub fn new(
        slides: Vec<Slide>,
        controls: Controls,
        settings: CarouselSettings,
        scheduler: S,
        track: T,
    ) -> Result<Self, SetupError> {
        if slides.is_empty() {
            return Err(SetupError::NoSlides("<none>".to_string()));
        }
        Ok(Self {
            slides,
            controls,
            swipe: SwipeTracker::new(settings.swipe_threshold_px),
            settings,
            index: 0,
            autoplay: None,
            scheduler,
            track,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: construction rejects an empty slide set.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> &Slide {
        &self.slides[self.index]
    }

    pub fn autoplay_active(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn track(&self) -> &T {
        &self.track
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// First paint: slide 0 without animation, then autoplay.
    pub fn init(&mut self) {
        self.index = 0;
        self.render(false);
        self.start_autoplay();
        info!(
            slides = self.slides.len(),
            interval = %humantime::format_duration(self.settings.autoplay_interval),
            "carousel initialised"
        );
    }

    pub fn advance(&mut self, direction: Direction) {
        let len = self.slides.len();
        self.index = match direction {
            Direction::Next => (self.index + 1) % len,
            Direction::Previous => (self.index + len - 1) % len,
        };
        debug!(?direction, index = self.index, slide = %self.current().label, "advanced");
        self.render(true);
    }

    pub fn render(&mut self, animate: bool) {
        let transition = animate.then_some(self.settings.transition);
        let transform = Transform::for_slide(self.index, self.slides.len(), transition);
        self.track.apply(&transform);
    }

    pub fn start_autoplay(&mut self) {
        if self.autoplay.is_some() {
            return;
        }
        let id = self
            .scheduler
            .schedule_repeating(self.settings.autoplay_interval);
        self.autoplay = Some(id);
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay.take() {
            self.scheduler.cancel(id);
        }
    }

    /// A tick from a timer that has since been replaced is dropped.
    pub fn on_tick(&mut self, timer: TimerId) {
        if self.autoplay != Some(timer) {
            trace!(%timer, "stale autoplay tick ignored");
            return;
        }
        self.advance(Direction::Next);
    }

    pub fn click(&mut self, direction: Direction) {
        if !self.controls.has(direction) {
            debug!(?direction, "click on a control that is not on the page");
            return;
        }
        self.navigate(direction);
    }

    pub fn key_down(&mut self, key: &Key) {
        if let Some(direction) = key.direction() {
            self.navigate(direction);
        }
    }

    pub fn pointer_enter(&mut self) {
        self.stop_autoplay();
    }

    pub fn pointer_leave(&mut self) {
        self.start_autoplay();
    }

    pub fn touch_start(&mut self, x: f32) {
        self.swipe.on_start(x);
        self.stop_autoplay();
    }

    pub fn touch_end(&mut self, x: f32) {
        if let Some(direction) = self.swipe.on_end(x) {
            self.advance(direction);
        }
        self.start_autoplay();
    }

    pub fn handle(&mut self, event: CarouselEvent) {
        match event {
            CarouselEvent::Tick(timer) => self.on_tick(timer),
            CarouselEvent::Click(direction) => self.click(direction),
            CarouselEvent::KeyDown(key) => self.key_down(&key),
            CarouselEvent::PointerEnter => self.pointer_enter(),
            CarouselEvent::PointerLeave => self.pointer_leave(),
            CarouselEvent::TouchStart { x } => self.touch_start(x),
            CarouselEvent::TouchEnd { x } => self.touch_end(x),
        }
    }

    fn navigate(&mut self, direction: Direction) {
        self.stop_autoplay();
        self.advance(direction);
        self.start_autoplay();
    }
}
