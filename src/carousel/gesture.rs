use tracing::debug;

use crate::events::Direction;

/// Tracks one horizontal touch gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold_px: f32,
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            start_x: None,
        }
    }

    pub fn threshold_px(&self) -> f32 {
        self.threshold_px
    }

    pub fn in_progress(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn on_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. Moving left past the threshold means "next",
    /// moving right means "previous"; shorter moves resolve to nothing.
    pub fn on_end(&mut self, x: f32) -> Option<Direction> {
        let Some(start) = self.start_x.take() else {
            debug!(end_x = x, "touch end without a start");
            return None;
        };
        let delta = start - x;
        if !delta.is_finite() || delta.abs() <= self.threshold_px {
            debug!(delta, threshold = self.threshold_px, "swipe below threshold");
            return None;
        }
        if delta > 0.0 {
            Some(Direction::Next)
        } else {
            Some(Direction::Previous)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_left_goes_next() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.on_start(300.0);
        assert_eq!(tracker.on_end(200.0), Some(Direction::Next));
    }

    #[test]
    fn swipe_right_goes_previous() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.on_start(100.0);
        assert_eq!(tracker.on_end(151.0), Some(Direction::Previous));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut tracker = SwipeTracker::new(50.0);
        for (end, expected) in [
            (151.0, None),
            (150.0, None),
            (149.0, Some(Direction::Next)),
            (249.0, None),
            (250.0, None),
            (251.0, Some(Direction::Previous)),
        ] {
            tracker.on_start(200.0);
            assert_eq!(tracker.on_end(end), expected, "end at {end}");
        }
    }

    #[test]
    fn gesture_state_resets_after_end() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.on_start(0.0);
        assert!(tracker.in_progress());
        assert_eq!(tracker.on_end(-100.0), Some(Direction::Next));
        assert!(!tracker.in_progress());
        assert_eq!(tracker.on_end(-300.0), None);
    }
}
