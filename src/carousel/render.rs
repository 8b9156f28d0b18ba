use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Ease,
    EaseInOut,
    Linear,
}

impl Easing {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Ease => "ease",
            Self::EaseInOut => "ease-in-out",
            Self::Linear => "linear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            easing: Easing::Ease,
        }
    }
}

/// Horizontal position of the track, as a percentage of its own width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset_percent: f64,
    /// `None` paints the new position without animating.
    pub transition: Option<Transition>,
}

impl Transform {
    pub fn for_slide(index: usize, len: usize, transition: Option<Transition>) -> Self {
        let step = 100.0 / len.max(1) as f64;
        Self {
            offset_percent: -(index as f64) * step,
            transition,
        }
    }

    pub fn css_transform(&self) -> String {
        // -0 would print as "-0%"
        let offset = if self.offset_percent == 0.0 {
            0.0
        } else {
            self.offset_percent
        };
        format!("translateX({}%)", trim_float(offset))
    }

    pub fn css_transition(&self) -> String {
        match self.transition {
            Some(t) => format!(
                "transform {}s {}",
                trim_float(t.duration.as_secs_f64()),
                t.easing.as_css()
            ),
            None => "none".to_string(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform: {}; transition: {}",
            self.css_transform(),
            self.css_transition()
        )
    }
}

fn trim_float(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// The element whose transform positions the slides.
pub trait Track {
    fn apply(&mut self, transform: &Transform);
}

/// Keeps every applied transform; the last one is what is on screen.
impl Track for Vec<Transform> {
    fn apply(&mut self, transform: &Transform) {
        self.push(*transform);
    }
}

/// Writes each transform to the log instead of a live element.
#[derive(Debug, Default)]
pub struct LogTrack {
    applied: usize,
}

impl LogTrack {
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl Track for LogTrack {
    fn apply(&mut self, transform: &Transform) {
        self.applied += 1;
        info!(
            transform = %transform.css_transform(),
            transition = %transform.css_transition(),
            "track repositioned"
        );
    }
}
