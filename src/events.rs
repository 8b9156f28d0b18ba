use theme_toggle::Theme;

use crate::autoplay::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::ArrowLeft => Some(Direction::Previous),
            Self::ArrowRight => Some(Direction::Next),
            Self::Other(_) => None,
        }
    }
}

/// Everything the carousel reacts to, delivered one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    Tick(TimerId),
    Click(Direction),
    KeyDown(Key),
    PointerEnter,
    PointerLeave,
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommand {
    Toggle,
    Set(Theme),
    SystemChanged(Theme),
    FollowSystem,
}
