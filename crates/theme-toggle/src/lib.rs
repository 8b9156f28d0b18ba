//! Dark/light theme state for the carousel page.
//!
//! The visible theme is the user's explicit choice when one was stored,
//! otherwise the system preference. Explicit choices are persisted through a
//! [`ThemeStore`] so they survive restarts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

mod store;

pub use store::{FileThemeStore, MemoryThemeStore, StoreError, ThemeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown theme `{0}` (expected `light` or `dark`)")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError(raw.to_string())),
        }
    }
}

/// Owns the theme state for one page.
///
/// Construct exactly one and hand it to whatever wires up input; there is no
/// process-wide registration.
pub struct ThemeController<S> {
    store: S,
    system: Theme,
    explicit: Option<Theme>,
}

impl<S: ThemeStore> ThemeController<S> {
    pub fn new(store: S, system: Theme) -> Self {
        let explicit = match store.load() {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "failed to read stored theme; following system preference");
                None
            }
        };
        debug!(?explicit, %system, "theme controller initialised");
        Self {
            store,
            system,
            explicit,
        }
    }

    pub fn current(&self) -> Theme {
        self.explicit.unwrap_or(self.system)
    }

    pub fn system(&self) -> Theme {
        self.system
    }

    pub fn explicit(&self) -> Option<Theme> {
        self.explicit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip the visible theme and remember it as an explicit choice.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        self.set(next)
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.explicit = Some(theme);
        if let Err(err) = self.store.save(theme) {
            warn!(error = %err, %theme, "failed to persist theme choice");
        }
        theme
    }

    /// Record a new system preference. Returns the new visible theme when it
    /// changed; an explicit choice masks system changes.
    pub fn system_changed(&mut self, system: Theme) -> Option<Theme> {
        let before = self.current();
        self.system = system;
        let after = self.current();
        (before != after).then_some(after)
    }

    /// Forget the explicit choice and go back to the system preference.
    pub fn follow_system(&mut self) -> Theme {
        self.explicit = None;
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear stored theme");
        }
        self.system
    }
}
