use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::carousel::Easing;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Delay between automatic advances.
    #[serde(with = "humantime_serde")]
    pub autoplay_interval: Duration,
    /// Horizontal travel a touch must exceed to count as a swipe.
    pub swipe_threshold_px: f32,
    /// Animation used when moving between slides.
    pub transition: TransitionConfig,
    /// CSS selectors locating the carousel parts in the page.
    pub selectors: Selectors,
    /// Theme toggle persistence.
    pub theme: ThemeConfig,
    /// Capacity of the bounded event queues between tasks.
    pub event_queue_depth: usize,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.autoplay_interval > Duration::ZERO,
            "autoplay-interval must be positive"
        );
        ensure!(
            self.swipe_threshold_px.is_finite() && self.swipe_threshold_px >= 0.0,
            "swipe-threshold-px must be a finite, non-negative number"
        );
        ensure!(
            self.event_queue_depth > 0,
            "event-queue-depth must be greater than zero"
        );
        self.transition
            .validate(self.autoplay_interval)
            .context("invalid transition configuration")?;
        self.selectors
            .validate()
            .context("invalid selectors configuration")?;
        ensure!(
            !self.theme.storage_path.as_os_str().is_empty(),
            "theme.storage-path must not be empty"
        );
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(5_000),
            swipe_threshold_px: 50.0,
            transition: TransitionConfig::default(),
            selectors: Selectors::default(),
            theme: ThemeConfig::default(),
            event_queue_depth: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct TransitionConfig {
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    fn validate(&self, autoplay_interval: Duration) -> Result<()> {
        ensure!(
            self.duration <= autoplay_interval,
            "transition.duration ({}) must not exceed autoplay-interval ({})",
            humantime::format_duration(self.duration),
            humantime::format_duration(autoplay_interval)
        );
        Ok(())
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            easing: Easing::Ease,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Selectors {
    pub track: String,
    pub slide: String,
    pub previous: String,
    pub next: String,
}

impl Selectors {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("track", &self.track),
            ("slide", &self.slide),
            ("previous", &self.previous),
            ("next", &self.next),
        ] {
            ensure!(
                !value.trim().is_empty(),
                "selectors.{name} must not be empty"
            );
        }
        Ok(())
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            track: ".carousel-track".to_string(),
            slide: ".carousel-slide".to_string(),
            previous: ".carousel-btn.prev".to_string(),
            next: ".carousel-btn.next".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// JSON file remembering an explicit light/dark choice.
    pub storage_path: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("theme.json"),
        }
    }
}
