use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::Theme;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("theme store io error: {0}")]
    Io(#[from] io::Error),

    #[error("theme store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence for an explicit theme choice.
pub trait ThemeStore {
    fn load(&self) -> Result<Option<Theme>, StoreError>;
    fn save(&mut self, theme: Theme) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StoredTheme {
    theme: Theme,
    updated_at: DateTime<Utc>,
}

/// JSON file holding the last explicit choice.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredTheme = serde_json::from_str(&raw)?;
        debug!(
            path = %self.path.display(),
            theme = %stored.theme,
            updated_at = %stored.updated_at.to_rfc3339(),
            "loaded stored theme"
        );
        Ok(Some(stored.theme))
    }

    fn save(&mut self, theme: Theme) -> Result<(), StoreError> {
        let stored = StoredTheme {
            theme,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryThemeStore {
    value: Option<Theme>,
}

impl MemoryThemeStore {
    pub fn with(theme: Theme) -> Self {
        Self { value: Some(theme) }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.value = Some(theme);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.value = None;
        Ok(())
    }
}
