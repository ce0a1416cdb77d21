// SPDX-License-Identifier: GPL-3.0-only
//! Persisted user settings with defaults merged in on every read.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::models::settings::{Settings, SettingsUpdate, StoredSettings};
use crate::validation::{Validate, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings storage is unavailable")]
    Unavailable,
}

/// Where the raw stored values live.
pub trait SettingsBackend: Send + Sync {
    /// Read everything currently stored. A store that was never written
    /// returns [`StoredSettings::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn read(&self) -> Result<StoredSettings, StorageError>;

    /// Replace the stored values.
    ///
    /// # Errors
    ///
    /// Returns an error if the values cannot be persisted.
    fn write(&self, stored: &StoredSettings) -> Result<(), StorageError>;
}

/// TOML file under the user's config directory.
#[derive(Debug, Clone)]
pub struct TomlFileBackend {
    path: PathBuf,
}

impl TomlFileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/organaizer/settings.toml`
    #[must_use]
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".config")
            })
            .join("organaizer");

        config_dir.join("settings.toml")
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TomlFileBackend {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl SettingsBackend for TomlFileBackend {
    fn read(&self) -> Result<StoredSettings, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Settings file {} not found", self.path.display());
                return Ok(StoredSettings::default());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, stored: &StoredSettings) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let toml_content = toml::to_string_pretty(stored)?;
        fs::write(&self.path, toml_content).map_err(io_err)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Process-local store, used by tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: Mutex<StoredSettings>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(stored: StoredSettings) -> Self {
        Self {
            stored: Mutex::new(stored),
        }
    }

    /// Snapshot of the raw stored values.
    #[must_use]
    pub fn snapshot(&self) -> StoredSettings {
        self.stored
            .lock()
            .map(|stored| stored.clone())
            .unwrap_or_default()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self) -> Result<StoredSettings, StorageError> {
        self.stored
            .lock()
            .map(|stored| stored.clone())
            .map_err(|_| StorageError::Unavailable)
    }

    fn write(&self, stored: &StoredSettings) -> Result<(), StorageError> {
        let mut guard = self.stored.lock().map_err(|_| StorageError::Unavailable)?;
        *guard = stored.clone();
        Ok(())
    }
}

/// Settings access for every surface. Holds no cached copy: each `load`
/// reads the backend, so concurrent writers are last-write-wins.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by the default TOML file.
    #[must_use]
    pub fn from_default_path() -> Self {
        Self::new(Arc::new(TomlFileBackend::default()))
    }

    /// Store backed by memory, seeded with `stored`.
    #[must_use]
    pub fn in_memory(stored: StoredSettings) -> Self {
        Self::new(Arc::new(MemoryBackend::new(stored)))
    }

    /// Stored values merged over the defaults. An unreadable store yields the defaults.
    #[must_use]
    pub fn load(&self) -> Settings {
        match self.backend.read() {
            Ok(stored) => Settings::merged(&stored),
            Err(e) => {
                warn!("Failed to load settings: {e}. Using defaults.");
                Settings::default()
            }
        }
    }

    /// Validate and write only the fields present in `update`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Validation`] when any provided field is invalid
    /// (nothing is written), or a backend error if reading or writing fails.
    pub fn save(&self, update: &SettingsUpdate) -> Result<(), StorageError> {
        update.validate()?;
        if update.is_empty() {
            return Ok(());
        }

        let mut stored = self.backend.read()?;
        stored.apply(update);
        self.backend.write(&stored)
    }

    /// Write both prompt defaults back.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the write fails.
    pub fn reset_prompts(&self) -> Result<(), StorageError> {
        self.save(&SettingsUpdate::default_prompts())
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{DEFAULT_API_URL, DEFAULT_SUMMARY_PROMPT};

    #[test]
    fn test_load_empty_store_returns_defaults() {
        let store = SettingsStore::in_memory(StoredSettings::default());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_save_writes_only_provided_fields() {
        let backend = Arc::new(MemoryBackend::new(StoredSettings {
            api_key: Some("old-key".to_string()),
            ..StoredSettings::default()
        }));
        let store = SettingsStore::new(backend.clone());

        store
            .save(&SettingsUpdate {
                api_url: Some(" http://10.0.0.2:8000 ".to_string()),
                ..SettingsUpdate::default()
            })
            .unwrap();

        let stored = backend.snapshot();
        assert_eq!(stored.api_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(stored.api_key.as_deref(), Some("old-key"));
        assert_eq!(stored.summary_prompt, None);
    }

    #[test]
    fn test_rejected_prompt_leaves_store_unchanged() {
        let backend = Arc::new(MemoryBackend::default());
        let store = SettingsStore::new(backend.clone());

        let result = store.save(&SettingsUpdate {
            api_key: Some("new-key".to_string()),
            summary_prompt: Some("Summarize everything".to_string()),
            ..SettingsUpdate::default()
        });

        assert!(matches!(
            result,
            Err(StorageError::Validation(ValidationError::MissingPlaceholder { .. }))
        ));
        assert_eq!(backend.snapshot(), StoredSettings::default());
        assert_eq!(store.load().summary_prompt, DEFAULT_SUMMARY_PROMPT);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let store = SettingsStore::in_memory(StoredSettings::default());
        let result = store.save(&SettingsUpdate {
            api_url: Some("localhost".to_string()),
            ..SettingsUpdate::default()
        });
        assert!(result.is_err());
        assert_eq!(store.load().api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_reset_prompts() {
        let store = SettingsStore::in_memory(StoredSettings {
            summary_prompt: Some("Short: {text}".to_string()),
            ..StoredSettings::default()
        });
        assert_eq!(store.load().summary_prompt, "Short: {text}");
        store.reset_prompts().unwrap();
        assert_eq!(store.load().summary_prompt, DEFAULT_SUMMARY_PROMPT);
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let store = SettingsStore::new(Arc::new(TomlFileBackend::new(&path)));

        assert_eq!(store.load(), Settings::default());
        store
            .save(&SettingsUpdate {
                dictation_language: Some("fr-FR".to_string()),
                ..SettingsUpdate::default()
            })
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("dictationLanguage = \"fr-FR\""));
        assert_eq!(store.load().dictation_language, "fr-FR");
    }

    #[test]
    fn test_unknown_keys_are_ignored_and_bad_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "apiKey = \"k\"\nlegacyTheme = \"dark\"\n").unwrap();
        let store = SettingsStore::new(Arc::new(TomlFileBackend::new(&path)));
        assert_eq!(store.load().api_key, "k");

        fs::write(&path, "apiKey = [broken").unwrap();
        assert_eq!(store.load(), Settings::default());
    }
}
