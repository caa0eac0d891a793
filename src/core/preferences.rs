//! Host preference sources, re-read on every translation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;

use crate::core::errors::Result;
use crate::core::models::{EngineConfig, EngineParameters, TranslationMode};

/// Snapshot of the translation preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Which fields get translated
    pub mode: TranslationMode,
    /// Engine identifier passed to the API
    pub engine: String,
    /// Unparsed `key=value,...` parameter table
    pub engine_parameters: String,
}

impl Preferences {
    /// Engine and parsed parameters for one call
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            engine: self.engine.clone(),
            parameters: EngineParameters::parse(&self.engine_parameters),
        }
    }
}

/// Read-only view of the host's preference storage.
///
/// Implementations must return the current values on every call; the
/// translator never caches them.
pub trait PreferenceStore: Send + Sync {
    /// Current preferences
    fn load(&self) -> Preferences;
}

/// In-memory preferences that can be changed at runtime
#[derive(Debug, Default)]
pub struct StaticPreferences {
    inner: RwLock<Preferences>,
}

impl StaticPreferences {
    /// Start from `prefs`
    pub fn new(prefs: Preferences) -> Self {
        Self {
            inner: RwLock::new(prefs),
        }
    }

    /// Change the translation mode
    pub fn set_mode(&self, mode: TranslationMode) {
        self.write(|prefs| prefs.mode = mode);
    }

    /// Change the engine
    pub fn set_engine(&self, engine: impl Into<String>) {
        let engine = engine.into();
        self.write(|prefs| prefs.engine = engine);
    }

    /// Replace the parameter table
    pub fn set_engine_parameters(&self, table: impl Into<String>) {
        let table = table.into();
        self.write(|prefs| prefs.engine_parameters = table);
    }

    fn write(&self, f: impl FnOnce(&mut Preferences)) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }
}

impl PreferenceStore for StaticPreferences {
    fn load(&self) -> Preferences {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Preference keys, shared by the file and (uppercased) the environment
const KEY_MODE: &str = "translation_mode";
const KEY_ENGINE: &str = "translation_engine";
const KEY_ENGINE_PARAMETERS: &str = "translation_engine_parameters";

/// Raw string values as they appear in the preference file
#[derive(Debug, Deserialize)]
struct RawPreferences {
    translation_mode: String,
    translation_engine: String,
    translation_engine_parameters: String,
}

/// Preferences backed by a TOML/JSON/YAML file plus environment overrides.
///
/// Keys are `translation_mode`, `translation_engine` and
/// `translation_engine_parameters`; `TRANSLATION_MODE`,
/// `TRANSLATION_ENGINE` and `TRANSLATION_ENGINE_PARAMETERS` override them.
/// The file is read again on every [`PreferenceStore::load`], so edits take
/// effect without a restart.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    use_env: bool,
}

impl FilePreferences {
    /// Preferences read from `path`, with environment overrides
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            use_env: true,
        }
    }

    /// Ignore environment overrides
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// File the preferences are read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Preferences> {
        let mut builder = config::Config::builder()
            .set_default(KEY_MODE, TranslationMode::Disabled.to_string())?
            .set_default(KEY_ENGINE, "")?
            .set_default(KEY_ENGINE_PARAMETERS, "")?
            .add_source(config::File::from(self.path.as_path()).required(false));

        if self.use_env {
            builder = builder
                .add_source(config::Environment::with_prefix("TRANSLATION").keep_prefix(true));
        }

        let raw: RawPreferences = builder.build()?.try_deserialize()?;

        let mode = raw.translation_mode.parse().unwrap_or_else(|e| {
            warn!("Invalid translation mode in {}: {}", self.path.display(), e);
            TranslationMode::Disabled
        });

        Ok(Preferences {
            mode,
            engine: raw.translation_engine,
            engine_parameters: raw.translation_engine_parameters,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Preferences {
        self.read().unwrap_or_else(|e| {
            warn!("Failed to read preferences from {}: {}", self.path.display(), e);
            Preferences::default()
        })
    }
}
