//! Session-scoped memo of the chosen background.
//!
//! The selector itself stays pure; [`SessionBackground`] wraps it with a
//! key-value store so repeat renders in one session show the same image.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{CoreError, Result};
use crate::period::{classify, Theme, TimePeriod};
use crate::selection::{choose_background, RandomSource, Selection, SelectionCatalog};

pub const KEY_BACKGROUND: &str = "selectedBackgroundImage";
pub const KEY_PERIOD: &str = "currentTimePeriod";
pub const KEY_THEME: &str = "currentTheme";

/// Minimal string key-value store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// In-process store; lives as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    ///
    /// A cache file that does not parse is treated as empty and overwritten on the
    /// next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "discarding corrupt session file"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(CoreError::Session(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Outcome of [`SessionBackground::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPick {
    pub selection: Selection,
    pub from_cache: bool,
}

/// Caches the first background chosen in a session.
pub struct SessionBackground<S> {
    store: S,
}

impl<S: SessionStore> SessionBackground<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Return the cached selection, or classify `now`, select and remember.
    ///
    /// A cached entry whose payload is no longer in `catalog` is discarded.
    pub fn resolve<R>(
        &mut self,
        catalog: &SelectionCatalog,
        now: DateTime<Utc>,
        timezone: &str,
        rng: &mut R,
    ) -> Result<SessionPick>
    where
        R: RandomSource + ?Sized,
    {
        if let Some(selection) = self.cached(catalog) {
            tracing::debug!(period = %selection.period, "reusing session background");
            return Ok(SessionPick {
                selection,
                from_cache: true,
            });
        }

        let period = classify(now, timezone)?;
        let selection = choose_background(catalog, period, rng)?;
        self.remember(&selection)?;
        Ok(SessionPick {
            selection,
            from_cache: false,
        })
    }

    /// Drop whatever the session remembered.
    pub fn forget(&mut self) -> Result<()> {
        self.store.clear()
    }

    fn cached(&self, catalog: &SelectionCatalog) -> Option<Selection> {
        let payload = self.store.get(KEY_BACKGROUND)?;
        let period: TimePeriod = self.store.get(KEY_PERIOD)?.parse().ok()?;
        let theme: Theme = self.store.get(KEY_THEME)?.parse().ok()?;
        let candidate = catalog
            .candidates(period)
            .iter()
            .find(|c| c.payload == payload)?
            .clone();
        Some(Selection {
            period,
            theme,
            candidate,
        })
    }

    fn remember(&mut self, selection: &Selection) -> Result<()> {
        self.store.set(KEY_BACKGROUND, &selection.candidate.payload)?;
        self.store.set(KEY_PERIOD, selection.period.as_str())?;
        self.store.set(KEY_THEME, selection.theme.as_str())?;
        Ok(())
    }
}
