//! Store: the whole-document persistence facade
//!
//! Store is a cheap-clone handle over shared state. All clones see the
//! same documents; directory mode additionally writes every `set` through
//! to disk so a second process (or a restart) sees the same data.

use eventide_core::error::{Error, Result};
use eventide_core::types::Collection;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Store`]
///
/// ```
/// use eventide_store::Store;
///
/// let store = Store::builder().in_memory().open().unwrap();
/// assert!(!store.is_persistent());
/// ```
#[derive(Debug, Default)]
pub struct StoreBuilder {
    dir: Option<PathBuf>,
}

impl StoreBuilder {
    /// Keep documents only in memory
    pub fn in_memory(mut self) -> Self {
        self.dir = None;
        self
    }

    /// Write documents through to `<dir>/<key>.json`
    pub fn directory(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Open the store
    ///
    /// In directory mode the directory is created if missing. Existing
    /// files are not read here; parsing happens lazily on first access.
    pub fn open(self) -> Result<Store> {
        if let Some(dir) = &self.dir {
            fs::create_dir_all(dir)?;
        }
        Ok(Store {
            inner: Arc::new(StoreInner {
                cache: RwLock::new(HashMap::new()),
                dir: self.dir,
            }),
        })
    }
}

// =============================================================================
// Store
// =============================================================================

struct StoreInner {
    /// Parsed documents, keyed by collection storage key
    cache: RwLock<HashMap<&'static str, Value>>,
    /// Write-through directory; `None` means in-memory only
    dir: Option<PathBuf>,
}

/// Whole-document JSON store
///
/// Cheap-clone facade: holds only an `Arc` to shared state, safe to hand
/// to every layer. All operations are synchronous; a `set` has completed
/// (including the disk write in directory mode) when the call returns.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Start building a store
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Whether documents survive this process
    pub fn is_persistent(&self) -> bool {
        self.inner.dir.is_some()
    }

    fn path_for(&self, collection: Collection) -> Option<PathBuf> {
        self.inner
            .dir
            .as_ref()
            .map(|d| d.join(format!("{}.json", collection.key())))
    }

    /// Read a collection, or return `default` if it has never been written
    ///
    /// The absent case is not an error; every caller knows the empty shape
    /// of its collection. A document that exists but cannot be parsed (bad
    /// JSON, or JSON of the wrong shape for `T`) is [`Error::Corruption`].
    pub fn get<T: DeserializeOwned>(&self, collection: Collection, default: T) -> Result<T> {
        let key = collection.key();

        if let Some(value) = self.inner.cache.read().get(key) {
            return typed(collection, value.clone());
        }

        let Some(path) = self.path_for(collection) else {
            return Ok(default);
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection = %collection, "collection absent, using default");
                return Ok(default);
            }
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            warn!(collection = %collection, error = %e, "unparseable collection file");
            Error::corruption(key, e.to_string())
        })?;

        self.inner.cache.write().insert(key, value.clone());
        debug!(collection = %collection, "collection loaded from disk");
        typed(collection, value)
    }

    /// Replace a collection with `value`
    ///
    /// Serializes the whole document and, in directory mode, writes it to
    /// disk before returning. The write is temp-file-then-rename so a crash
    /// mid-write never leaves a half-written collection behind.
    pub fn set<T: Serialize>(&self, collection: Collection, value: &T) -> Result<()> {
        let key = collection.key();
        let json = serde_json::to_value(value)?;

        if let Some(path) = self.path_for(collection) {
            let raw = serde_json::to_string(&json)?;
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, raw)?;
            fs::rename(&tmp, &path)?;
        }

        self.inner.cache.write().insert(key, json);
        debug!(collection = %collection, "collection written");
        Ok(())
    }

    /// Remove a collection entirely
    ///
    /// Subsequent reads see the caller-supplied default again. Returns
    /// whether the collection existed; removing an absent one is a no-op.
    pub fn remove(&self, collection: Collection) -> Result<bool> {
        let cached = self.inner.cache.write().remove(collection.key()).is_some();
        let mut on_disk = false;
        if let Some(path) = self.path_for(collection) {
            match fs::remove_file(&path) {
                Ok(()) => on_disk = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        debug!(collection = %collection, "collection removed");
        Ok(cached || on_disk)
    }

    /// Whether a collection has ever been written
    pub fn contains(&self, collection: Collection) -> Result<bool> {
        if self.inner.cache.read().contains_key(collection.key()) {
            return Ok(true);
        }
        match self.path_for(collection) {
            Some(path) => Ok(path.exists()),
            None => Ok(false),
        }
    }
}

/// Parse a cached document into the caller's type
///
/// A shape mismatch is corruption too: the document exists but no longer
/// matches what the application writes.
fn typed<T: DeserializeOwned>(collection: Collection, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::corruption(collection.key(), e.to_string()))
}
