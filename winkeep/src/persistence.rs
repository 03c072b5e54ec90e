use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use winkeep_proto::WindowSnapshot;

use crate::error::{Error, Result};

const APP_DIR: &str = "winkeep";
const RECORD_FILE: &str = "window-state.json";

/// Default location of the persisted record.
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(RECORD_FILE)
}

/// Storage for the single persisted window record.
/// The blob is opaque to the store.
pub trait SnapshotStore {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;
    /// Replaces the previous record entirely.
    fn save(&self, blob: &str) -> Result<()>;
}

pub fn decode_snapshot(blob: &str) -> Result<WindowSnapshot> {
    WindowSnapshot::from_json(blob).map_err(Error::MalformedSnapshot)
}

pub fn encode_snapshot(snapshot: &WindowSnapshot) -> Result<String> {
    Ok(snapshot.to_json()?)
}

/// Record stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the record so the next start is a first run.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn unavailable(&self, source: io::Error) -> Error {
        Error::PersistenceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(default_store_path())
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
            }
        }

        // Write to a sibling file first so a crash never leaves half a record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(|e| self.unavailable(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.unavailable(e))?;
        tracing::debug!("Wrote window state to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store shared between clones. Can be switched into a failing
/// mode to simulate an unavailable backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Rc<RefCell<Option<String>>>,
    failing: Rc<Cell<bool>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::default();
        *store.blob.borrow_mut() = Some(blob.into());
        store
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.get() {
            return Err(Error::PersistenceUnavailable {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("memory store is failing"),
            });
        }
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.blob())
    }

    fn save(&self, blob: &str) -> Result<()> {
        self.check_available()?;
        *self.blob.borrow_mut() = Some(blob.to_string());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
