//! Storage Backend Module
//!
//! Key-value persistence primitive behind the durable cache. The backend is
//! injectable so tests can point it at a scratch directory and non-standard
//! environments can run with persistence disabled entirely.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

// == Storage Backend ==
/// Minimal key-value persistence contract: read, write, remove, enumerate.
///
/// Keys are opaque strings; values are serialized text. Implementations must
/// tolerate concurrent use from a single process.
pub trait StorageBackend: Send + Sync {
    /// Reads the stored text for `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, overwriting any previous value.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removes `key`; missing keys are ignored.
    fn remove(&self, key: &str);

    /// Enumerates every stored key.
    fn keys(&self) -> Vec<String>;
}

// == File Store ==
/// Filesystem-backed storage: one JSON file per key inside a cache
/// directory (`~/.cache/eco-tracker/` on Linux by default).
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where entries are stored
    dir: PathBuf,
}

impl FileStore {
    // == Constructor ==
    /// Opens the XDG-compliant cache directory for this application.
    ///
    /// Returns `None` when no home directory can be determined, in which
    /// case the durable tier runs disabled.
    pub fn open() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "eco-tracker")?;
        Some(Self {
            dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a store rooted at a specific directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.ensure_dir()?;
        fs::write(self.entry_path(key), value)
    }

    fn remove(&self, key: &str) {
        if let Err(err) = fs::remove_file(self.entry_path(key)) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove cache file for '{}': {}", key, err);
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        let Ok(dir) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        dir.filter_map(|entry| {
            let name = entry.ok()?.file_name();
            let name = name.to_str()?;
            name.strip_suffix(".json").map(|key| key.to_string())
        })
        .collect()
    }
}
