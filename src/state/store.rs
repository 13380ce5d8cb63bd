use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::codec::{self, CodecError};
use super::schema::{DEFAULT_STORE_NAME, FlagRecord, FlyState, STORE_EXTENSION};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to read store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to write store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// In-memory map from player name to [`FlyState`].
///
/// A missing key and a key stored as `Disabled` read the same through
/// [`StateStore::get`], but stay distinct in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStore {
    entries: BTreeMap<String, FlyState>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored state, or `Disabled` for unknown ids.
    pub fn get(&self, id: &str) -> FlyState {
        self.lookup(id).unwrap_or_default()
    }

    /// Returns the stored state without applying the default.
    pub fn lookup(&self, id: &str) -> Option<FlyState> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn set(&mut self, id: impl Into<String>, state: FlyState) {
        let id = id.into();
        debug!(player = %id, state = %state, "Fly state updated");
        self.entries.insert(id, state);
    }

    pub fn remove(&mut self, id: &str) -> Option<FlyState> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored records in id order.
    pub fn records(&self) -> impl Iterator<Item = FlagRecord> + '_ {
        self.entries.iter().map(|(id, state)| FlagRecord {
            id: id.clone(),
            state: *state,
        })
    }

    /// Load a store from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No store file found, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let entries: BTreeMap<String, FlyState> =
            codec::decode(&bytes).map_err(|source| LoadError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), count = entries.len(), "Store loaded");
        Ok(Self { entries })
    }

    /// Write the full map to `path` via a temp file and rename.
    ///
    /// The parent directory must already exist.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let io_err = |source: io::Error| SaveError::Io {
            path: path.to_path_buf(),
            source,
        };

        let bytes = codec::encode(&self.entries)
            .map_err(|err| io_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;

        let temp_path = temp_path_for(path);
        if let Err(err) = write_synced(&temp_path, &bytes) {
            discard_temp(&temp_path);
            return Err(io_err(err));
        }

        if let Err(err) = fs::rename(&temp_path, path) {
            discard_temp(&temp_path);
            return Err(io_err(err));
        }

        info!(path = %path.display(), count = self.entries.len(), "Store persisted");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn discard_temp(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "Failed to remove temp store file");
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_STORE_NAME));
    name.push(".tmp");
    path.with_file_name(name)
}

/// A store bound to its snapshot location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    pub fn in_dir(dir: &Path, store_name: &str) -> Self {
        Self::with_path(dir.join(format!("{store_name}.{STORE_EXTENSION}")))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StateStore, LoadError> {
        StateStore::load(&self.path)
    }

    pub fn save(&self, store: &StateStore) -> Result<(), SaveError> {
        store.save(&self.path)
    }
}
