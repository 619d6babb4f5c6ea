use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::{fs, io};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StoreError};

fn read_data(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    match serde_json::from_str(&contents) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::warn!(
                "{} is not valid json ({}), starting from an empty store",
                path.display(),
                e
            );
            Ok(BTreeMap::new())
        }
    }
}

fn write_data(path: &Path, data: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let serialized_data = serde_json::to_string_pretty(data)?;
    // an interrupted write leaves the previous file intact
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(serialized_data.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(io::Error::from)?;
    Ok(())
}

/// Keeps every key in one json object on disk.
///
/// The whole file is rewritten on each `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing or malformed file is an empty
    /// store; the file is (re)written on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = read_data(&path)?;
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = write_data(&self.path, &self.values) {
            // keep memory in step with what is on disk
            match previous {
                Some(previous) => self.values.insert(key.to_string(), previous),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
