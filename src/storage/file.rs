use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use uuid::Uuid;

use super::{LocalStorage, StorageError, StorageResult};

/// JSON file backed storage.
///
/// Every operation goes back to the file: a change re-reads it, applies the one key and writes
/// the merged map through a temporary file and a rename, so keys changed by another process (a
/// logout in a second terminal) are not reverted and a crash never leaves a half written file.
/// The in-memory copy only follows what is on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let items = load(&path)?;

        tracing::debug!("opened storage at {} ({} keys)", path.display(), items.len());
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to the current file contents and writes them back. Memory is only
    /// updated once the write went through.
    fn modify<F>(&self, change: F) -> StorageResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        let mut fresh = load(&self.path)?;
        if change(&mut fresh) {
            persist(&self.path, &fresh)?;
        }
        *items = fresh;
        Ok(())
    }
}

fn load(path: &Path) -> StorageResult<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    Ok(serde_json::from_str(&contents)?)
}

fn persist(path: &Path, items: &BTreeMap<String, String>) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    let content = serde_json::to_string_pretty(items)?;
    let written = File::create(&temp).and_then(|mut f| {
        f.write_all(content.as_bytes())?;
        f.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    Ok(())
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        *items = load(&self.path)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.modify(|items| items.remove(key).is_some())
    }
}
