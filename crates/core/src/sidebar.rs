use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, StoreError};

/// Per-user state directory name under the home directory
pub const STATE_DIR_NAME: &str = ".dashchat";

/// File holding remembered sidebar widths, keyed by sidebar id
pub const WIDTHS_FILE: &str = "sidebar_widths.json";

/// Resolve the state directory (`DASHCHAT_STATE_DIR` or `~/.dashchat`)
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(custom) = env::var("DASHCHAT_STATE_DIR")
        && !custom.trim().is_empty()
    {
        return Ok(PathBuf::from(custom));
    }

    let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    Ok(home.join(STATE_DIR_NAME))
}

/// Remembers the user-chosen width of each resizable sidebar.
///
/// Widths are in terminal columns. Implementations never clamp; bounds are
/// the caller's concern.
pub trait WidthStore: Send + Sync {
    fn load(&self, id: &str) -> Result<Option<u16>>;
    fn save(&self, id: &str, width: u16) -> Result<()>;
}

/// In-process store, used by tests and when no state directory is available
#[derive(Debug, Default)]
pub struct MemoryWidthStore {
    widths: Mutex<BTreeMap<String, u16>>,
}

impl MemoryWidthStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WidthStore for MemoryWidthStore {
    fn load(&self, id: &str) -> Result<Option<u16>> {
        let widths = self.widths.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(widths.get(id).copied())
    }

    fn save(&self, id: &str, width: u16) -> Result<()> {
        let mut widths = self.widths.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        widths.insert(id.to_string(), width);
        Ok(())
    }
}

/// JSON map of `id -> width` stored on disk.
///
/// A missing file reads as empty. Writes rewrite the whole map.
#[derive(Debug, Clone)]
pub struct FileWidthStore {
    path: PathBuf,
}

impl FileWidthStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<state_dir>/sidebar_widths.json`
    pub fn in_state_dir() -> Result<Self> {
        Ok(Self::new(state_dir()?.join(WIDTHS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u16>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt { path: self.path.clone(), reason: e.to_string() }.into())
    }
}

impl WidthStore for FileWidthStore {
    fn load(&self, id: &str) -> Result<Option<u16>> {
        Ok(self.read_all()?.get(id).copied())
    }

    fn save(&self, id: &str, width: u16) -> Result<()> {
        // Unreadable files are replaced rather than blocking the resize.
        let mut widths = self.read_all().unwrap_or_default();
        widths.insert(id.to_string(), width);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        }

        let json = serde_json::to_string_pretty(&widths)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write { path: self.path.clone(), source })?;

        tracing::debug!(id, width, path = %crate::logging::sanitize_path(&self.path), "saved sidebar width");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryWidthStore::new();
        assert_eq!(store.load("ai-chat").unwrap(), None);

        store.save("ai-chat", 64).unwrap();
        store.save("filters", 30).unwrap();
        assert_eq!(store.load("ai-chat").unwrap(), Some(64));
        assert_eq!(store.load("filters").unwrap(), Some(30));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileWidthStore::new(temp.path().join("widths.json"));
        assert_eq!(store.load("ai-chat").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("widths.json");

        FileWidthStore::new(&path).save("ai-chat", 72).unwrap();
        FileWidthStore::new(&path).save("filters", 28).unwrap();

        let store = FileWidthStore::new(&path);
        assert_eq!(store.load("ai-chat").unwrap(), Some(72));
        assert_eq!(store.load("filters").unwrap(), Some(28));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"ai-chat\": 72"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("widths.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileWidthStore::new(&path);
        let err = store.load("ai-chat").unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Corrupt { .. })));

        store.save("ai-chat", 50).unwrap();
        assert_eq!(store.load("ai-chat").unwrap(), Some(50));
    }
}
