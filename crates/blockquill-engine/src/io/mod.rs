use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::Value;

/// Store key the document snapshot lives under
pub const CONTENT_KEY: &str = "content";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored content is malformed: {0}")]
    Malformed(anyhow::Error),
    #[error("Invalid storage directory: {0}")]
    InvalidStorageDir(PathBuf),
}

/// Key/value persistence port, shaped like browser local storage
pub trait ContentStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per item inside a directory
#[derive(Debug, Clone)]
pub struct FileContentStore {
    root: PathBuf,
}

impl FileContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl ContentStore for FileContentStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(StoreError::InvalidStorageDir(self.root.clone()));
        }
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.item_path(key);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, value)?;
        Ok(())
    }
}

/// In-process store; nothing touches disk
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for MemoryContentStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}

/// Last saved value, or the built-in initial value when nothing (or JSON
/// `null`) has been saved
pub fn load_content(store: &impl ContentStore) -> Result<Value, StoreError> {
    let stored = store.get_item(CONTENT_KEY)?;
    match stored.as_deref().map(str::trim) {
        None | Some("null") | Some("") => {
            log::info!("No saved content, starting from the initial value");
            Ok(Value::initial())
        }
        Some(json) => {
            let value = Value::from_json(json).map_err(StoreError::Malformed)?;
            log::info!("Loaded saved content ({} blocks)", value.block_count());
            Ok(value)
        }
    }
}

pub fn save_content(store: &impl ContentStore, value: &Value) -> Result<(), StoreError> {
    let json = value.to_json().map_err(StoreError::Malformed)?;
    store.set_item(CONTENT_KEY, &json)?;
    log::info!("Saved content ({} blocks)", value.block_count());
    Ok(())
}
