//! Byte retrieval and object storage collaborators.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{PortalError, Result};

/// Fetches raw file bytes by identifier (a URL, key or path).
pub trait FileSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>>;
}

/// Stores bytes under a key and hands back a servable URL.
pub trait ObjectStore {
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<String>;

    /// Remove the object behind a URL previously returned by [`ObjectStore::put`].
    fn delete(&mut self, url: &str) -> Result<()>;
}

/// In-memory store. URLs are `{base_url}/{key}`.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    base_url: String,
    objects: BTreeMap<String, Vec<u8>>,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: BTreeMap::new(),
        }
    }

    fn key_of<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .strip_prefix(self.base_url.as_str())
            .map_or(identifier, |rest| rest.trim_start_matches('/'))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.objects.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<String> {
        self.objects.insert(key.to_string(), bytes.to_vec());
        Ok(format!("{}/{key}", self.base_url))
    }

    fn delete(&mut self, url: &str) -> Result<()> {
        let key = self.key_of(url).to_string();
        self.objects
            .remove(&key)
            .map(|_| ())
            .ok_or(PortalError::NotFound { kind: "object", name: key })
    }
}

impl FileSource for MemoryObjectStore {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>> {
        let key = self.key_of(identifier);
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| PortalError::Fetch(format!("no object at {identifier}")))
    }
}

/// Store rooted at a local directory. URLs are the written file paths.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys are relative; `..` and absolute components are rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let rel = Path::new(key);
        if key.is_empty()
            || rel
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(PortalError::Invalid(format!("object key '{key}'")));
        }
        Ok(self.root.join(rel))
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn delete(&mut self, url: &str) -> Result<()> {
        std::fs::remove_file(url)?;
        Ok(())
    }
}

/// Reads local files; identifiers are paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(identifier)?)
    }
}

impl FileSource for FsObjectStore {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(identifier)?)
    }
}
