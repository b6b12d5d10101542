//! Client records: contact email, uploaded files and saved result settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};
use crate::view::ResultSetting;

/// A file uploaded for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFile {
    /// Display name chosen by the admin
    pub name: String,
    pub url: String,
    pub original_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRecord {
    pub id: String,
    pub email: String,
    pub files: Vec<ClientFile>,
    pub result_settings: BTreeMap<String, ResultSetting>,
}

/// Storage for client records.
pub trait ClientDirectory {
    fn list(&self) -> Vec<&ClientRecord>;

    fn get(&self, client_id: &str) -> Result<&ClientRecord>;

    /// Create a client, returning its id.
    fn add_client(&mut self, email: &str) -> Result<String>;

    fn update_email(&mut self, client_id: &str, email: &str) -> Result<()>;

    fn delete_client(&mut self, client_id: &str) -> Result<ClientRecord>;

    fn add_file(&mut self, client_id: &str, file: ClientFile) -> Result<()>;

    /// Drop the file record with this URL.
    fn remove_file(&mut self, client_id: &str, url: &str) -> Result<ClientFile>;

    fn save_result_settings(
        &mut self,
        client_id: &str,
        settings: BTreeMap<String, ResultSetting>,
    ) -> Result<()>;
}

fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(PortalError::Invalid(format!("email address '{email}'")));
    }
    Ok(email.to_string())
}

fn client_not_found(id: &str) -> PortalError {
    PortalError::NotFound {
        kind: "client",
        name: id.to_string(),
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DirectoryFile {
    next_id: u64,
    clients: BTreeMap<String, ClientRecord>,
}

/// Directory kept in memory and optionally persisted as a JSON document.
///
/// A directory opened from a file writes the whole document back after every change.
#[derive(Debug, Default)]
pub struct JsonDirectory {
    data: DirectoryFile,
    path: Option<PathBuf>,
}

impl JsonDirectory {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a directory file. A missing file starts an empty directory at that path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DirectoryFile::default(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("opened client directory {} ({} clients)", path.display(), data.clients.len());
        Ok(Self {
            data,
            path: Some(path),
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the directory back to its file. No-op for an in-memory directory.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(path, json)?;
        log::debug!("saved client directory {}", path.display());
        Ok(())
    }

    fn record_mut(&mut self, client_id: &str) -> Result<&mut ClientRecord> {
        self.data
            .clients
            .get_mut(client_id)
            .ok_or_else(|| client_not_found(client_id))
    }
}

impl ClientDirectory for JsonDirectory {
    fn list(&self) -> Vec<&ClientRecord> {
        self.data.clients.values().collect()
    }

    fn get(&self, client_id: &str) -> Result<&ClientRecord> {
        self.data
            .clients
            .get(client_id)
            .ok_or_else(|| client_not_found(client_id))
    }

    fn add_client(&mut self, email: &str) -> Result<String> {
        let email = validate_email(email)?;
        self.data.next_id = self.data.next_id.saturating_add(1);
        let id = format!("client-{}", self.data.next_id);
        self.data.clients.insert(
            id.clone(),
            ClientRecord {
                id: id.clone(),
                email,
                ..ClientRecord::default()
            },
        );
        self.save()?;
        Ok(id)
    }

    fn update_email(&mut self, client_id: &str, email: &str) -> Result<()> {
        let email = validate_email(email)?;
        self.record_mut(client_id)?.email = email;
        self.save()
    }

    fn delete_client(&mut self, client_id: &str) -> Result<ClientRecord> {
        let record = self
            .data
            .clients
            .remove(client_id)
            .ok_or_else(|| client_not_found(client_id))?;
        self.save()?;
        Ok(record)
    }

    fn add_file(&mut self, client_id: &str, file: ClientFile) -> Result<()> {
        self.record_mut(client_id)?.files.push(file);
        self.save()
    }

    fn remove_file(&mut self, client_id: &str, url: &str) -> Result<ClientFile> {
        let record = self.record_mut(client_id)?;
        let pos = record
            .files
            .iter()
            .position(|f| f.url == url)
            .ok_or_else(|| PortalError::NotFound {
                kind: "file",
                name: url.to_string(),
            })?;
        let removed = record.files.remove(pos);
        self.save()?;
        Ok(removed)
    }

    fn save_result_settings(
        &mut self,
        client_id: &str,
        settings: BTreeMap<String, ResultSetting>,
    ) -> Result<()> {
        self.record_mut(client_id)?.result_settings = settings;
        self.save()
    }
}
