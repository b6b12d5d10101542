//! Admin operations: client files and result presets.

use crate::config::ViewerConfig;
use crate::error::{PortalError, Result};
use crate::view::PresetCatalog;

use super::directory::{ClientDirectory, ClientFile};
use super::storage::ObjectStore;

/// A file chosen for upload.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub original_name: &'a str,
    pub bytes: &'a [u8],
}

pub struct AdminConsole<D, S> {
    directory: D,
    store: S,
    config: ViewerConfig,
}

impl<D: ClientDirectory, S: ObjectStore> AdminConsole<D, S> {
    pub fn new(directory: D, store: S, config: ViewerConfig) -> Self {
        Self {
            directory,
            store,
            config,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (D, S) {
        (self.directory, self.store)
    }

    /// Store a file for a client under its display name.
    ///
    /// Nothing is stored when the file is missing or the display name is blank.
    pub fn upload(
        &mut self,
        client_id: &str,
        file: Option<Upload<'_>>,
        display_name: &str,
    ) -> Result<ClientFile> {
        let Some(file) = file else {
            return Err(PortalError::Invalid("Please select a file.".into()));
        };
        let name = display_name.trim();
        if name.is_empty() {
            return Err(PortalError::Invalid("Please enter a file name.".into()));
        }
        // Resolve the client before writing any bytes.
        self.directory.get(client_id)?;

        let key = self.config.file_key(client_id, file.original_name);
        let url = self.store.put(&key, file.bytes)?;
        let record = ClientFile {
            name: name.to_string(),
            url,
            original_name: file.original_name.to_string(),
        };
        self.directory.add_file(client_id, record.clone())?;
        log::info!("uploaded {key} for {client_id} as '{name}'");
        Ok(record)
    }

    /// Delete the stored object, then the client's record of it.
    pub fn delete_file(&mut self, client_id: &str, url: &str) -> Result<ClientFile> {
        let known = self
            .directory
            .get(client_id)?
            .files
            .iter()
            .any(|f| f.url == url);
        if !known {
            return Err(PortalError::NotFound {
                kind: "file",
                name: url.to_string(),
            });
        }
        self.store.delete(url)?;
        let removed = self.directory.remove_file(client_id, url)?;
        log::info!("deleted {url} for {client_id}");
        Ok(removed)
    }

    /// The client's saved presets.
    pub fn result_presets(&self, client_id: &str) -> Result<PresetCatalog> {
        let record = self.directory.get(client_id)?;
        Ok(PresetCatalog::from_settings(&record.result_settings))
    }

    pub fn save_result_presets(&mut self, client_id: &str, presets: &PresetCatalog) -> Result<()> {
        self.directory
            .save_result_settings(client_id, presets.to_settings())?;
        log::info!("saved {} result presets for {client_id}", presets.len());
        Ok(())
    }

    /// Add a blank preset and save. Returns its key.
    pub fn add_result(&mut self, client_id: &str) -> Result<String> {
        let mut presets = self.result_presets(client_id)?;
        let key = presets.add("", Vec::new());
        self.save_result_presets(client_id, &presets)?;
        Ok(key)
    }

    pub fn update_result(
        &mut self,
        client_id: &str,
        key: &str,
        sheet_name: &str,
        hidden_columns: Vec<u32>,
    ) -> Result<()> {
        let mut presets = self.result_presets(client_id)?;
        presets.update(key, sheet_name, hidden_columns)?;
        self.save_result_presets(client_id, &presets)
    }
}
