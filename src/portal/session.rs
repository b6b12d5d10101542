//! A client's presentation session: file list, the loaded workbook and its view.

use std::collections::HashMap;

use crate::config::ViewerConfig;
use crate::error::{PortalError, Result};
use crate::model::{SpreadsheetCodec, WorkbookModel, XlsxCodec};
use crate::render::render_view;
use crate::view::{PresetCatalog, ViewState};

use super::directory::{ClientDirectory, ClientFile};
use super::storage::{FileSource, ObjectStore};

pub const NO_FILES_MESSAGE: &str = "No files uploaded for this client";

fn loaded(model: Option<&WorkbookModel>) -> Result<&WorkbookModel> {
    model.ok_or_else(|| PortalError::Invalid("no file loaded".into()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct ClientSession<F, S> {
    client_id: String,
    files: Vec<ClientFile>,
    source: F,
    store: S,
    config: ViewerConfig,
    codec: Box<dyn SpreadsheetCodec>,
    status: SessionStatus,
    selected: Option<usize>,
    model: Option<WorkbookModel>,
    view: ViewState,
    /// Published URL per media index
    image_urls: HashMap<usize, String>,
}

impl<F: FileSource, S: ObjectStore> ClientSession<F, S> {
    /// Read the client's files and result presets from the directory.
    ///
    /// A client with no files gets a `Failed` session rather than an error.
    pub fn open<D: ClientDirectory + ?Sized>(
        directory: &D,
        client_id: &str,
        source: F,
        store: S,
        config: ViewerConfig,
    ) -> Result<Self> {
        let record = directory.get(client_id)?;
        let presets = PresetCatalog::from_settings(&record.result_settings);
        let status = if record.files.is_empty() {
            SessionStatus::Failed(NO_FILES_MESSAGE.to_string())
        } else {
            SessionStatus::Ready
        };
        log::debug!(
            "session for {client_id}: {} files, {} presets",
            record.files.len(),
            presets.len()
        );
        Ok(Self {
            client_id: client_id.to_string(),
            files: record.files.clone(),
            source,
            store,
            config,
            codec: Box::new(XlsxCodec),
            status,
            selected: None,
            model: None,
            view: ViewState::with_presets(presets),
            image_urls: HashMap::new(),
        })
    }

    #[must_use]
    pub fn with_codec(mut self, codec: Box<dyn SpreadsheetCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn files(&self) -> &[ClientFile] {
        &self.files
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn selected_file(&self) -> Option<&ClientFile> {
        self.selected.and_then(|i| self.files.get(i))
    }

    pub fn model(&self) -> Option<&WorkbookModel> {
        self.model.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// URL an embedded image was published under.
    pub fn image_url(&self, media: usize) -> Option<&str> {
        self.image_urls.get(&media).map(String::as_str)
    }

    /// Load a file by its position in [`Self::files`].
    ///
    /// On failure the status becomes `Failed` and the previous workbook, view
    /// and image URLs stay as they were.
    pub fn select_file(&mut self, index: usize) -> Result<()> {
        let len = self.files.len();
        let file = self.files.get(index).cloned().ok_or(PortalError::Range {
            what: "file",
            index,
            len,
        })?;

        self.status = SessionStatus::Loading;
        log::info!("loading {} for {}", file.url, self.client_id);
        match self.load(&file) {
            Ok((model, urls)) => {
                self.model = Some(model);
                self.image_urls = urls;
                self.selected = Some(index);
                self.view.reset();
                self.status = SessionStatus::Ready;
                Ok(())
            }
            Err(e) => {
                log::warn!("failed to load {}: {e}", file.url);
                self.status = SessionStatus::Failed(format!("Error loading file: {e}"));
                Err(e)
            }
        }
    }

    fn load(&mut self, file: &ClientFile) -> Result<(WorkbookModel, HashMap<usize, String>)> {
        let bytes = self.source.fetch(&file.url)?;
        let model = WorkbookModel::load_with(self.codec.as_ref(), &bytes)?;

        let mut urls = HashMap::new();
        for sheet in &model.workbook().sheets {
            for image in &sheet.images {
                if urls.contains_key(&image.media) {
                    continue;
                }
                let Some(media) = model.media(image) else {
                    continue;
                };
                let key = self.config.image_key(&self.client_id, media.file_name());
                let url = self.store.put(&key, &media.data)?;
                urls.insert(image.media, url);
            }
        }
        log::debug!("published {} images for {}", urls.len(), file.name);
        Ok((model, urls))
    }

    /// URL and original file name of the selected file.
    pub fn download(&self) -> Option<(&str, &str)> {
        self.selected_file()
            .map(|f| (f.url.as_str(), f.original_name.as_str()))
    }

    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        let model = loaded(self.model.as_ref())?;
        self.view.set_active_sheet(model, index)
    }

    pub fn set_hidden_columns(&mut self, columns: impl IntoIterator<Item = u32>) {
        self.view.set_hidden_columns(columns);
    }

    /// Apply a preset by key. `Ok(false)` when the key is unknown.
    pub fn apply_result_preset(&mut self, key: &str) -> Result<bool> {
        let model = loaded(self.model.as_ref())?;
        Ok(self.view.apply_result_preset(model, key)?.is_some())
    }

    /// Search the active sheet. Returns the match count.
    pub fn search(&mut self, query: &str) -> Result<usize> {
        let model = loaded(self.model.as_ref())?;
        self.view.search(model, query)
    }

    pub fn next_match(&mut self) -> Option<(u32, u32)> {
        self.view.next_match().map(|m| (m.row, m.col))
    }

    pub fn previous_match(&mut self) -> Option<(u32, u32)> {
        self.view.previous_match().map(|m| (m.row, m.col))
    }

    /// HTML for the active sheet with published image URLs.
    pub fn render_html(&self) -> Result<String> {
        let model = loaded(self.model.as_ref())?;
        render_view(model, &self.view, &self.config, None, |image| {
            self.image_urls.get(&image.media).cloned()
        })
    }
}
