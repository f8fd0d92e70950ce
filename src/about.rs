//! About page sections: load, edit and save

use crate::gateway::{ApiClient, FormPayload, GatewayError};
use crate::models::{image_url, AboutRecord, ApiEnvelope, Layout};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum AboutError {
    #[error("A save is already in progress")]
    AlreadySubmitting,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Cannot read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AboutError {
    /// Message to show after a failed load or save
    pub fn user_message(&self) -> String {
        match self {
            AboutError::Gateway(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Newly chosen image file
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Local file the image was read from
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AboutError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| AboutError::Image {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "gambar".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            mime: guess_mime(&file_name).to_string(),
            file_name,
            bytes,
        })
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Editable state of the about form
#[derive(Debug, Clone, Default)]
pub struct AboutDraft {
    /// `None` when creating a new section
    pub id: Option<u64>,
    pub judul: String,
    pub deskripsi: String,
    pub layout: Layout,
    /// Image currently stored on the server
    pub current_image: Option<String>,
    /// Replacement image, uploaded on save
    pub new_image: Option<ImageUpload>,
}

impl AboutDraft {
    /// Empty draft for a new section
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft prefilled from a stored section
    pub fn from_record(record: &AboutRecord) -> Self {
        Self {
            id: Some(record.id),
            judul: record.judul.clone(),
            deskripsi: record.deskripsi.clone(),
            layout: record.layout(),
            current_image: record.gambar.clone().filter(|g| !g.is_empty()),
            new_image: None,
        }
    }

    /// Path the draft is saved to
    pub fn save_path(&self) -> String {
        match self.id {
            Some(id) => format!("/about/{}", id),
            None => "/about".to_string(),
        }
    }

    /// Image to preview: the local replacement file, else the stored image URL
    pub fn image_preview(&self, image_base_url: &str) -> Option<String> {
        if let Some(upload) = &self.new_image {
            return Some(format!("{} (new upload)", upload.path.display()));
        }
        self.current_image
            .as_deref()
            .map(|gambar| image_url(image_base_url, gambar))
    }

    /// Required fields for a new section. Edits are left to the server.
    pub fn validate(&self) -> Result<(), AboutError> {
        if self.judul.trim().is_empty() {
            return Err(AboutError::MissingField("judul"));
        }
        if self.deskripsi.trim().is_empty() {
            return Err(AboutError::MissingField("deskripsi"));
        }
        Ok(())
    }

    /// Multipart body; `gambar` only when a new image was chosen
    pub fn to_form(&self) -> FormPayload {
        let form = FormPayload::new()
            .text("judul", self.judul.clone())
            .text("deskripsi", self.deskripsi.clone())
            .text("layout", self.layout.as_str());

        match &self.new_image {
            Some(image) => form.file("gambar", &image.file_name, &image.mime, image.bytes.clone()),
            None => form,
        }
    }
}

/// List all about sections
pub async fn list(client: &ApiClient) -> Result<Vec<AboutRecord>, AboutError> {
    let envelope: ApiEnvelope<Vec<AboutRecord>> = client.get_json("/about").await?;
    Ok(envelope.data)
}

/// Fetch one about section
pub async fn fetch(client: &ApiClient, id: u64) -> Result<AboutRecord, AboutError> {
    let envelope: ApiEnvelope<AboutRecord> = client.get_json(&format!("/about/{}", id)).await?;
    Ok(envelope.data)
}

/// Load the form state for `id`, or an empty draft when creating
pub async fn load_draft(client: &ApiClient, id: Option<u64>) -> Result<AboutDraft, AboutError> {
    match id {
        Some(id) => {
            debug!("Loading about section {} for editing", id);
            Ok(AboutDraft::from_record(&fetch(client, id).await?))
        }
        None => Ok(AboutDraft::new()),
    }
}

/// Submits drafts, refusing to start a second save while one is in flight
pub struct AboutEditor<'a> {
    client: &'a ApiClient,
    submitting: AtomicBool,
}

/// Clears the in-flight flag when the save finishes, however it ends
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<'a> AboutEditor<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn submit(&self, draft: &AboutDraft) -> Result<(), AboutError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AboutError::AlreadySubmitting);
        }
        let _guard = SubmitGuard(&self.submitting);

        if draft.id.is_none() {
            draft.validate()?;
        }

        let path = draft.save_path();
        info!("Saving about section to {}", path);
        self.client.post_form(&path, draft.to_form()).await?;
        info!("About section saved");

        Ok(())
    }
}
