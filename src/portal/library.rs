//! Document library: search, upload and delete.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::access::can_delete_document;
use super::backend::{PortalBackend, DOCUMENTS_BUCKET};
use super::{DocumentDraft, DocumentItem, User, DOCUMENT_CATEGORIES};
use crate::error::{PortalError, Result};

/// Largest file accepted for upload (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping only its base name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    /// Extension used for the stored object name (`bin` when there is none).
    pub fn extension(&self) -> String {
        file_extension(&self.file_name)
    }

    pub fn content_type(&self) -> String {
        content_type_for(&self.file_name)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub(crate) fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map_or_else(|| "bin".to_string(), |e| e.to_string_lossy().to_lowercase())
}

pub(crate) fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Validated metadata for a document about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    pub title: String,
    pub category: String,
    /// Object name inside the documents bucket.
    pub object_path: String,
    /// Size label shown in listings, e.g. `"1.25 MB"`.
    pub size_label: String,
    pub content_type: String,
}

/// Size in MiB with two decimals, as shown next to documents.
#[allow(clippy::cast_precision_loss)]
pub fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Keep documents whose title or category contains `term`, ignoring case.
pub fn filter_documents<'a>(docs: &'a [DocumentItem], term: &str) -> Vec<&'a DocumentItem> {
    let needle = term.trim().to_lowercase();
    docs.iter()
        .filter(|d| {
            needle.is_empty()
                || d.title.to_lowercase().contains(&needle)
                || d.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Document workflows over a [`PortalBackend`].
pub struct DocumentLibrary<B: ?Sized> {
    backend: Arc<B>,
    bucket: String,
    max_upload_bytes: u64,
}

impl<B: PortalBackend + ?Sized> DocumentLibrary<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            bucket: DOCUMENTS_BUCKET.to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, limit: u64) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub async fn documents(&self) -> Result<Vec<DocumentItem>> {
        self.backend.list_documents().await
    }

    /// Documents matching `term` (see [`filter_documents`]).
    pub async fn search(&self, term: &str) -> Result<Vec<DocumentItem>> {
        let docs = self.documents().await?;
        Ok(filter_documents(&docs, term).into_iter().cloned().collect())
    }

    /// Validate a picked file and build its storage metadata.
    ///
    /// The title defaults to the file name up to its first `.`; the category
    /// defaults to the first document category.
    pub fn prepare_upload(
        &self,
        file: &FileUpload,
        title: Option<&str>,
        category: Option<&str>,
    ) -> Result<PreparedUpload> {
        let size = file.size();
        if size > self.max_upload_bytes {
            return Err(PortalError::FileTooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| file.file_name.split('.').next())
            .unwrap_or_default()
            .trim()
            .to_string();
        if title.is_empty() {
            return Err(PortalError::Validation("document title is required".into()));
        }

        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DOCUMENT_CATEGORIES[0])
            .to_string();

        let object_path = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            file.extension()
        );

        Ok(PreparedUpload {
            title,
            category,
            object_path,
            size_label: size_label(size),
            content_type: file.content_type(),
        })
    }

    /// Store the file and record it in the library. Returns its public URL.
    pub async fn upload(
        &self,
        user: &User,
        prepared: &PreparedUpload,
        bytes: Vec<u8>,
    ) -> Result<String> {
        debug!("Uploading {} as {}", prepared.title, prepared.object_path);
        self.backend
            .upload_object(&self.bucket, &prepared.object_path, bytes, &prepared.content_type)
            .await?;
        let url = self.backend.public_url(&self.bucket, &prepared.object_path);

        self.backend
            .insert_document(&DocumentDraft {
                title: prepared.title.clone(),
                category: prepared.category.clone(),
                url: url.clone(),
                uploader_id: user.id.clone(),
                size: prepared.size_label.clone(),
            })
            .await?;
        info!("Added document {} ({})", prepared.title, prepared.size_label);
        Ok(url)
    }

    /// Delete a document the user uploaded, or any document for admins.
    pub async fn delete(&self, user: &User, doc_id: &str) -> Result<()> {
        let docs = self.documents().await?;
        let doc = docs
            .iter()
            .find(|d| d.id == doc_id)
            .ok_or_else(|| PortalError::NotFound(format!("document {doc_id}")))?;
        if !can_delete_document(user, doc) {
            return Err(PortalError::Forbidden(format!(
                "document {doc_id} belongs to another user"
            )));
        }
        self.backend.delete_document(doc_id).await?;
        info!("Deleted document {}", doc_id);
        Ok(())
    }
}
