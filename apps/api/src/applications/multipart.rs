//! Multipart parsing for job applications.
//!
//! File parts are streamed to temporary files under the upload directory.
//! Type and size limits are enforced while streaming, so a rejected file never
//! reaches the application workflow.

use std::io;
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::models::application::ApplicationFields;

/// Per-file cap.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file type. Only PDF, DOC, DOCX, and images are allowed.")]
    InvalidFileType { content_type: String },

    #[error("File too large")]
    FileTooLarge,

    /// Unknown file field, or more files than the slot accepts.
    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to buffer upload: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSlot {
    Resume,
    CoverLetter,
    AdditionalFiles,
}

impl FileSlot {
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "resume" => Some(FileSlot::Resume),
            "coverLetter" => Some(FileSlot::CoverLetter),
            "additionalFiles" => Some(FileSlot::AdditionalFiles),
            _ => None,
        }
    }

    pub fn max_count(self) -> usize {
        match self {
            FileSlot::Resume | FileSlot::CoverLetter => 1,
            FileSlot::AdditionalFiles => 5,
        }
    }
}

/// A file part buffered on local disk. The temp file is removed on drop.
#[derive(Debug)]
pub struct BufferedUpload {
    pub original_name: String,
    pub content_type: String,
    pub size: usize,
    file: NamedTempFile,
}

impl BufferedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn read(&self) -> io::Result<Bytes> {
        Ok(Bytes::from(tokio::fs::read(self.file.path()).await?))
    }

    #[cfg(test)]
    pub fn buffer_bytes(dir: &Path, name: &str, content_type: &str, body: &[u8]) -> Self {
        let file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(dir)
            .unwrap();
        std::fs::write(file.path(), body).unwrap();
        BufferedUpload {
            original_name: name.to_string(),
            content_type: content_type.to_string(),
            size: body.len(),
            file,
        }
    }

    /// Deletes the temp file now, reporting failure instead of ignoring it.
    pub fn discard(self) -> io::Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        Ok(path)
    }
}

#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub fields: ApplicationFields,
    pub resume: Option<BufferedUpload>,
    pub cover_letter: Option<BufferedUpload>,
    pub additional_files: Vec<BufferedUpload>,
}

impl ApplicationForm {
    fn count(&self, slot: FileSlot) -> usize {
        match slot {
            FileSlot::Resume => usize::from(self.resume.is_some()),
            FileSlot::CoverLetter => usize::from(self.cover_letter.is_some()),
            FileSlot::AdditionalFiles => self.additional_files.len(),
        }
    }

    fn attach(&mut self, slot: FileSlot, upload: BufferedUpload) {
        match slot {
            FileSlot::Resume => self.resume = Some(upload),
            FileSlot::CoverLetter => self.cover_letter = Some(upload),
            FileSlot::AdditionalFiles => self.additional_files.push(upload),
        }
    }
}

/// Reads the whole multipart body. Parts with a file name are files, the rest
/// are text fields.
pub async fn read_application_form(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<ApplicationForm, UploadError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_none() {
            let value = field.text().await?;
            form.fields.set(&name, value);
            continue;
        }

        let slot = FileSlot::from_field_name(&name)
            .ok_or_else(|| UploadError::UnexpectedField(name.clone()))?;
        if form.count(slot) >= slot.max_count() {
            return Err(UploadError::UnexpectedField(name));
        }

        let upload = buffer_file(field, upload_dir).await?;
        debug!(
            "Buffered {} ({} bytes) for field '{name}' at {}",
            upload.original_name,
            upload.size,
            upload.path().display()
        );
        form.attach(slot, upload);
    }

    Ok(form)
}

async fn buffer_file(mut field: Field<'_>, upload_dir: &Path) -> Result<BufferedUpload, UploadError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = normalize_mime(field.content_type().unwrap_or_default());
    if !is_allowed_mime(&content_type) {
        return Err(UploadError::InvalidFileType { content_type });
    }

    let temp = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(upload_dir)?;
    let mut out = tokio::fs::File::from_std(temp.as_file().try_clone()?);

    let mut size = 0usize;
    while let Some(chunk) = field.chunk().await? {
        size += chunk.len();
        if size > MAX_FILE_BYTES {
            return Err(UploadError::FileTooLarge);
        }
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    Ok(BufferedUpload {
        original_name,
        content_type,
        size,
        file: temp,
    })
}

fn normalize_mime(raw: &str) -> String {
    raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

pub fn is_allowed_mime(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}
