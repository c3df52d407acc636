//! Durable storage for applicant documents.
//!
//! Handlers only see `Arc<dyn ObjectStore>`; the S3 implementation is wired in
//! at startup and tests substitute `memory::MemoryObjectStore`.

pub mod s3;

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Key prefix for every applicant-submitted document.
pub const UPLOAD_PREFIX: &str = "uploads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },

    #[error("delete of '{key}' failed: {message}")]
    Delete { key: String, message: String },
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` under `key`, replacing any existing object.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Publicly reachable URL for `key`. Does not check that the object exists.
    fn public_url(&self, key: &str) -> String;
}

/// `uploads/{unix_millis}_{nonce}_{file_name}`. Directory components of the
/// client-supplied name are dropped. The nonce keeps same-named files
/// uploaded in the same millisecond from sharing a key.
pub fn upload_key(original_name: &str, at: DateTime<Utc>, nonce: Uuid) -> String {
    let file_name = original_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    format!(
        "{UPLOAD_PREFIX}/{}_{}_{file_name}",
        at.timestamp_millis(),
        nonce.simple()
    )
}

/// Joins a public base URL, bucket and key with single slashes.
pub fn public_object_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        bucket.trim_matches('/'),
        key.trim_start_matches('/')
    )
}
