use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::applications::multipart::{ApplicationForm, BufferedUpload, UploadError};
use crate::errors::AppError;
use crate::models::application::{ApplicationDocuments, JobApplication, NewJobApplication};
use crate::object_store::{upload_key, ObjectStore};
use crate::storage::JobBoardStore;

/// Persists a parsed application form.
///
/// 1. the job must exist and be active, otherwise nothing is uploaded;
/// 2. each buffered file is uploaded and its temp file removed;
/// 3. the record is assembled from form fields and public URLs;
/// 4. the record is validated;
/// 5. the record is inserted.
///
/// If any step after the first upload fails, objects already uploaded for
/// this submission are deleted on a best-effort basis.
pub async fn submit_application(
    store: &dyn JobBoardStore,
    objects: &dyn ObjectStore,
    job_id: Uuid,
    form: ApplicationForm,
) -> Result<JobApplication, AppError> {
    if store.get_job(job_id).await?.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let mut uploaded = Vec::new();
    match upload_and_insert(store, objects, job_id, form, &mut uploaded).await {
        Ok(application) => {
            info!(
                "Application {} stored for job {job_id} with {} document(s)",
                application.id,
                uploaded.len()
            );
            Ok(application)
        }
        Err(err) => {
            discard_uploaded(objects, &uploaded).await;
            Err(err)
        }
    }
}

async fn upload_and_insert(
    store: &dyn JobBoardStore,
    objects: &dyn ObjectStore,
    job_id: Uuid,
    form: ApplicationForm,
    uploaded: &mut Vec<String>,
) -> Result<JobApplication, AppError> {
    let ApplicationForm {
        fields,
        resume,
        cover_letter,
        additional_files,
    } = form;

    let mut docs = ApplicationDocuments::default();
    if let Some(file) = resume {
        docs.resume_url = Some(persist(objects, file, uploaded).await?);
    }
    if let Some(file) = cover_letter {
        docs.cover_letter_url = Some(persist(objects, file, uploaded).await?);
    }
    for file in additional_files {
        docs.additional_files
            .push(persist(objects, file, uploaded).await?);
    }

    let application = NewJobApplication::assemble(job_id, fields, docs);
    application.validate()?;

    Ok(store.create_job_application(application).await?)
}

/// Uploads one buffered file and returns its public URL.
async fn persist(
    objects: &dyn ObjectStore,
    file: BufferedUpload,
    uploaded: &mut Vec<String>,
) -> Result<String, AppError> {
    let key = upload_key(&file.original_name, Utc::now(), Uuid::new_v4());
    let body = file.read().await.map_err(UploadError::Io)?;

    objects.put(&key, body, &file.content_type).await?;
    uploaded.push(key.clone());

    if let Err(e) = file.discard() {
        warn!("Uploaded {key} but could not remove its temp file: {e}");
    }

    Ok(objects.public_url(&key))
}

async fn discard_uploaded(objects: &dyn ObjectStore, keys: &[String]) {
    for key in keys {
        match objects.delete(key).await {
            Ok(()) => info!("Removed orphaned upload {key}"),
            Err(e) => warn!("Could not remove orphaned upload {key}: {e}"),
        }
    }
}
