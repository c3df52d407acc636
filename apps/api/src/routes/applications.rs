use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::applications::multipart::read_application_form;
use crate::applications::workflow::submit_application;
use crate::errors::AppError;
use crate::models::application::JobApplication;
use crate::state::AppState;

/// POST /api/jobs/:id/apply
///
/// The multipart body is read in full before the job is looked up, so file
/// type and size rejections win over a missing job.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let form = read_application_form(&mut multipart, &state.upload_dir).await?;

    let job_id = Uuid::parse_str(&job_id)
        .map_err(|_| AppError::NotFound("Job not found".to_string()))?;

    info!(
        "Application for job {job_id} received with {} file(s)",
        usize::from(form.resume.is_some())
            + usize::from(form.cover_letter.is_some())
            + form.additional_files.len()
    );

    let application =
        submit_application(state.store.as_ref(), state.objects.as_ref(), job_id, form).await?;
    Ok((StatusCode::CREATED, Json(application)))
}
