use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobWithCompany;
use crate::state::AppState;
use crate::storage::{JobFilters, FEATURED_JOBS_LIMIT};

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    filters: Result<Query<JobFilters>, QueryRejection>,
) -> Result<Json<Vec<JobWithCompany>>, AppError> {
    let Query(filters) = filters?;
    let jobs = state.store.get_jobs(&filters).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/featured
pub async fn handle_featured_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobWithCompany>>, AppError> {
    let jobs = state.store.get_featured_jobs(FEATURED_JOBS_LIMIT).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobWithCompany>, AppError> {
    let not_found = || AppError::NotFound("Job not found".to_string());

    // Ids that are not UUIDs cannot name a row.
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let job = state.store.get_job(id).await?.ok_or_else(not_found)?;
    Ok(Json(job))
}
