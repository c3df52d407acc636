use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::company::Company;
use crate::state::AppState;

/// GET /api/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
    Ok(Json(state.store.get_companies().await?))
}
