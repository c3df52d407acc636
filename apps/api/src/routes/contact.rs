use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::contact::{ContactMessage, NewContactMessage};
use crate::state::AppState;

/// POST /api/contact
pub async fn handle_create_message(
    State(state): State<AppState>,
    payload: Result<Json<NewContactMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError> {
    let Json(payload) = payload?;
    let message = state
        .store
        .create_contact_message(payload.validated()?)
        .await?;
    info!("Contact message {} received", message.id);
    Ok((StatusCode::CREATED, Json(message)))
}
