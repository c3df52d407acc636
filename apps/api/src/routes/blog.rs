use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::blog::BlogPost;
use crate::state::AppState;
use crate::storage::BLOG_PAGE_LIMIT;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlogPageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl BlogPageQuery {
    /// `(limit, offset)` with the limit clamped to `1..=BLOG_PAGE_LIMIT`.
    pub fn window(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(BLOG_PAGE_LIMIT).clamp(1, BLOG_PAGE_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// GET /api/blog
pub async fn handle_list_posts(
    State(state): State<AppState>,
    page: Result<Query<BlogPageQuery>, QueryRejection>,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    let Query(page) = page?;
    let (limit, offset) = page.window();
    let posts = state.store.get_blog_posts(limit, offset).await?;
    Ok(Json(posts))
}

/// GET /api/blog/:slug
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    let post = state
        .store
        .get_blog_post_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;
    Ok(Json(post))
}
