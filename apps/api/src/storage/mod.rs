//! Data-access layer. One method per entity operation, injected into the HTTP
//! layer as `Arc<dyn JobBoardStore>`.

pub mod job_query;
#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{JobApplication, NewJobApplication};
use crate::models::blog::{BlogPost, NewBlogPost};
use crate::models::company::{Company, NewCompany};
use crate::models::contact::{ContactMessage, NewContactMessage};
use crate::models::job::{Job, JobWithCompany, NewJob};
use crate::models::user::{NewUser, User};

pub use job_query::JobFilters;

pub const FEATURED_JOBS_LIMIT: i64 = 6;
pub const BLOG_PAGE_LIMIT: i64 = 20;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Unique constraint violation (SQLSTATE 23505).
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Foreign key violation (SQLSTATE 23503).
    #[error("referenced row missing: {0}")]
    MissingReference(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => return StoreError::Conflict(db_err.message().to_string()),
                Some("23503") => {
                    return StoreError::MissingReference(db_err.message().to_string())
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence interface for every entity the job board serves.
///
/// Single-record lookups return `Ok(None)` when the row is absent; failures
/// are always surfaced as `Err` so callers can tell "no matches" apart from
/// "query failed".
#[async_trait]
pub trait JobBoardStore: Send + Sync {
    // Users
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    // Companies
    async fn get_companies(&self) -> StoreResult<Vec<Company>>;
    async fn get_company(&self, id: Uuid) -> StoreResult<Option<Company>>;
    async fn create_company(&self, company: NewCompany) -> StoreResult<Company>;

    // Jobs (active only)
    async fn get_jobs(&self, filters: &JobFilters) -> StoreResult<Vec<JobWithCompany>>;
    async fn get_job(&self, id: Uuid) -> StoreResult<Option<JobWithCompany>>;
    async fn create_job(&self, job: NewJob) -> StoreResult<Job>;

    /// Newest active jobs, unfiltered.
    async fn get_featured_jobs(&self, limit: i64) -> StoreResult<Vec<JobWithCompany>> {
        self.get_jobs(&JobFilters::featured(limit)).await
    }

    // Applications
    async fn get_job_applications(&self, job_id: Option<Uuid>)
        -> StoreResult<Vec<JobApplication>>;
    async fn get_job_application(&self, id: Uuid) -> StoreResult<Option<JobApplication>>;
    async fn create_job_application(
        &self,
        application: NewJobApplication,
    ) -> StoreResult<JobApplication>;

    // Blog (published only)
    async fn get_blog_posts(&self, limit: i64, offset: i64) -> StoreResult<Vec<BlogPost>>;
    async fn get_blog_post(&self, id: Uuid) -> StoreResult<Option<BlogPost>>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>>;
    async fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost>;

    // Contact
    async fn get_contact_messages(&self) -> StoreResult<Vec<ContactMessage>>;
    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> StoreResult<ContactMessage>;
}
