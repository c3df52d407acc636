use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::application::{ApplicationStatus, JobApplication, NewJobApplication};
use crate::models::blog::{BlogPost, NewBlogPost};
use crate::models::company::{Company, NewCompany};
use crate::models::contact::{ContactMessage, ContactStatus, NewContactMessage};
use crate::models::job::{Job, JobWithCompany, NewJob};
use crate::models::user::{NewUser, User};
use crate::storage::job_query::{build_job_query, JobFilters, JOB_WITH_COMPANY_SELECT};
use crate::storage::{JobBoardStore, StoreResult};

/// `JobBoardStore` backed by PostgreSQL. Every operation is a single
/// statement; writes use `INSERT ... RETURNING *`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl JobBoardStore for PgStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await?;

        info!("Created user {}", row.id);
        Ok(row)
    }

    async fn get_companies(&self) -> StoreResult<Vec<Company>> {
        Ok(
            sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_company(&self, id: Uuid) -> StoreResult<Option<Company>> {
        Ok(
            sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_company(&self, company: NewCompany) -> StoreResult<Company> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, description, website, logo, industry, size, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.logo)
        .bind(&company.industry)
        .bind(&company.size)
        .bind(&company.location)
        .fetch_one(&self.pool)
        .await?;

        info!("Created company {} ({})", row.id, row.name);
        Ok(row)
    }

    async fn get_jobs(&self, filters: &JobFilters) -> StoreResult<Vec<JobWithCompany>> {
        let mut query = build_job_query(filters);
        debug!("Job listing query: {}", query.sql());
        Ok(query
            .build_query_as::<JobWithCompany>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_job(&self, id: Uuid) -> StoreResult<Option<JobWithCompany>> {
        let sql = format!("{JOB_WITH_COMPANY_SELECT} WHERE j.id = $1 AND j.is_active = TRUE");
        Ok(sqlx::query_as::<_, JobWithCompany>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_job(&self, job: NewJob) -> StoreResult<Job> {
        let row = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
                (title, description, requirements, responsibilities, company_id, location,
                 job_type, experience_level, salary_min, salary_max, skills, is_active, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(job.company_id)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.experience_level)
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(&job.skills)
        .bind(job.is_active)
        .bind(job.expires_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Created job {} for company {}", row.id, row.company_id);
        Ok(row)
    }

    async fn get_job_applications(
        &self,
        job_id: Option<Uuid>,
    ) -> StoreResult<Vec<JobApplication>> {
        Ok(sqlx::query_as::<_, JobApplication>(
            r#"
            SELECT * FROM job_applications
            WHERE ($1::uuid IS NULL OR job_id = $1)
            ORDER BY applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_job_application(&self, id: Uuid) -> StoreResult<Option<JobApplication>> {
        Ok(
            sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_job_application(
        &self,
        application: NewJobApplication,
    ) -> StoreResult<JobApplication> {
        let row = sqlx::query_as::<_, JobApplication>(
            r#"
            INSERT INTO job_applications
                (job_id, first_name, last_name, email, phone, experience, comments,
                 resume_url, cover_letter_url, additional_files, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(application.job_id)
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.experience)
        .bind(&application.comments)
        .bind(&application.resume_url)
        .bind(&application.cover_letter_url)
        .bind(&application.additional_files)
        .bind(ApplicationStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!("Created application {} for job {}", row.id, row.job_id);
        Ok(row)
    }

    async fn get_blog_posts(&self, limit: i64, offset: i64) -> StoreResult<Vec<BlogPost>> {
        Ok(sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE is_published = TRUE
            ORDER BY published_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_blog_post(&self, id: Uuid) -> StoreResult<Option<BlogPost>> {
        Ok(sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE id = $1 AND is_published = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>> {
        Ok(sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE slug = $1 AND is_published = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost> {
        let row = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts
                (title, content, excerpt, slug, category, author,
                 author_avatar, featured_image, tags, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.slug)
        .bind(&post.category)
        .bind(&post.author)
        .bind(&post.author_avatar)
        .bind(&post.featured_image)
        .bind(&post.tags)
        .bind(post.is_published)
        .fetch_one(&self.pool)
        .await?;

        info!("Created blog post {} ({})", row.id, row.slug);
        Ok(row)
    }

    async fn get_contact_messages(&self) -> StoreResult<Vec<ContactMessage>> {
        Ok(sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> StoreResult<ContactMessage> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, phone, subject, message, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(ContactStatus::Unread.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!("Stored contact message {}", row.id);
        Ok(row)
    }
}
