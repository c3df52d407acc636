//! In-process `JobBoardStore` used by tests in place of PostgreSQL.
//!
//! Honours the same filter semantics, uniqueness and foreign-key rules as the
//! schema, and can be told to fail every call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::application::{ApplicationStatus, JobApplication, NewJobApplication};
use crate::models::blog::{BlogPost, NewBlogPost};
use crate::models::company::{Company, NewCompany};
use crate::models::contact::{ContactMessage, ContactStatus, NewContactMessage};
use crate::models::job::{Job, JobWithCompany, NewJob};
use crate::models::user::{NewUser, User};
use crate::storage::{JobBoardStore, JobFilters, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    companies: Vec<Company>,
    jobs: Vec<Job>,
    applications: Vec<JobApplication>,
    posts: Vec<BlogPost>,
    messages: Vec<ContactMessage>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call return a database error.
    pub fn fail_all(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn application_count(&self) -> usize {
        self.tables.lock().unwrap().applications.len()
    }

    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }

    /// Rewrites a job's posting timestamp so tests can control ordering.
    pub fn set_posted_at(&self, job_id: Uuid, at: DateTime<Utc>) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(job) = tables.jobs.iter_mut().find(|j| j.id == job_id) {
            job.posted_at = at;
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

fn with_company(tables: &Tables, job: &Job) -> Option<JobWithCompany> {
    tables
        .companies
        .iter()
        .find(|c| c.id == job.company_id)
        .map(|company| JobWithCompany {
            job: job.clone(),
            company: company.clone(),
        })
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Conflict("users_username_key".to_string()));
        }
        let row = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn get_companies(&self) -> StoreResult<Vec<Company>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let mut companies = tables.companies.clone();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(companies)
    }

    async fn get_company(&self, id: Uuid) -> StoreResult<Option<Company>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn create_company(&self, company: NewCompany) -> StoreResult<Company> {
        self.check()?;
        let row = Company {
            id: Uuid::new_v4(),
            name: company.name,
            description: company.description,
            website: company.website,
            logo: company.logo,
            industry: company.industry,
            size: company.size,
            location: company.location,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().companies.push(row.clone());
        Ok(row)
    }

    async fn get_jobs(&self, filters: &JobFilters) -> StoreResult<Vec<JobWithCompany>> {
        self.check()?;
        let f = filters.normalized();
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<JobWithCompany> = tables
            .jobs
            .iter()
            .filter(|j| f.matches(j))
            .filter_map(|j| with_company(&tables, j))
            .collect();
        rows.sort_by(|a, b| b.job.posted_at.cmp(&a.job.posted_at));

        let offset = f.offset.unwrap_or(0) as usize;
        let limit = f.limit.map_or(usize::MAX, |l| l as usize);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_job(&self, id: Uuid) -> StoreResult<Option<JobWithCompany>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .jobs
            .iter()
            .find(|j| j.id == id && j.is_active)
            .and_then(|j| with_company(&tables, j)))
    }

    async fn create_job(&self, job: NewJob) -> StoreResult<Job> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.companies.iter().any(|c| c.id == job.company_id) {
            return Err(StoreError::MissingReference(
                "jobs_company_id_fkey".to_string(),
            ));
        }
        let row = Job {
            id: Uuid::new_v4(),
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            responsibilities: job.responsibilities,
            company_id: job.company_id,
            location: job.location,
            job_type: job.job_type,
            experience_level: job.experience_level,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            skills: job.skills,
            is_active: job.is_active,
            posted_at: Utc::now(),
            expires_at: job.expires_at,
        };
        tables.jobs.push(row.clone());
        Ok(row)
    }

    async fn get_job_applications(
        &self,
        job_id: Option<Uuid>,
    ) -> StoreResult<Vec<JobApplication>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<JobApplication> = tables
            .applications
            .iter()
            .filter(|a| job_id.map_or(true, |id| a.job_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(rows)
    }

    async fn get_job_application(&self, id: Uuid) -> StoreResult<Option<JobApplication>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn create_job_application(
        &self,
        application: NewJobApplication,
    ) -> StoreResult<JobApplication> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.jobs.iter().any(|j| j.id == application.job_id) {
            return Err(StoreError::MissingReference(
                "job_applications_job_id_fkey".to_string(),
            ));
        }
        let row = JobApplication {
            id: Uuid::new_v4(),
            job_id: application.job_id,
            first_name: application.first_name,
            last_name: application.last_name,
            email: application.email,
            phone: application.phone,
            experience: application.experience,
            comments: application.comments,
            resume_url: application.resume_url,
            cover_letter_url: application.cover_letter_url,
            additional_files: application.additional_files,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        };
        tables.applications.push(row.clone());
        Ok(row)
    }

    async fn get_blog_posts(&self, limit: i64, offset: i64) -> StoreResult<Vec<BlogPost>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<BlogPost> = tables
            .posts
            .iter()
            .filter(|p| p.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get_blog_post(&self, id: Uuid) -> StoreResult<Option<BlogPost>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id && p.is_published)
            .cloned())
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> StoreResult<Option<BlogPost>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .find(|p| p.slug == slug && p.is_published)
            .cloned())
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        if tables.posts.iter().any(|p| p.slug == post.slug) {
            return Err(StoreError::Conflict("blog_posts_slug_key".to_string()));
        }
        let now = Utc::now();
        let row = BlogPost {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            slug: post.slug,
            category: post.category,
            author: post.author,
            author_avatar: post.author_avatar,
            featured_image: post.featured_image,
            tags: post.tags,
            is_published: post.is_published,
            published_at: now,
            updated_at: now,
        };
        tables.posts.push(row.clone());
        Ok(row)
    }

    async fn get_contact_messages(&self) -> StoreResult<Vec<ContactMessage>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let mut rows = tables.messages.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> StoreResult<ContactMessage> {
        self.check()?;
        let row = ContactMessage {
            id: Uuid::new_v4(),
            name: message.name,
            email: message.email,
            phone: message.phone,
            subject: message.subject,
            message: message.message,
            status: ContactStatus::Unread,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().messages.push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{new_company, new_job};
    use chrono::Duration;

    #[tokio::test]
    async fn test_company_then_job_round_trip() {
        let store = MemoryStore::new();
        let company = store.create_company(new_company("TechCorp")).await.unwrap();
        let job = store
            .create_job(new_job(company.id, "Backend Engineer"))
            .await
            .unwrap();

        let fetched = store.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(fetched.job, job);
        assert_eq!(fetched.company, company);
        assert_eq!(fetched.company.name, "TechCorp");
    }

    #[tokio::test]
    async fn test_company_by_id() {
        let store = MemoryStore::new();
        let created = store.create_company(new_company("CloudScale")).await.unwrap();
        store.create_company(new_company("GlobalSoft")).await.unwrap();

        let fetched = store.get_company(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert!(store.get_company(Uuid::new_v4()).await.unwrap().is_none());

        store.fail_all(true);
        assert!(store.get_company(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_job_requires_existing_company() {
        let store = MemoryStore::new();
        let err = store
            .create_job(new_job(Uuid::new_v4(), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference(_)));
    }

    #[tokio::test]
    async fn test_filtered_listing_is_active_matching_and_newest_first() {
        let store = MemoryStore::new();
        let company = store.create_company(new_company("DataMind")).await.unwrap();
        let base = Utc::now();

        let mut ids = Vec::new();
        for (i, title) in ["Rust Engineer", "Data Engineer", "Designer", "Staff Engineer"]
            .iter()
            .enumerate()
        {
            let job = store.create_job(new_job(company.id, title)).await.unwrap();
            store.set_posted_at(job.id, base + Duration::minutes(i as i64));
            ids.push(job.id);
        }
        let mut inactive = new_job(company.id, "Retired Engineer");
        inactive.is_active = false;
        store.create_job(inactive).await.unwrap();

        let filters = JobFilters {
            search: Some("engineer".to_string()),
            ..Default::default()
        };
        let rows = store.get_jobs(&filters).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.job.is_active && filters.matches(&r.job)));
        assert!(rows
            .windows(2)
            .all(|w| w[0].job.posted_at >= w[1].job.posted_at));
        assert_eq!(rows[0].job.id, ids[3]);

        let page = store
            .get_jobs(&JobFilters {
                search: Some("engineer".to_string()),
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].job.id, ids[1]);
    }

    #[tokio::test]
    async fn test_featured_jobs_capped() {
        let store = MemoryStore::new();
        let company = store.create_company(new_company("CloudScale")).await.unwrap();
        for i in 0..8 {
            store
                .create_job(new_job(company.id, &format!("Role {i}")))
                .await
                .unwrap();
        }
        let featured = store
            .get_featured_jobs(crate::storage::FEATURED_JOBS_LIMIT)
            .await
            .unwrap();
        assert_eq!(featured.len(), 6);
    }

    #[tokio::test]
    async fn test_inactive_job_is_absent_by_id() {
        let store = MemoryStore::new();
        let company = store.create_company(new_company("GlobalSoft")).await.unwrap();
        let mut draft = new_job(company.id, "Hidden");
        draft.is_active = false;
        let job = store.create_job(draft).await.unwrap();
        assert!(store.get_job(job.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blog_slug_lookup_and_uniqueness() {
        let store = MemoryStore::new();
        let post = NewBlogPost {
            title: "Networking Strategies That Actually Work".to_string(),
            content: "Be genuinely helpful.".to_string(),
            excerpt: "Proven strategies".to_string(),
            slug: "networking-strategies".to_string(),
            category: "Networking".to_string(),
            author: "David Kim".to_string(),
            author_avatar: None,
            featured_image: None,
            tags: vec!["Networking".to_string()],
            is_published: true,
        };
        let created = store.create_blog_post(post.clone()).await.unwrap();

        let by_slug = store
            .get_blog_post_by_slug("networking-strategies")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_slug, created);
        assert_eq!(store.get_blog_post(created.id).await.unwrap(), Some(created));
        assert!(store.get_blog_post_by_slug("missing").await.unwrap().is_none());

        let err = store.create_blog_post(post).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_users_by_id_and_username() {
        let store = MemoryStore::new();
        let user = store
            .create_user(NewUser {
                username: "recruiter".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                email: "recruiter@example.com".to_string(),
                first_name: Some("Rita".to_string()),
                last_name: None,
                phone: None,
            })
            .await
            .unwrap();

        let fetched = store.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "recruiter");
        assert_eq!(fetched.password_hash, "$argon2id$stub");
        let json = serde_json::to_value(&fetched).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["firstName"], "Rita");
        assert!(store.get_user_by_username("recruiter").await.unwrap().is_some());
        assert!(store.get_user_by_username("nobody").await.unwrap().is_none());

        let dup = store
            .create_user(NewUser {
                username: "recruiter".to_string(),
                password_hash: "x".to_string(),
                email: "other@example.com".to_string(),
                first_name: None,
                last_name: None,
                phone: None,
            })
            .await;
        assert!(matches!(dup, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_applications_filtered_by_job() {
        let store = MemoryStore::new();
        let company = store.create_company(new_company("InnovateTech")).await.unwrap();
        let a = store.create_job(new_job(company.id, "A")).await.unwrap();
        let b = store.create_job(new_job(company.id, "B")).await.unwrap();

        for job_id in [a.id, a.id, b.id] {
            store
                .create_job_application(NewJobApplication {
                    job_id,
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    phone: None,
                    experience: None,
                    comments: None,
                    resume_url: None,
                    cover_letter_url: None,
                    additional_files: vec![],
                })
                .await
                .unwrap();
        }

        assert_eq!(store.get_job_applications(Some(a.id)).await.unwrap().len(), 2);
        assert_eq!(store.get_job_applications(None).await.unwrap().len(), 3);
        let first = &store.get_job_applications(Some(b.id)).await.unwrap()[0];
        assert_eq!(first.status, ApplicationStatus::Pending);
        assert_eq!(
            store.get_job_application(first.id).await.unwrap().as_ref(),
            Some(first)
        );
    }

    #[tokio::test]
    async fn test_contact_messages_start_unread() {
        let store = MemoryStore::new();
        store
            .create_contact_message(NewContactMessage {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                phone: None,
                subject: "Hiring".to_string(),
                message: "We'd like to post jobs".to_string(),
            })
            .await
            .unwrap();
        let messages = store.get_contact_messages().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].status, ContactStatus::Unread);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.fail_all(true);
        assert!(matches!(
            store.get_companies().await,
            Err(StoreError::Database(_))
        ));
    }
}
