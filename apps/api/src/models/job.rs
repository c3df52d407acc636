use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::models::company::Company;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub company_id: Uuid,
    pub location: String,
    /// full-time, part-time, contract, remote
    #[serde(rename = "type")]
    pub job_type: String,
    /// entry, mid, senior
    pub experience_level: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub skills: Vec<String>,
    pub is_active: bool,
    pub posted_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A job with its owning company nested under `company`.
///
/// Loaded from a join where the company columns carry a `c_` prefix
/// (see `storage::job_query::JOB_WITH_COMPANY_SELECT`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobWithCompany {
    #[serde(flatten)]
    pub job: Job,
    pub company: Company,
}

impl<'r> FromRow<'r, PgRow> for JobWithCompany {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let job = Job::from_row(row)?;
        let company = Company {
            id: row.try_get("c_id")?,
            name: row.try_get("c_name")?,
            description: row.try_get("c_description")?,
            website: row.try_get("c_website")?,
            logo: row.try_get("c_logo")?,
            industry: row.try_get("c_industry")?,
            size: row.try_get("c_size")?,
            location: row.try_get("c_location")?,
            created_at: row.try_get("c_created_at")?,
        };
        Ok(JobWithCompany { job, company })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    pub company_id: Uuid,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub salary_min: Option<i32>,
    #[serde(default)]
    pub salary_max: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}
