//! Job filter object and the dynamic query it compiles to.
//!
//! The query always starts from the active-only predicate and appends one
//! conjunct per populated filter field, then orders by `posted_at DESC` and
//! applies OFFSET / LIMIT. `JobFilters::matches` is the same predicate in
//! plain Rust for stores that do not speak SQL.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::models::job::Job;

/// Job columns plus the owning company's columns under a `c_` prefix.
pub const JOB_WITH_COMPANY_SELECT: &str = "SELECT j.*, \
     c.id AS c_id, c.name AS c_name, c.description AS c_description, \
     c.website AS c_website, c.logo AS c_logo, c.industry AS c_industry, \
     c.size AS c_size, c.location AS c_location, c.created_at AS c_created_at \
     FROM jobs j JOIN companies c ON c.id = j.company_id";

/// Optional narrowing of a job listing, deserialised from the query string.
///
/// Blank strings and zero numbers count as "not set".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilters {
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl JobFilters {
    pub fn featured(limit: i64) -> Self {
        JobFilters {
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn normalized(&self) -> Self {
        JobFilters {
            search: text(&self.search),
            location: text(&self.location),
            job_type: text(&self.job_type),
            experience_level: text(&self.experience_level),
            salary_min: self.salary_min.filter(|v| *v != 0),
            salary_max: self.salary_max.filter(|v| *v != 0),
            limit: self.limit.filter(|v| *v > 0),
            offset: self.offset.filter(|v| *v > 0),
        }
    }

    /// True when `job` satisfies the active-only base predicate and every
    /// populated filter. NULL salary columns never satisfy a salary bound,
    /// mirroring SQL comparison semantics.
    pub fn matches(&self, job: &Job) -> bool {
        let f = self.normalized();
        job.is_active
            && f.search
                .as_deref()
                .map_or(true, |s| contains_ignore_case(&job.title, s))
            && f.location
                .as_deref()
                .map_or(true, |l| contains_ignore_case(&job.location, l))
            && f.job_type.as_deref().map_or(true, |t| job.job_type == t)
            && f.experience_level
                .as_deref()
                .map_or(true, |lvl| job.experience_level.as_deref() == Some(lvl))
            && f.salary_min
                .map_or(true, |min| job.salary_min.is_some_and(|v| v >= min))
            && f.salary_max
                .map_or(true, |max| job.salary_max.is_some_and(|v| v <= max))
    }
}

/// Compiles the filters into a single SELECT over active jobs joined with
/// their company.
pub fn build_job_query(filters: &JobFilters) -> QueryBuilder<'static, Postgres> {
    let f = filters.normalized();
    let mut qb = QueryBuilder::new(JOB_WITH_COMPANY_SELECT);
    qb.push(" WHERE j.is_active = TRUE");

    if let Some(search) = f.search {
        qb.push(" AND j.title ILIKE ");
        qb.push_bind(like_pattern(&search));
    }
    if let Some(location) = f.location {
        qb.push(" AND j.location ILIKE ");
        qb.push_bind(like_pattern(&location));
    }
    if let Some(job_type) = f.job_type {
        qb.push(" AND j.job_type = ");
        qb.push_bind(job_type);
    }
    if let Some(level) = f.experience_level {
        qb.push(" AND j.experience_level = ");
        qb.push_bind(level);
    }
    if let Some(min) = f.salary_min {
        qb.push(" AND j.salary_min >= ");
        qb.push_bind(min);
    }
    if let Some(max) = f.salary_max {
        qb.push(" AND j.salary_max <= ");
        qb.push_bind(max);
    }

    qb.push(" ORDER BY j.posted_at DESC");

    if let Some(limit) = f.limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }
    if let Some(offset) = f.offset {
        qb.push(" OFFSET ");
        qb.push_bind(offset);
    }
    qb
}

/// `%term%` with LIKE metacharacters escaped so user input matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
