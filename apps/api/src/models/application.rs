use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::UnknownStatus;
use crate::validation::{non_blank, require_email, require_text};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(UnknownStatus {
                kind: "application",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub comments: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub additional_files: Vec<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Applicant-supplied text fields of the multipart form.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub comments: Option<String>,
}

impl ApplicationFields {
    /// Records a text field by its form name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "experience" => &mut self.experience,
            "comments" => &mut self.comments,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// Uploaded document URLs resolved for one submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDocuments {
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub additional_files: Vec<String>,
}

/// Insert payload. Status is not part of it: new rows always start `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobApplication {
    pub job_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub comments: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub additional_files: Vec<String>,
}

impl NewJobApplication {
    pub fn assemble(job_id: Uuid, fields: ApplicationFields, docs: ApplicationDocuments) -> Self {
        NewJobApplication {
            job_id,
            first_name: fields.first_name.unwrap_or_default().trim().to_string(),
            last_name: fields.last_name.unwrap_or_default().trim().to_string(),
            email: fields.email.unwrap_or_default().trim().to_string(),
            phone: non_blank(fields.phone),
            experience: non_blank(fields.experience),
            comments: non_blank(fields.comments),
            resume_url: docs.resume_url,
            cover_letter_url: docs.cover_letter_url,
            additional_files: docs.additional_files,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_email("email", &self.email)?;
        Ok(())
    }
}
