use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::UnknownStatus;
use crate::validation::{non_blank, require_email, require_text};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Unread,
    Read,
    Responded,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Unread => "unread",
            ContactStatus::Read => "read",
            ContactStatus::Responded => "responded",
        }
    }
}

impl TryFrom<String> for ContactStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "unread" => Ok(ContactStatus::Unread),
            "read" => Ok(ContactStatus::Read),
            "responded" => Ok(ContactStatus::Responded),
            _ => Err(UnknownStatus {
                kind: "contact",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

/// JSON body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    /// Validates and trims the payload in one pass.
    pub fn validated(self) -> Result<Self, AppError> {
        require_text("name", &self.name)?;
        require_email("email", &self.email)?;
        require_text("subject", &self.subject)?;
        require_text("message", &self.message)?;
        Ok(NewContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}
