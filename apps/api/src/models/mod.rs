pub mod application;
pub mod blog;
pub mod company;
pub mod contact;
pub mod job;
pub mod user;

use thiserror::Error;

/// Raised when a status column holds a value outside its enum.
#[derive(Debug, Error)]
#[error("unknown {kind} status '{value}'")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}
