use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NetworkFailure,
    DuplicateRosterEntry,
    RosterFull,
    MalformedPersistedState,
    Storage,
}

/// Rejections and failures of a team mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("{name} is already on the team!")]
    AlreadyPresent { name: String },
    #[error("The team is full!")]
    Full { capacity: usize },
    #[error("failed to persist team: {message}")]
    Storage { message: String },
}

impl RosterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyPresent { .. } => ErrorCode::DuplicateRosterEntry,
            Self::Full { .. } => ErrorCode::RosterFull,
            Self::Storage { .. } => ErrorCode::Storage,
        }
    }

    /// Message shown in the notification toast.
    pub fn notification(&self) -> String {
        match self {
            Self::Storage { .. } => "Could not save the team; see logs for details.".to_string(),
            other => other.to_string(),
        }
    }
}
