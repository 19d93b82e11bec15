//! Reconciler outcomes and their reason codes

use serde::{Deserialize, Serialize};
use crate::types::LogState;

/// Why an update was accepted or rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum UpdateReason {
    /// Snapshot accepted, log written
    U001_UPDATED,
    /// No snapshot document at the input location
    U002_INPUT_MISSING,
    /// Snapshot timestamp equals the stored one
    U003_ALREADY_UP_TO_DATE,
    /// Snapshot document unparsable, missing required fields, or carrying
    /// coordinates that cannot be normalized
    U004_MALFORMED_INPUT,
    /// Persisted log present but unreadable
    U005_STORE_UNAVAILABLE,
    /// Persisted log could not be written
    U006_STORE_WRITE_FAILED,
    /// Snapshot document exists but could not be read (permissions, not a file)
    U007_INPUT_UNREADABLE,
}

impl UpdateReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::U001_UPDATED => "U001_UPDATED",
            Self::U002_INPUT_MISSING => "U002_INPUT_MISSING",
            Self::U003_ALREADY_UP_TO_DATE => "U003_ALREADY_UP_TO_DATE",
            Self::U004_MALFORMED_INPUT => "U004_MALFORMED_INPUT",
            Self::U005_STORE_UNAVAILABLE => "U005_STORE_UNAVAILABLE",
            Self::U006_STORE_WRITE_FAILED => "U006_STORE_WRITE_FAILED",
            Self::U007_INPUT_UNREADABLE => "U007_INPUT_UNREADABLE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::U001_UPDATED => "log updated",
            Self::U002_INPUT_MISSING => "new snapshot not found",
            Self::U003_ALREADY_UP_TO_DATE => "already up to date, not updated",
            Self::U004_MALFORMED_INPUT => "new snapshot is malformed",
            Self::U005_STORE_UNAVAILABLE => "stored log is unreadable",
            Self::U006_STORE_WRITE_FAILED => "stored log could not be written",
            Self::U007_INPUT_UNREADABLE => "new snapshot could not be read",
        }
    }

    /// Expected steady-state outcomes, not worth alarming on
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::U001_UPDATED | Self::U002_INPUT_MISSING | Self::U003_ALREADY_UP_TO_DATE
        )
    }
}

impl std::fmt::Display for UpdateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Result of one `update_log` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub accepted: bool,
    pub reason: UpdateReason,
    pub message: String,
    /// New state when accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<LogState>,
}

impl UpdateOutcome {
    /// Accepted update
    pub fn accepted(state: LogState) -> Self {
        let reason = UpdateReason::U001_UPDATED;
        Self {
            accepted: true,
            reason,
            message: reason.description().to_string(),
            state: Some(state),
        }
    }

    /// Rejection with the reason's stock message
    pub fn rejected(reason: UpdateReason) -> Self {
        Self {
            accepted: false,
            reason,
            message: reason.description().to_string(),
            state: None,
        }
    }

    /// Rejection with extra detail appended
    pub fn rejected_with(reason: UpdateReason, detail: impl std::fmt::Display) -> Self {
        Self {
            accepted: false,
            reason,
            message: format!("{}: {}", reason.description(), detail),
            state: None,
        }
    }
}
