//! Workflow error types for lifecycle transitions.

use chrono::NaiveDate;
use thiserror::Error;

use super::types::WorkflowState;
use super::workflow::WorkflowAction;

/// Errors that can occur during workflow transitions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The requested transition is not allowed from the current state.
    #[error("Cannot {action} from state {from}")]
    InvalidTransition {
        /// The attempted action.
        action: WorkflowAction,
        /// The wrapper's current (status, publish indicator) pair.
        from: WorkflowState,
    },

    /// The publish window must start strictly after today.
    #[error("Publish start {0} must be after today")]
    PublishStartNotInFuture(NaiveDate),

    /// Publish window end precedes its start.
    #[error("Publish window ends ({end}) before it starts ({start})")]
    InvertedPublishWindow {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },
}

impl WorkflowError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::PublishStartNotInFuture(_) => "PUBLISH_START_NOT_IN_FUTURE",
            Self::InvertedPublishWindow { .. } => "INVERTED_PUBLISH_WINDOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 422,
            Self::PublishStartNotInFuture(_) | Self::InvertedPublishWindow { .. } => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::types::{JobStatus, PublishInd};

    #[test]
    fn test_invalid_transition_display() {
        let err = WorkflowError::InvalidTransition {
            action: WorkflowAction::Publish,
            from: WorkflowState::new(JobStatus::Active, PublishInd::Published),
        };
        assert_eq!(err.to_string(), "Cannot publish from state (Active, Published)");
    }

    #[test]
    fn test_error_codes() {
        let err = WorkflowError::InvalidTransition {
            action: WorkflowAction::Delete,
            from: WorkflowState::initial(),
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert_eq!(err.http_status_code(), 422);

        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(
            WorkflowError::PublishStartNotInFuture(date).error_code(),
            "PUBLISH_START_NOT_IN_FUTURE"
        );
        assert_eq!(
            WorkflowError::PublishStartNotInFuture(date).http_status_code(),
            400
        );
    }
}
