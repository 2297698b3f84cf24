//! Transition validation for the posting workflow.
//!
//! The transition table (identical for AdminJob and OfflineJob; the credit
//! charge on publish is layered on by the repository):
//!
//! | Transition | Allowed from (status, publish_ind)            |
//! |------------|-----------------------------------------------|
//! | Edit       | (Pending, New) or (Active, Unpublished)       |
//! | Publish    | (Pending, New)                                |
//! | Unpublish  | (Active, Published) or (Active, Republished)  |
//! | Republish  | (Active, Unpublished)                         |
//! | Delete     | (Pending, *)                                  |

use chrono::NaiveDate;
use std::fmt;

use super::error::WorkflowError;
use super::types::{JobStatus, PublishInd, WorkflowState};

/// The workflow actions a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Mutate job content and wrapper fields.
    Edit,
    /// Go live for the first time.
    Publish,
    /// Take a live post down.
    Unpublish,
    /// Put an unpublished post live again.
    Republish,
    /// Soft-delete wrapper and job.
    Delete,
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Edit => "edit",
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::Republish => "republish",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Stateless validator for workflow transitions.
///
/// All methods are associated functions that check eligibility against the
/// current state and return the state to persist. Side effects (credit
/// deduction, published-snapshot maintenance) are applied by the repository
/// inside the same database transaction.
pub struct JobWorkflow;

impl JobWorkflow {
    /// Validates an edit.
    ///
    /// From (Pending, New) the publish window must start strictly after
    /// "today" (next calendar day boundary). A re-edit from
    /// (Active, Unpublished) carries no such restriction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for any other state, or a window error for
    /// a first-edit with a non-future start.
    pub fn edit(
        state: WorkflowState,
        publish_start: NaiveDate,
        publish_end: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), WorkflowError> {
        validate_window(publish_start, publish_end)?;

        match (state.status, state.publish_ind) {
            (JobStatus::Pending, PublishInd::New) => {
                if publish_start <= today {
                    return Err(WorkflowError::PublishStartNotInFuture(publish_start));
                }
                Ok(())
            }
            (JobStatus::Active, PublishInd::Unpublished) => Ok(()),
            _ => Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Edit,
                from: state,
            }),
        }
    }

    /// Validates a publish and returns the resulting state.
    ///
    /// Only (Pending, New) wrappers can be published, and the publish window
    /// must start strictly after today.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` or `PublishStartNotInFuture`.
    pub fn publish(
        state: WorkflowState,
        publish_start: NaiveDate,
        today: NaiveDate,
    ) -> Result<WorkflowState, WorkflowError> {
        match (state.status, state.publish_ind) {
            (JobStatus::Pending, PublishInd::New) => {
                if publish_start <= today {
                    return Err(WorkflowError::PublishStartNotInFuture(publish_start));
                }
                Ok(WorkflowState::new(JobStatus::Active, PublishInd::Published))
            }
            _ => Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Publish,
                from: state,
            }),
        }
    }

    /// Validates an unpublish and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the wrapper is live.
    pub fn unpublish(state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        match (state.status, state.publish_ind) {
            (JobStatus::Active, PublishInd::Published | PublishInd::Republished) => Ok(
                WorkflowState::new(JobStatus::Active, PublishInd::Unpublished),
            ),
            _ => Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Unpublish,
                from: state,
            }),
        }
    }

    /// Validates a republish and returns the resulting state.
    ///
    /// No further credit charge: the original publish already paid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the wrapper is (Active, Unpublished).
    pub fn republish(state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        match (state.status, state.publish_ind) {
            (JobStatus::Active, PublishInd::Unpublished) => Ok(WorkflowState::new(
                JobStatus::Active,
                PublishInd::Republished,
            )),
            _ => Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Republish,
                from: state,
            }),
        }
    }

    /// Validates a delete and returns the resulting state.
    ///
    /// Only pending wrappers can be deleted, regardless of publish indicator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for non-pending wrappers.
    pub fn delete(state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        match state.status {
            JobStatus::Pending => Ok(WorkflowState::new(JobStatus::Deleted, state.publish_ind)),
            _ => Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Delete,
                from: state,
            }),
        }
    }
}

fn validate_window(start: NaiveDate, end: NaiveDate) -> Result<(), WorkflowError> {
    if end < start {
        return Err(WorkflowError::InvertedPublishWindow { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 1)
    }

    fn state(status: JobStatus, publish_ind: PublishInd) -> WorkflowState {
        WorkflowState::new(status, publish_ind)
    }

    // ========== Edit ==========

    #[test]
    fn test_edit_pending_new_requires_future_start() {
        let s = WorkflowState::initial();

        // Tomorrow is fine.
        assert!(JobWorkflow::edit(s, date(2026, 8, 2), date(2026, 9, 1), today()).is_ok());

        // Today or earlier is not.
        let result = JobWorkflow::edit(s, today(), date(2026, 9, 1), today());
        assert!(matches!(
            result,
            Err(WorkflowError::PublishStartNotInFuture(_))
        ));
        let result = JobWorkflow::edit(s, date(2026, 7, 1), date(2026, 9, 1), today());
        assert!(matches!(
            result,
            Err(WorkflowError::PublishStartNotInFuture(_))
        ));
    }

    #[test]
    fn test_edit_unpublished_has_no_date_restriction() {
        let s = state(JobStatus::Active, PublishInd::Unpublished);
        // Re-edit may keep a window that already started.
        assert!(JobWorkflow::edit(s, date(2026, 7, 1), date(2026, 9, 1), today()).is_ok());
    }

    #[rstest]
    #[case(JobStatus::Active, PublishInd::Published)]
    #[case(JobStatus::Active, PublishInd::Republished)]
    #[case(JobStatus::Deleted, PublishInd::New)]
    fn test_edit_rejected_elsewhere(#[case] status: JobStatus, #[case] publish_ind: PublishInd) {
        let result = JobWorkflow::edit(
            state(status, publish_ind),
            date(2026, 8, 2),
            date(2026, 9, 1),
            today(),
        );
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Edit,
                ..
            })
        ));
    }

    #[test]
    fn test_edit_rejects_inverted_window() {
        let result = JobWorkflow::edit(
            WorkflowState::initial(),
            date(2026, 8, 10),
            date(2026, 8, 5),
            today(),
        );
        assert!(matches!(
            result,
            Err(WorkflowError::InvertedPublishWindow { .. })
        ));
    }

    // ========== Publish ==========

    #[test]
    fn test_publish_from_pending_new() {
        let next = JobWorkflow::publish(WorkflowState::initial(), date(2026, 8, 2), today())
            .unwrap();
        assert_eq!(next, state(JobStatus::Active, PublishInd::Published));
    }

    #[test]
    fn test_publish_requires_future_start() {
        let result = JobWorkflow::publish(WorkflowState::initial(), today(), today());
        assert!(matches!(
            result,
            Err(WorkflowError::PublishStartNotInFuture(_))
        ));
    }

    #[rstest]
    #[case(JobStatus::Active, PublishInd::Published)]
    #[case(JobStatus::Active, PublishInd::Unpublished)]
    #[case(JobStatus::Active, PublishInd::Republished)]
    #[case(JobStatus::Deleted, PublishInd::New)]
    #[case(JobStatus::Pending, PublishInd::Unpublished)]
    fn test_publish_rejected_elsewhere(#[case] status: JobStatus, #[case] publish_ind: PublishInd) {
        let result = JobWorkflow::publish(state(status, publish_ind), date(2026, 8, 2), today());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition {
                action: WorkflowAction::Publish,
                ..
            })
        ));
    }

    // ========== Unpublish ==========

    #[rstest]
    #[case(PublishInd::Published)]
    #[case(PublishInd::Republished)]
    fn test_unpublish_from_live(#[case] publish_ind: PublishInd) {
        let next = JobWorkflow::unpublish(state(JobStatus::Active, publish_ind)).unwrap();
        assert_eq!(next, state(JobStatus::Active, PublishInd::Unpublished));
    }

    #[rstest]
    #[case(JobStatus::Pending, PublishInd::New)]
    #[case(JobStatus::Active, PublishInd::Unpublished)]
    #[case(JobStatus::Deleted, PublishInd::Published)]
    fn test_unpublish_rejected_elsewhere(
        #[case] status: JobStatus,
        #[case] publish_ind: PublishInd,
    ) {
        assert!(JobWorkflow::unpublish(state(status, publish_ind)).is_err());
    }

    // ========== Republish ==========

    #[test]
    fn test_republish_from_unpublished() {
        let next = JobWorkflow::republish(state(JobStatus::Active, PublishInd::Unpublished))
            .unwrap();
        assert_eq!(next, state(JobStatus::Active, PublishInd::Republished));
    }

    #[rstest]
    #[case(JobStatus::Pending, PublishInd::New)]
    #[case(JobStatus::Active, PublishInd::Published)]
    #[case(JobStatus::Active, PublishInd::Republished)]
    fn test_republish_rejected_elsewhere(
        #[case] status: JobStatus,
        #[case] publish_ind: PublishInd,
    ) {
        assert!(JobWorkflow::republish(state(status, publish_ind)).is_err());
    }

    // ========== Delete ==========

    #[rstest]
    #[case(PublishInd::New)]
    #[case(PublishInd::Published)]
    #[case(PublishInd::Unpublished)]
    fn test_delete_from_any_pending(#[case] publish_ind: PublishInd) {
        let next = JobWorkflow::delete(state(JobStatus::Pending, publish_ind)).unwrap();
        assert_eq!(next.status, JobStatus::Deleted);
        assert_eq!(next.publish_ind, publish_ind);
    }

    #[rstest]
    #[case(JobStatus::Active, PublishInd::Published)]
    #[case(JobStatus::Active, PublishInd::Unpublished)]
    #[case(JobStatus::Deleted, PublishInd::New)]
    fn test_delete_rejected_elsewhere(#[case] status: JobStatus, #[case] publish_ind: PublishInd) {
        assert!(JobWorkflow::delete(state(status, publish_ind)).is_err());
    }

    // ========== Round trip ==========

    #[test]
    fn test_publish_unpublish_republish_round_trip() {
        let published =
            JobWorkflow::publish(WorkflowState::initial(), date(2026, 8, 2), today()).unwrap();
        let unpublished = JobWorkflow::unpublish(published).unwrap();
        let republished = JobWorkflow::republish(unpublished).unwrap();

        assert_eq!(
            republished,
            state(JobStatus::Active, PublishInd::Republished)
        );
        // A republished post can be taken down and put back up again.
        let down_again = JobWorkflow::unpublish(republished).unwrap();
        assert!(JobWorkflow::republish(down_again).is_ok());
    }
}
