//! Workflow state types for the posting wrappers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing weight for admin-authored posts.
pub const WEIGHT_LOW: i32 = 10;

/// Listing weight for recruiter-paid (offline) posts.
pub const WEIGHT_HIGH: i32 = 100;

/// Wrapper status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Created, awaiting first publish.
    Pending,
    /// Published at least once.
    Active,
    /// Soft-deleted.
    Deleted,
}

/// Publication indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishInd {
    /// Never published.
    New,
    /// Currently live.
    Published,
    /// Taken down after publishing.
    Unpublished,
    /// Live again after an unpublish.
    Republished,
}

impl PublishInd {
    /// Returns true if a live published-job snapshot should exist.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Published | Self::Republished)
    }
}

/// The complete workflow state of a wrapper: the (status, publish indicator)
/// pair. Only a subset of combinations is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Wrapper status.
    pub status: JobStatus,
    /// Publication indicator.
    pub publish_ind: PublishInd,
}

impl WorkflowState {
    /// Creates a workflow state.
    #[must_use]
    pub const fn new(status: JobStatus, publish_ind: PublishInd) -> Self {
        Self {
            status,
            publish_ind,
        }
    }

    /// The state every wrapper starts in.
    #[must_use]
    pub const fn initial() -> Self {
        Self::new(JobStatus::Pending, PublishInd::New)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.status, self.publish_ind)
    }
}

/// Which wrapper flavor a transition applies to.
///
/// The two wrappers share one state machine; they differ only in the publish
/// cost (offline posts are paid with credit), the listing weight, and how
/// strictly a missing published snapshot is treated on unpublish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Direct admin-authored post.
    Admin,
    /// Recruiter post paid for with posting credit.
    Offline,
}

impl JobKind {
    /// Returns true if publishing requires a credit deduction.
    #[must_use]
    pub fn requires_credit(self) -> bool {
        matches!(self, Self::Offline)
    }

    /// Weight assigned to the published-job snapshot for public ranking.
    #[must_use]
    pub fn listing_weight(self) -> i32 {
        match self {
            Self::Admin => WEIGHT_LOW,
            Self::Offline => WEIGHT_HIGH,
        }
    }

    /// Returns true if a missing live snapshot on unpublish is a hard error.
    ///
    /// Admin posts tolerate absence (the snapshot may have been expired by an
    /// external scheduled cleanup); offline posts must still have one.
    #[must_use]
    pub fn requires_snapshot_on_unpublish(self) -> bool {
        matches!(self, Self::Offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = WorkflowState::initial();
        assert_eq!(state.status, JobStatus::Pending);
        assert_eq!(state.publish_ind, PublishInd::New);
    }

    #[test]
    fn test_publish_ind_live() {
        assert!(!PublishInd::New.is_live());
        assert!(PublishInd::Published.is_live());
        assert!(!PublishInd::Unpublished.is_live());
        assert!(PublishInd::Republished.is_live());
    }

    #[test]
    fn test_kind_credit_requirement() {
        assert!(!JobKind::Admin.requires_credit());
        assert!(JobKind::Offline.requires_credit());
    }

    #[test]
    fn test_kind_weights() {
        assert_eq!(JobKind::Admin.listing_weight(), WEIGHT_LOW);
        assert_eq!(JobKind::Offline.listing_weight(), WEIGHT_HIGH);
        assert!(WEIGHT_HIGH > WEIGHT_LOW);
    }

    #[test]
    fn test_kind_snapshot_policy() {
        assert!(!JobKind::Admin.requires_snapshot_on_unpublish());
        assert!(JobKind::Offline.requires_snapshot_on_unpublish());
    }

    #[test]
    fn test_state_display() {
        let state = WorkflowState::new(JobStatus::Active, PublishInd::Unpublished);
        assert_eq!(state.to_string(), "(Active, Unpublished)");
    }
}
