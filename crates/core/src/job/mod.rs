//! Job lifecycle state machine.
//!
//! This module implements the workflow rules shared by the two posting
//! wrappers (AdminJob and OfflineJob):
//! - Workflow state types (status x publish indicator)
//! - Transition validation (edit, publish, unpublish, republish, delete)
//! - Listing weights for the published-job projection
//! - Error types for workflow operations

pub mod error;
pub mod types;
pub mod workflow;

pub use error::WorkflowError;
pub use types::{
    JobKind, JobStatus, PublishInd, WorkflowState, WEIGHT_HIGH, WEIGHT_LOW,
};
pub use workflow::{JobWorkflow, WorkflowAction};
