//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! They own the transactional boundaries: every mutating workflow runs
//! inside an explicit begin/commit with abort-on-error.

pub mod catalog;
pub mod credit;
pub mod job;
pub mod sequence;

pub use catalog::{CatalogError, CatalogRepository, PostingOption};
pub use credit::{CreditRepository, CreditStoreError, DeductionInput};
pub use job::{
    CreateAdminJobInput, CreateOfflineJobInput, EditJobInput, JobContentInput, JobCreated,
    JobDetails, JobError, JobRepository,
};
pub use sequence::{SequenceError, SequenceRepository};
