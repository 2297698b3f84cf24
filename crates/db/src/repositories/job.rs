//! Posting lifecycle persistence.
//!
//! One repository drives both wrapper flavors. The transition table lives in
//! `hireboard_core::job::JobWorkflow`; this module supplies the side effects
//! that go with each transition inside a single database transaction:
//! credit deduction and document numbering on publish, published-snapshot
//! creation and soft-deletion, and the wrapper/job row updates themselves.

use chrono::{NaiveDate, Utc};
use hireboard_core::job::{JobKind, JobWorkflow, WorkflowError, WorkflowState};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{RecordStatus, WrapperStatus};
use crate::entities::{
    admin_jobs, credit_accounts, jobs, offline_jobs, product_prices, published_jobs,
};

use super::credit::{CreditRepository, CreditStoreError, DeductionInput};
use super::sequence::{SequenceError, SequenceRepository};

/// Sequence key for utilization invoice numbers.
pub const UTILIZATION_SEQUENCE: &str = "credit_utilization";

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// No wrapper of the given kind with that id.
    #[error("{0} job not found: {1}")]
    WrapperNotFound(JobKindLabel, Uuid),

    /// Wrapper exists but its content row is missing.
    #[error("Job content not found: {0}")]
    JobNotFound(Uuid),

    /// The wrapper references a price row that does not exist.
    #[error("Product price not found: {0}")]
    PriceNotFound(Uuid),

    /// The recruiter has no credit account.
    #[error("No credit account for recruiter: {0}")]
    AccountNotFoundForRecruiter(Uuid),

    /// Unpublish found no live snapshot where one is mandatory.
    #[error("No active published snapshot for job: {0}")]
    MissingPublishedSnapshot(Uuid),

    /// Transition or publish-window validation failure.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Credit deduction failure.
    #[error(transparent)]
    Credit(#[from] CreditStoreError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SequenceError> for JobError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::Database(db) => Self::Database(db),
        }
    }
}

/// Human-readable wrapper flavor for error messages.
#[derive(Debug, Clone, Copy)]
pub struct JobKindLabel(pub JobKind);

impl std::fmt::Display for JobKindLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            JobKind::Admin => f.write_str("Admin"),
            JobKind::Offline => f.write_str("Offline"),
        }
    }
}

/// Content fields shared by create and edit.
#[derive(Debug, Clone)]
pub struct JobContentInput {
    /// Post title.
    pub title: String,
    /// Short description shown in listings.
    pub description: String,
    /// Work location.
    pub location: String,
    /// Employer display name.
    pub employer_name: String,
    /// Full post body.
    pub content: String,
    /// First day the post should be live.
    pub publish_start: NaiveDate,
    /// Last day the post should be live.
    pub publish_end: NaiveDate,
}

/// Input for creating an admin-authored post.
#[derive(Debug, Clone)]
pub struct CreateAdminJobInput {
    /// Content fields.
    pub content: JobContentInput,
    /// Acting administrator.
    pub created_by: Uuid,
}

/// Input for creating a recruiter (offline) post.
#[derive(Debug, Clone)]
pub struct CreateOfflineJobInput {
    /// Content fields.
    pub content: JobContentInput,
    /// Recruiter the post belongs to; their account pays on publish.
    pub recruiter_id: Uuid,
    /// Chosen publish-cost option.
    pub product_price_id: Uuid,
    /// Acting administrator.
    pub created_by: Uuid,
}

/// Input for editing a post.
#[derive(Debug, Clone)]
pub struct EditJobInput {
    /// Replacement content fields.
    pub content: JobContentInput,
    /// New price option; only meaningful for offline posts.
    pub product_price_id: Option<Uuid>,
    /// Acting administrator.
    pub updated_by: Uuid,
}

/// Identifiers returned from a create.
#[derive(Debug, Clone, Copy)]
pub struct JobCreated {
    /// Wrapper row id.
    pub wrapper_id: Uuid,
    /// Content row id.
    pub job_id: Uuid,
}

/// A wrapper joined with its content row, for reads.
#[derive(Debug, Clone)]
pub struct JobDetails {
    /// Wrapper row id.
    pub wrapper_id: Uuid,
    /// Wrapper flavor.
    pub kind: JobKind,
    /// Current workflow state.
    pub state: WorkflowState,
    /// Content row.
    pub job: jobs::Model,
    /// Owning recruiter (offline posts only).
    pub recruiter_id: Option<Uuid>,
    /// Chosen price option (offline posts only).
    pub product_price_id: Option<Uuid>,
    /// Ledger entry that paid for the publish (offline posts, once published).
    pub credit_trx_id: Option<Uuid>,
    /// When the post last went live.
    pub last_publish_date: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Wrapper row projected into kind-independent form.
#[derive(Debug, Clone)]
struct Wrapper {
    id: Uuid,
    job_id: Uuid,
    state: WorkflowState,
    recruiter_id: Option<Uuid>,
    product_price_id: Option<Uuid>,
    credit_trx_id: Option<Uuid>,
    last_publish_date: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl Wrapper {
    fn from_admin(m: admin_jobs::Model) -> Self {
        Self {
            id: m.id,
            job_id: m.job_id,
            state: WorkflowState::new(m.status.into(), m.publish_ind.into()),
            recruiter_id: None,
            product_price_id: None,
            credit_trx_id: None,
            last_publish_date: m.last_publish_date,
        }
    }

    fn from_offline(m: offline_jobs::Model) -> Self {
        Self {
            id: m.id,
            job_id: m.job_id,
            state: WorkflowState::new(m.status.into(), m.publish_ind.into()),
            recruiter_id: Some(m.recruiter_id),
            product_price_id: Some(m.product_price_id),
            credit_trx_id: m.credit_trx_id,
            last_publish_date: m.last_publish_date,
        }
    }
}

/// Fields written back to a wrapper after a transition.
#[derive(Debug, Clone, Default)]
struct WrapperUpdate {
    state: Option<WorkflowState>,
    last_publish_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    credit_trx_id: Option<Uuid>,
    product_price_id: Option<Uuid>,
}

/// Repository for the posting lifecycle.
#[derive(Debug, Clone)]
pub struct JobRepository {
    db: DatabaseConnection,
}

impl JobRepository {
    /// Creates a new job repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an admin post in the initial (Pending, New) state.
    ///
    /// # Errors
    ///
    /// Returns a window validation error or a database error.
    pub async fn create_admin_job(
        &self,
        input: CreateAdminJobInput,
    ) -> Result<JobCreated, JobError> {
        let today = Utc::now().date_naive();
        JobWorkflow::edit(
            WorkflowState::initial(),
            input.content.publish_start,
            input.content.publish_end,
            today,
        )?;

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let job_id = Uuid::new_v4();
        let wrapper_id = Uuid::new_v4();

        insert_job(&txn, job_id, &input.content, input.created_by, now).await?;

        admin_jobs::ActiveModel {
            id: Set(wrapper_id),
            job_id: Set(job_id),
            status: Set(WrapperStatus::Pending),
            publish_ind: Set(crate::entities::sea_orm_active_enums::PublishInd::New),
            last_publish_date: Set(None),
            created_by: Set(input.created_by),
            updated_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(wrapper_id = %wrapper_id, job_id = %job_id, "admin job created");
        Ok(JobCreated { wrapper_id, job_id })
    }

    /// Creates a recruiter post in the initial (Pending, New) state.
    ///
    /// The price option is validated to exist; no credit moves until publish.
    ///
    /// # Errors
    ///
    /// Returns `PriceNotFound`, a window validation error, or a database
    /// error.
    pub async fn create_offline_job(
        &self,
        input: CreateOfflineJobInput,
    ) -> Result<JobCreated, JobError> {
        let today = Utc::now().date_naive();
        JobWorkflow::edit(
            WorkflowState::initial(),
            input.content.publish_start,
            input.content.publish_end,
            today,
        )?;

        let txn = self.db.begin().await?;

        product_prices::Entity::find_by_id(input.product_price_id)
            .one(&txn)
            .await?
            .ok_or(JobError::PriceNotFound(input.product_price_id))?;

        let now = Utc::now().into();
        let job_id = Uuid::new_v4();
        let wrapper_id = Uuid::new_v4();

        insert_job(&txn, job_id, &input.content, input.created_by, now).await?;

        offline_jobs::ActiveModel {
            id: Set(wrapper_id),
            job_id: Set(job_id),
            recruiter_id: Set(input.recruiter_id),
            product_price_id: Set(input.product_price_id),
            credit_trx_id: Set(None),
            status: Set(WrapperStatus::Pending),
            publish_ind: Set(crate::entities::sea_orm_active_enums::PublishInd::New),
            last_publish_date: Set(None),
            created_by: Set(input.created_by),
            updated_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(
            wrapper_id = %wrapper_id,
            job_id = %job_id,
            recruiter_id = %input.recruiter_id,
            "offline job created"
        );
        Ok(JobCreated { wrapper_id, job_id })
    }

    /// Edits a post's content (and, for offline posts, its price option).
    ///
    /// Allowed from (Pending, New) with a future start, or from
    /// (Active, Unpublished) with no date restriction. The workflow state is
    /// not changed by an edit.
    ///
    /// # Errors
    ///
    /// Returns `WrapperNotFound`, a workflow error, `PriceNotFound` for an
    /// unknown replacement price, or a database error.
    pub async fn edit_job(
        &self,
        kind: JobKind,
        wrapper_id: Uuid,
        input: EditJobInput,
    ) -> Result<(), JobError> {
        let txn = self.db.begin().await?;
        let wrapper = load_wrapper(&txn, kind, wrapper_id).await?;
        let today = Utc::now().date_naive();

        JobWorkflow::edit(
            wrapper.state,
            input.content.publish_start,
            input.content.publish_end,
            today,
        )?;

        let now = Utc::now().into();

        let job = jobs::Entity::find_by_id(wrapper.job_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(JobError::JobNotFound(wrapper.job_id))?;
        let mut active: jobs::ActiveModel = job.into();
        active.title = Set(input.content.title.clone());
        active.description = Set(input.content.description.clone());
        active.location = Set(input.content.location.clone());
        active.employer_name = Set(input.content.employer_name.clone());
        active.content = Set(input.content.content.clone());
        active.publish_start = Set(input.content.publish_start);
        active.publish_end = Set(input.content.publish_end);
        active.updated_by = Set(input.updated_by);
        active.updated_at = Set(now);
        active.update(&txn).await?;

        let mut update = WrapperUpdate::default();
        if kind == JobKind::Offline {
            if let Some(price_id) = input.product_price_id {
                product_prices::Entity::find_by_id(price_id)
                    .one(&txn)
                    .await?
                    .ok_or(JobError::PriceNotFound(price_id))?;
                update.product_price_id = Some(price_id);
            }
        }
        update_wrapper(&txn, kind, wrapper_id, update, input.updated_by, now).await?;

        txn.commit().await?;
        info!(wrapper_id = %wrapper_id, kind = ?kind, "job edited");
        Ok(())
    }

    /// Publishes a post: validates the transition, charges credit for
    /// offline posts, and creates the published-job snapshot.
    ///
    /// The whole operation is one transaction; if the credit deduction fails
    /// the wrapper stays (Pending, New) and no snapshot appears.
    ///
    /// # Errors
    ///
    /// Returns a workflow error, `CreditStoreError` (including insufficient
    /// balance) for offline posts, or a database error.
    pub async fn publish_job(
        &self,
        kind: JobKind,
        wrapper_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), JobError> {
        let txn = self.db.begin().await?;
        let wrapper = load_wrapper(&txn, kind, wrapper_id).await?;
        let job = jobs::Entity::find_by_id(wrapper.job_id)
            .one(&txn)
            .await?
            .ok_or(JobError::JobNotFound(wrapper.job_id))?;

        let today = Utc::now().date_naive();
        let next = JobWorkflow::publish(wrapper.state, job.publish_start, today)?;
        let now = Utc::now().into();

        let mut credit_trx_id = None;
        if kind.requires_credit() {
            let price_id = wrapper
                .product_price_id
                .ok_or(JobError::PriceNotFound(wrapper_id))?;
            let price = product_prices::Entity::find_by_id(price_id)
                .one(&txn)
                .await?
                .ok_or(JobError::PriceNotFound(price_id))?;
            let recruiter_id = wrapper
                .recruiter_id
                .ok_or(JobError::AccountNotFoundForRecruiter(wrapper_id))?;
            let account = credit_accounts::Entity::find()
                .filter(credit_accounts::Column::RecruiterId.eq(recruiter_id))
                .one(&txn)
                .await?
                .ok_or(JobError::AccountNotFoundForRecruiter(recruiter_id))?;

            let document_number =
                SequenceRepository::next_number_in_txn(&txn, UTILIZATION_SEQUENCE).await?;
            let trx = CreditRepository::deduct_in_txn(
                &txn,
                DeductionInput {
                    account_id: account.id,
                    amount: price.unit_credit_value,
                    job_id: wrapper.job_id,
                    product_id: Some(price.product_id),
                    product_price_id: price.id,
                    document_number: Some(document_number),
                },
            )
            .await?;
            credit_trx_id = Some(trx.id);
        }

        insert_snapshot(&txn, &job, kind, now).await?;

        update_wrapper(
            &txn,
            kind,
            wrapper_id,
            WrapperUpdate {
                state: Some(next),
                last_publish_date: Some(now),
                credit_trx_id,
                product_price_id: None,
            },
            user_id,
            now,
        )
        .await?;

        txn.commit().await?;
        info!(wrapper_id = %wrapper_id, kind = ?kind, "job published");
        Ok(())
    }

    /// Takes a live post down, soft-deleting its published snapshot.
    ///
    /// For admin posts a missing snapshot is tolerated (an external cleanup
    /// may have expired it); for offline posts it aborts the transition.
    ///
    /// # Errors
    ///
    /// Returns a workflow error, `MissingPublishedSnapshot` for offline
    /// posts without a live snapshot, or a database error.
    pub async fn unpublish_job(
        &self,
        kind: JobKind,
        wrapper_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), JobError> {
        let txn = self.db.begin().await?;
        let wrapper = load_wrapper(&txn, kind, wrapper_id).await?;
        let next = JobWorkflow::unpublish(wrapper.state)?;
        let now = Utc::now().into();

        let snapshot = published_jobs::Entity::find()
            .filter(published_jobs::Column::JobId.eq(wrapper.job_id))
            .filter(published_jobs::Column::Status.eq(RecordStatus::Active))
            .lock_exclusive()
            .one(&txn)
            .await?;
        match snapshot {
            Some(row) => {
                let mut active: published_jobs::ActiveModel = row.into();
                active.status = Set(RecordStatus::Deleted);
                active.updated_at = Set(now);
                active.update(&txn).await?;
            }
            None => {
                if kind.requires_snapshot_on_unpublish() {
                    return Err(JobError::MissingPublishedSnapshot(wrapper.job_id));
                }
                warn!(
                    wrapper_id = %wrapper_id,
                    job_id = %wrapper.job_id,
                    "unpublish found no live snapshot, proceeding"
                );
            }
        }

        update_wrapper(
            &txn,
            kind,
            wrapper_id,
            WrapperUpdate {
                state: Some(next),
                ..WrapperUpdate::default()
            },
            user_id,
            now,
        )
        .await?;

        txn.commit().await?;
        info!(wrapper_id = %wrapper_id, kind = ?kind, "job unpublished");
        Ok(())
    }

    /// Puts an unpublished post live again with a fresh snapshot.
    ///
    /// No credit is charged; the original publish already paid.
    ///
    /// # Errors
    ///
    /// Returns a workflow error or a database error.
    pub async fn republish_job(
        &self,
        kind: JobKind,
        wrapper_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), JobError> {
        let txn = self.db.begin().await?;
        let wrapper = load_wrapper(&txn, kind, wrapper_id).await?;
        let next = JobWorkflow::republish(wrapper.state)?;
        let job = jobs::Entity::find_by_id(wrapper.job_id)
            .one(&txn)
            .await?
            .ok_or(JobError::JobNotFound(wrapper.job_id))?;
        let now = Utc::now().into();

        insert_snapshot(&txn, &job, kind, now).await?;

        update_wrapper(
            &txn,
            kind,
            wrapper_id,
            WrapperUpdate {
                state: Some(next),
                last_publish_date: Some(now),
                ..WrapperUpdate::default()
            },
            user_id,
            now,
        )
        .await?;

        txn.commit().await?;
        info!(wrapper_id = %wrapper_id, kind = ?kind, "job republished");
        Ok(())
    }

    /// Soft-deletes a pending post (wrapper and content row).
    ///
    /// # Errors
    ///
    /// Returns a workflow error for non-pending posts, or a database error.
    pub async fn delete_job(
        &self,
        kind: JobKind,
        wrapper_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), JobError> {
        let txn = self.db.begin().await?;
        let wrapper = load_wrapper(&txn, kind, wrapper_id).await?;
        let next = JobWorkflow::delete(wrapper.state)?;
        let now = Utc::now().into();

        let job = jobs::Entity::find_by_id(wrapper.job_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(JobError::JobNotFound(wrapper.job_id))?;
        let mut active: jobs::ActiveModel = job.into();
        active.status = Set(RecordStatus::Deleted);
        active.updated_by = Set(user_id);
        active.updated_at = Set(now);
        active.update(&txn).await?;

        update_wrapper(
            &txn,
            kind,
            wrapper_id,
            WrapperUpdate {
                state: Some(next),
                ..WrapperUpdate::default()
            },
            user_id,
            now,
        )
        .await?;

        txn.commit().await?;
        info!(wrapper_id = %wrapper_id, kind = ?kind, "job deleted");
        Ok(())
    }

    /// Fetches a wrapper with its content row.
    ///
    /// # Errors
    ///
    /// Returns `WrapperNotFound`, `JobNotFound`, or a database error.
    pub async fn get_job(&self, kind: JobKind, wrapper_id: Uuid) -> Result<JobDetails, JobError> {
        let txn = self.db.begin().await?;
        let wrapper = load_wrapper(&txn, kind, wrapper_id).await?;
        let job = jobs::Entity::find_by_id(wrapper.job_id)
            .one(&txn)
            .await?
            .ok_or(JobError::JobNotFound(wrapper.job_id))?;
        txn.commit().await?;

        Ok(JobDetails {
            wrapper_id: wrapper.id,
            kind,
            state: wrapper.state,
            job,
            recruiter_id: wrapper.recruiter_id,
            product_price_id: wrapper.product_price_id,
            credit_trx_id: wrapper.credit_trx_id,
            last_publish_date: wrapper.last_publish_date,
        })
    }

    /// Lists non-deleted wrappers of a kind with their content rows,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_jobs(&self, kind: JobKind) -> Result<Vec<JobDetails>, JobError> {
        let wrappers: Vec<Wrapper> = match kind {
            JobKind::Admin => admin_jobs::Entity::find()
                .filter(admin_jobs::Column::Status.ne(WrapperStatus::Deleted))
                .order_by_desc(admin_jobs::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Wrapper::from_admin)
                .collect(),
            JobKind::Offline => offline_jobs::Entity::find()
                .filter(offline_jobs::Column::Status.ne(WrapperStatus::Deleted))
                .order_by_desc(offline_jobs::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Wrapper::from_offline)
                .collect(),
        };

        let mut details = Vec::with_capacity(wrappers.len());
        for wrapper in wrappers {
            let job = jobs::Entity::find_by_id(wrapper.job_id)
                .one(&self.db)
                .await?
                .ok_or(JobError::JobNotFound(wrapper.job_id))?;
            details.push(JobDetails {
                wrapper_id: wrapper.id,
                kind,
                state: wrapper.state,
                job,
                recruiter_id: wrapper.recruiter_id,
                product_price_id: wrapper.product_price_id,
                credit_trx_id: wrapper.credit_trx_id,
                last_publish_date: wrapper.last_publish_date,
            });
        }
        Ok(details)
    }

    /// Lists live published snapshots ordered by weight (highest first)
    /// then recency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_published(&self) -> Result<Vec<published_jobs::Model>, JobError> {
        Ok(published_jobs::Entity::find()
            .filter(published_jobs::Column::Status.eq(RecordStatus::Active))
            .order_by_desc(published_jobs::Column::Weight)
            .order_by_desc(published_jobs::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}

async fn insert_job(
    txn: &DatabaseTransaction,
    job_id: Uuid,
    content: &JobContentInput,
    created_by: Uuid,
    now: chrono::DateTime<chrono::FixedOffset>,
) -> Result<(), DbErr> {
    jobs::ActiveModel {
        id: Set(job_id),
        title: Set(content.title.clone()),
        description: Set(content.description.clone()),
        location: Set(content.location.clone()),
        employer_name: Set(content.employer_name.clone()),
        content: Set(content.content.clone()),
        publish_start: Set(content.publish_start),
        publish_end: Set(content.publish_end),
        status: Set(RecordStatus::Active),
        created_by: Set(created_by),
        updated_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_snapshot(
    txn: &DatabaseTransaction,
    job: &jobs::Model,
    kind: JobKind,
    now: chrono::DateTime<chrono::FixedOffset>,
) -> Result<(), DbErr> {
    published_jobs::ActiveModel {
        id: Set(Uuid::new_v4()),
        job_id: Set(job.id),
        title: Set(job.title.clone()),
        employer_name: Set(job.employer_name.clone()),
        location: Set(job.location.clone()),
        publish_start: Set(job.publish_start),
        publish_end: Set(job.publish_end),
        weight: Set(kind.listing_weight()),
        status: Set(RecordStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn load_wrapper(
    txn: &DatabaseTransaction,
    kind: JobKind,
    wrapper_id: Uuid,
) -> Result<Wrapper, JobError> {
    match kind {
        JobKind::Admin => admin_jobs::Entity::find_by_id(wrapper_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .map(Wrapper::from_admin)
            .ok_or(JobError::WrapperNotFound(JobKindLabel(kind), wrapper_id)),
        JobKind::Offline => offline_jobs::Entity::find_by_id(wrapper_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .map(Wrapper::from_offline)
            .ok_or(JobError::WrapperNotFound(JobKindLabel(kind), wrapper_id)),
    }
}

async fn update_wrapper(
    txn: &DatabaseTransaction,
    kind: JobKind,
    wrapper_id: Uuid,
    update: WrapperUpdate,
    user_id: Uuid,
    now: chrono::DateTime<chrono::FixedOffset>,
) -> Result<(), DbErr> {
    match kind {
        JobKind::Admin => {
            let mut active = admin_jobs::ActiveModel {
                id: Set(wrapper_id),
                updated_by: Set(user_id),
                updated_at: Set(now),
                ..Default::default()
            };
            if let Some(state) = update.state {
                active.status = Set(state.status.into());
                active.publish_ind = Set(state.publish_ind.into());
            }
            if let Some(date) = update.last_publish_date {
                active.last_publish_date = Set(Some(date));
            }
            active.update(txn).await?;
        }
        JobKind::Offline => {
            let mut active = offline_jobs::ActiveModel {
                id: Set(wrapper_id),
                updated_by: Set(user_id),
                updated_at: Set(now),
                ..Default::default()
            };
            if let Some(state) = update.state {
                active.status = Set(state.status.into());
                active.publish_ind = Set(state.publish_ind.into());
            }
            if let Some(date) = update.last_publish_date {
                active.last_publish_date = Set(Some(date));
            }
            if let Some(trx_id) = update.credit_trx_id {
                active.credit_trx_id = Set(Some(trx_id));
            }
            if let Some(price_id) = update.product_price_id {
                active.product_price_id = Set(price_id);
            }
            active.update(txn).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireboard_core::job::{JobStatus, PublishInd};

    #[test]
    fn test_kind_label_display() {
        assert_eq!(JobKindLabel(JobKind::Admin).to_string(), "Admin");
        assert_eq!(JobKindLabel(JobKind::Offline).to_string(), "Offline");
    }

    #[test]
    fn test_wrapper_projection_from_models() {
        let now = Utc::now().into();
        let admin = admin_jobs::Model {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            status: WrapperStatus::Active,
            publish_ind: crate::entities::sea_orm_active_enums::PublishInd::Unpublished,
            last_publish_date: Some(now),
            created_by: Uuid::new_v4(),
            updated_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let wrapper = Wrapper::from_admin(admin.clone());
        assert_eq!(wrapper.id, admin.id);
        assert_eq!(
            wrapper.state,
            WorkflowState::new(JobStatus::Active, PublishInd::Unpublished)
        );
        assert!(wrapper.recruiter_id.is_none());
        assert!(wrapper.product_price_id.is_none());
    }

    #[test]
    fn test_offline_wrapper_carries_price_and_recruiter() {
        let now = Utc::now().into();
        let recruiter_id = Uuid::new_v4();
        let price_id = Uuid::new_v4();
        let offline = offline_jobs::Model {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            recruiter_id,
            product_price_id: price_id,
            credit_trx_id: None,
            status: WrapperStatus::Pending,
            publish_ind: crate::entities::sea_orm_active_enums::PublishInd::New,
            last_publish_date: None,
            created_by: Uuid::new_v4(),
            updated_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let wrapper = Wrapper::from_offline(offline);
        assert_eq!(wrapper.state, WorkflowState::initial());
        assert_eq!(wrapper.recruiter_id, Some(recruiter_id));
        assert_eq!(wrapper.product_price_id, Some(price_id));
    }

    #[test]
    fn test_sequence_error_maps_to_database() {
        let err: JobError =
            SequenceError::Database(DbErr::Custom("boom".to_owned())).into();
        assert!(matches!(err, JobError::Database(_)));
    }
}
