//! Atomic per-key document number generator.
//!
//! Used to stamp invoice numbers on utilization ledger entries. One row per
//! key; the increment happens under a row lock so concurrent callers never
//! observe the same number.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QuerySelect,
    Set, TransactionTrait,
};

use crate::entities::document_sequences;

/// Error types for sequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for monotonically increasing document numbers.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    db: DatabaseConnection,
}

impl SequenceRepository {
    /// Creates a new sequence repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the next number for `key` in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn next_number(&self, key: &str) -> Result<i64, SequenceError> {
        let txn = self.db.begin().await?;
        let number = Self::next_number_in_txn(&txn, key).await?;
        txn.commit().await?;
        Ok(number)
    }

    /// Returns the next number for `key` inside the caller's transaction.
    ///
    /// The sequence row is read with `SELECT ... FOR UPDATE`; a missing row
    /// is created starting at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn next_number_in_txn(
        txn: &DatabaseTransaction,
        key: &str,
    ) -> Result<i64, SequenceError> {
        let now = Utc::now().into();

        let existing = document_sequences::Entity::find_by_id(key.to_owned())
            .lock_exclusive()
            .one(txn)
            .await?;

        match existing {
            Some(row) => {
                let next = row.current + 1;
                let mut active: document_sequences::ActiveModel = row.into();
                active.current = Set(next);
                active.updated_at = Set(now);
                active.update(txn).await?;
                Ok(next)
            }
            None => {
                let row = document_sequences::ActiveModel {
                    key: Set(key.to_owned()),
                    current: Set(1),
                    updated_at: Set(now),
                };
                row.insert(txn).await?;
                Ok(1)
            }
        }
    }
}
