//! Credit-lot ledger logic.
//!
//! This module implements the credit-accounting core:
//! - Ledger lot and account snapshot types
//! - FIFO deduction planning (oldest lot drained first)
//! - Balance invariant checks
//! - Error types for credit operations

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::{apply_to_balance, check_available, plan_deduction};
pub use error::CreditError;
pub use types::{AccountBalances, AccountStatus, DeductionPlan, LotDraw, LotSnapshot, TrxType};
