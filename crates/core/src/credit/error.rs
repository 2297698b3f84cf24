//! Credit error types for deduction and balance operations.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during credit operations.
#[derive(Debug, Error)]
pub enum CreditError {
    // ========== Validation Errors ==========
    /// Deduction amount cannot be zero.
    #[error("Deduction amount cannot be zero")]
    ZeroAmount,

    /// Deduction amount cannot be negative.
    #[error("Deduction amount cannot be negative")]
    NegativeAmount,

    // ========== Business Outcomes ==========
    /// Requested amount exceeds the account's available credit.
    ///
    /// An expected outcome, not a fault: the caller surfaces a top-up-and-retry
    /// message and never opens a transaction.
    #[error("Insufficient credit: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the caller asked to deduct.
        requested: Decimal,
        /// Available credit at the time of the request.
        available: Decimal,
    },

    // ========== Account Errors ==========
    /// Credit account not found.
    #[error("Credit account not found: {0}")]
    AccountNotFound(Uuid),

    /// Credit account is not active.
    #[error("Credit account {0} is not active")]
    AccountInactive(Uuid),

    // ========== Invariant Violations ==========
    /// No drainable lots exist despite a sufficient aggregate balance.
    ///
    /// Signals ledger corruption; never silently skipped.
    #[error("No available credit lots for account {0} despite sufficient balance")]
    NoAvailableCredit(Uuid),

    /// A balance would go negative after the deduction.
    ///
    /// Fatal: the enclosing transaction must be aborted.
    #[error("Negative balance invariant violated for {entity}: {value}")]
    NegativeBalanceInvariant {
        /// Which balance went negative (lot ID or "account <id>").
        entity: String,
        /// The offending value.
        value: Decimal,
    },

    // ========== Concurrency Errors ==========
    /// The store rejected one of two conflicting commits.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,
}

impl CreditError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_CREDIT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::NoAvailableCredit(_) => "NO_AVAILABLE_CREDIT",
            Self::NegativeBalanceInvariant { .. } => "NEGATIVE_BALANCE_INVARIANT",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::ZeroAmount | Self::NegativeAmount => 400,
            Self::AccountNotFound(_) => 404,
            Self::AccountInactive(_) | Self::InsufficientBalance { .. } => 422,
            Self::ConcurrentModification => 409,
            Self::NoAvailableCredit(_) | Self::NegativeBalanceInvariant { .. } => 500,
        }
    }

    /// Returns true if this error indicates ledger corruption.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::NoAvailableCredit(_) | Self::NegativeBalanceInvariant { .. }
        )
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CreditError::InsufficientBalance {
                requested: dec!(120),
                available: dec!(100),
            }
            .error_code(),
            "INSUFFICIENT_CREDIT"
        );
        assert_eq!(
            CreditError::NoAvailableCredit(Uuid::nil()).error_code(),
            "NO_AVAILABLE_CREDIT"
        );
        assert_eq!(CreditError::ZeroAmount.error_code(), "ZERO_AMOUNT");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(CreditError::ZeroAmount.http_status_code(), 400);
        assert_eq!(
            CreditError::AccountNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            CreditError::InsufficientBalance {
                requested: dec!(1),
                available: dec!(0),
            }
            .http_status_code(),
            422
        );
        assert_eq!(CreditError::ConcurrentModification.http_status_code(), 409);
        assert_eq!(
            CreditError::NegativeBalanceInvariant {
                entity: "lot".into(),
                value: dec!(-1),
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_invariant_classification() {
        assert!(CreditError::NoAvailableCredit(Uuid::nil()).is_invariant_violation());
        assert!(CreditError::NegativeBalanceInvariant {
            entity: "account".into(),
            value: dec!(-5),
        }
        .is_invariant_violation());
        assert!(!CreditError::InsufficientBalance {
            requested: dec!(1),
            available: dec!(0),
        }
        .is_invariant_violation());
    }

    #[test]
    fn test_retryable() {
        assert!(CreditError::ConcurrentModification.is_retryable());
        assert!(!CreditError::ZeroAmount.is_retryable());
    }

    #[test]
    fn test_insufficient_display() {
        let err = CreditError::InsufficientBalance {
            requested: dec!(120),
            available: dec!(100),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient credit: requested 120, available 100"
        );
    }
}
