use crate::domain::ExpenseValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Top-level error for ledger operations.
///
/// Rate-fetch failures never appear here: the rate source degrades to
/// fallback values internally, so the worst ledger outcome is a conversion
/// shown at face value, not an error.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ExpenseValidationError),
    #[error("Budget is locked")]
    BudgetLocked,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Preference store error: {0}")]
    Prefs(#[from] sqlx::Error),
}
