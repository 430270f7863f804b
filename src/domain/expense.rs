//! Expense records and their validated entry form.

use super::{Currency, Decimal, RateSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single expense inside a trip document.
///
/// `rates` is the snapshot frozen at first save; `None` only on records
/// written by clients that predate rate locking. Geolocation is carried for
/// the map layer and is irrelevant to ledger math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub category: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rates: Option<RateSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lng: Option<f64>,
}

/// Validation failures rejected at the entry boundary, before anything
/// reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseValidationError {
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("currency {0} is not available for this trip")]
    CurrencyNotAllowed(Currency),
}

/// Unvalidated form input for creating or editing an expense.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseDraft {
    pub desc: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl ExpenseDraft {
    /// Check the draft against the trip's allowed currency set: the three
    /// core currencies plus the trip's resolved local currency, if any.
    pub fn validate(&self, local_currency: Option<&Currency>) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        let allowed = self.currency.is_core() || Some(&self.currency) == local_currency;
        if !allowed {
            return Err(ExpenseValidationError::CurrencyNotAllowed(
                self.currency.clone(),
            ));
        }
        Ok(())
    }
}
