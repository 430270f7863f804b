//! Domain types for the trip ledger.
//!
//! This module provides:
//! - Exact numeric handling via the Decimal wrapper
//! - The Currency sum type and the closed DisplayCurrency cycle
//! - RateSnapshot, Trip, Budget and Expense documents with the stored
//!   document field names
//! - The injectable destination to local-currency resolver

pub mod currency;
pub mod decimal;
pub mod destination;
pub mod expense;
pub mod rates;
pub mod trip;

pub use currency::{Currency, DisplayCurrency};
pub use decimal::Decimal;
pub use destination::{CurrencyResolver, StaticCurrencyResolver};
pub use expense::{Expense, ExpenseDraft, ExpenseValidationError};
pub use rates::{RateSnapshot, DEFAULT_USD_EUR, DEFAULT_USD_ILS};
pub use trip::{Budget, Trip, TripMeta};
