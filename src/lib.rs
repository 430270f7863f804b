pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod prefs;
pub mod ratesource;
pub mod selector;
pub mod service;
pub mod store;

pub use config::Config;
pub use domain::{
    Budget, Currency, CurrencyResolver, Decimal, DisplayCurrency, Expense, ExpenseDraft,
    RateSnapshot, StaticCurrencyResolver, Trip, TripMeta,
};
pub use engine::{convert, summarize, LedgerContext, LedgerSummary, RateMatrix};
pub use error::LedgerError;
pub use prefs::{init_prefs_db, PreferenceStore};
pub use ratesource::{FrankfurterRateSource, MockRateSource, RateSource, RateSourceError};
pub use selector::CurrencySelector;
pub use service::LedgerService;
pub use store::{MemoryTripStore, StoreError, TripEvent, TripStore};
