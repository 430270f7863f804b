//! Pure computation engine for the ledger: conversion and aggregation.
//!
//! Nothing in this module performs I/O or reads ambient state; everything is
//! a function of an explicit [`LedgerContext`].

use crate::domain::{Currency, CurrencyResolver, Trip};

pub mod convert;
pub mod matrix;
pub mod summary;

pub use convert::{convert, convert_with_snapshot};
pub use matrix::RateMatrix;
pub use summary::{summarize, LedgerSummary};

/// Everything the engine needs to know about the active trip, threaded
/// explicitly through the pure functions instead of living in a singleton.
#[derive(Debug, Clone)]
pub struct LedgerContext<'a> {
    pub trip: &'a Trip,
    /// The trip's local currency as resolved from its destination. Derived,
    /// never persisted.
    pub local_currency: Option<Currency>,
}

impl<'a> LedgerContext<'a> {
    pub fn new(trip: &'a Trip, local_currency: Option<Currency>) -> Self {
        Self {
            trip,
            local_currency,
        }
    }

    /// Build a context by resolving the trip's destination.
    pub fn resolve(trip: &'a Trip, resolver: &dyn CurrencyResolver) -> Self {
        let local_currency = resolver.resolve(&trip.destination);
        Self {
            trip,
            local_currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RateSnapshot, StaticCurrencyResolver, TripMeta};

    #[test]
    fn test_resolve_derives_local_currency() {
        let trip = Trip::new(
            "t1".to_string(),
            TripMeta {
                destination: "תאילנד".to_string(),
                ..TripMeta::default()
            },
            RateSnapshot::defaults(),
        );
        let resolver = StaticCurrencyResolver::stock();
        let ctx = LedgerContext::resolve(&trip, &resolver);
        assert_eq!(ctx.local_currency, Some(Currency::from("THB")));
    }

    #[test]
    fn test_resolve_unknown_destination_yields_none() {
        let trip = Trip::new(
            "t1".to_string(),
            TripMeta {
                destination: "nowhere in particular".to_string(),
                ..TripMeta::default()
            },
            RateSnapshot::defaults(),
        );
        let resolver = StaticCurrencyResolver::stock();
        let ctx = LedgerContext::resolve(&trip, &resolver);
        assert_eq!(ctx.local_currency, None);
    }
}
