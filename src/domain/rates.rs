//! Timestamped USD-based rate snapshots.

use super::Decimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard default used when no quote was ever fetched successfully.
pub const DEFAULT_USD_ILS: &str = "3.7";
/// Hard default used when no quote was ever fetched successfully.
pub const DEFAULT_USD_EUR: &str = "0.92";

/// A set of USD-based conversion ratios frozen at a point in time.
///
/// Snapshots are written once, onto a trip when its budget is locked and onto
/// each expense at first save, and are never replaced by later live fetches.
/// `usd_local` is present only when the trip had a resolved local currency at
/// capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSnapshot {
    #[serde(rename = "USDEUR")]
    pub usd_eur: Decimal,
    #[serde(rename = "USDILS")]
    pub usd_ils: Decimal,
    #[serde(rename = "USDLocal", skip_serializing_if = "Option::is_none", default)]
    pub usd_local: Option<Decimal>,
    #[serde(rename = "lockedAt")]
    pub locked_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Snapshot from fetched quotes, stamped now.
    pub fn new(usd_eur: Decimal, usd_ils: Decimal, usd_local: Option<Decimal>) -> Self {
        RateSnapshot {
            usd_eur,
            usd_ils,
            usd_local,
            locked_at: Utc::now(),
        }
    }

    /// The hard-default snapshot (USDILS=3.7, USDEUR=0.92), stamped now.
    ///
    /// Both defaults are compile-time valid decimals.
    pub fn defaults() -> Self {
        RateSnapshot {
            usd_eur: Decimal::parse(DEFAULT_USD_EUR).unwrap_or_else(|_| unreachable!()),
            usd_ils: Decimal::parse(DEFAULT_USD_ILS).unwrap_or_else(|_| unreachable!()),
            usd_local: None,
            locked_at: Utc::now(),
        }
    }

    /// The same ratios restamped with the current time. Used when a fetch
    /// fails and the previous known rates are carried forward.
    pub fn restamped(&self) -> Self {
        RateSnapshot {
            locked_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Both base ratios are present and positive. Snapshots produced by this
    /// crate always satisfy this; stored documents from older clients may not.
    pub fn is_valid(&self) -> bool {
        self.usd_eur.is_positive() && self.usd_ils.is_positive()
    }

    /// The EUR base ratio, substituting the hard default when a stored
    /// document carries a non-positive value. Keeps divisions on the ratio
    /// well defined.
    pub fn usd_eur_or_default(&self) -> Decimal {
        positive_or(self.usd_eur, DEFAULT_USD_EUR)
    }

    /// The ILS base ratio, substituting the hard default when a stored
    /// document carries a non-positive value.
    pub fn usd_ils_or_default(&self) -> Decimal {
        positive_or(self.usd_ils, DEFAULT_USD_ILS)
    }
}

fn positive_or(value: Decimal, default: &str) -> Decimal {
    if value.is_positive() {
        value
    } else {
        Decimal::parse(default).unwrap_or_else(|_| Decimal::one())
    }
}
