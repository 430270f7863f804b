//! Trip document and per-currency budget.

use super::{Decimal, DisplayCurrency, Expense, RateSnapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-currency budget figures. Non-negative whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(rename = "USD", default)]
    pub usd: u64,
    #[serde(rename = "EUR", default)]
    pub eur: u64,
    #[serde(rename = "ILS", default)]
    pub ils: u64,
}

impl Budget {
    pub fn get(&self, currency: DisplayCurrency) -> u64 {
        match currency {
            DisplayCurrency::Usd => self.usd,
            DisplayCurrency::Eur => self.eur,
            DisplayCurrency::Ils => self.ils,
        }
    }

    /// Cross-fill the other two figures from one edited figure, rounding
    /// through USD with the given snapshot. Mirrors how the budget form keeps
    /// its three fields in sync while editing.
    ///
    /// Non-positive ratios in the snapshot are substituted with the hard
    /// defaults before dividing, so a bad stored document cannot panic this
    /// path.
    pub fn aligned(base: DisplayCurrency, amount: u64, rates: &RateSnapshot) -> Budget {
        let usd_eur = rates.usd_eur_or_default();
        let usd_ils = rates.usd_ils_or_default();
        let amount = Decimal::from_u64(amount);
        let usd = match base {
            DisplayCurrency::Usd => amount,
            DisplayCurrency::Eur => Decimal::from_u64((amount / usd_eur).round_to_u64()),
            DisplayCurrency::Ils => Decimal::from_u64((amount / usd_ils).round_to_u64()),
        };
        Budget {
            usd: usd.round_to_u64(),
            eur: match base {
                DisplayCurrency::Eur => amount.round_to_u64(),
                _ => (usd * usd_eur).round_to_u64(),
            },
            ils: match base {
                DisplayCurrency::Ils => amount.round_to_u64(),
                _ => (usd * usd_ils).round_to_u64(),
            },
        }
    }
}

/// Editable trip metadata, saved as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripMeta {
    pub destination: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub people: Vec<String>,
}

/// A trip document as held by the remote store.
///
/// `expenses` is keyed by expense id; a BTreeMap keeps iteration (and so
/// aggregation logs and serialized output) deterministic. The trip's resolved
/// local currency is derived from `destination` at read time and deliberately
/// not part of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub budget_locked: bool,
    pub rates: RateSnapshot,
    #[serde(default)]
    pub expenses: BTreeMap<String, Expense>,
}

impl Trip {
    /// A fresh trip with a zero budget and the given starting snapshot.
    pub fn new(id: String, meta: TripMeta, rates: RateSnapshot) -> Self {
        Trip {
            id,
            destination: meta.destination,
            start: meta.start,
            end: meta.end,
            people: meta.people,
            budget: Budget::default(),
            budget_locked: false,
            rates,
            expenses: BTreeMap::new(),
        }
    }

    pub fn apply_meta(&mut self, meta: TripMeta) {
        self.destination = meta.destination;
        self.start = meta.start;
        self.end = meta.end;
        self.people = meta.people;
    }
}
