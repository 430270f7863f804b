//! Destination-text to local-currency resolution.

use super::Currency;
use std::collections::HashMap;
use std::fmt;

/// Resolves a trip's free-text destination to its local currency.
///
/// Injectable so hosts can swap the lookup table (or back it with a real
/// geo service) without touching ledger code. Returns `None` when the text
/// matches nothing known; the ledger never guesses.
pub trait CurrencyResolver: Send + Sync + fmt::Debug {
    fn resolve(&self, destination: &str) -> Option<Currency>;
}

/// Table-driven resolver over exact country names.
///
/// A comma-separated multi-destination string resolves to the first token
/// with a known mapping. Tokens are trimmed; unmatched tokens are skipped
/// rather than treated as errors.
#[derive(Debug, Clone)]
pub struct StaticCurrencyResolver {
    table: HashMap<String, String>,
}

impl StaticCurrencyResolver {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// The stock country table of the host application (Hebrew country
    /// names, as entered in the destination field).
    pub fn stock() -> Self {
        let table = [
            ("תאילנד", "THB"),
            ("צרפת", "EUR"),
            ("יפן", "JPY"),
            ("בריטניה", "GBP"),
            ("גרמניה", "EUR"),
            ("אוסטרליה", "AUD"),
            ("קנדה", "CAD"),
            ("מקסיקו", "MXN"),
            ("טורקיה", "TRY"),
            ("שווייץ", "CHF"),
            ("סינגפור", "SGD"),
        ]
        .into_iter()
        .map(|(country, code)| (country.to_string(), code.to_string()))
        .collect();
        Self { table }
    }
}

impl CurrencyResolver for StaticCurrencyResolver {
    fn resolve(&self, destination: &str) -> Option<Currency> {
        destination
            .split(',')
            .map(str::trim)
            .find_map(|token| self.table.get(token))
            .map(|code| Currency::from(code.as_str()))
    }
}
