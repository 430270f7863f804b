//! Currency codes: the three core currencies plus an open "local" variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency an expense can be entered in.
///
/// USD, EUR and ILS are the closed core set; `Local` carries any other ISO
/// code resolved from a trip's destination (THB, JPY, ...). A destination
/// that resolves to a core currency yields the core variant, never
/// `Local("EUR")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Ils,
    Local(String),
}

impl Currency {
    /// The ISO 4217 code.
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Ils => "ILS",
            Currency::Local(code) => code,
        }
    }

    /// Whether this is one of the three core currencies.
    pub fn is_core(&self) -> bool {
        !matches!(self, Currency::Local(_))
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        match code.as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "ILS" => Currency::Ils,
            _ => Currency::Local(code),
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::from(code.to_string())
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The currency the aggregate budget/paid/balance view is rendered in.
///
/// A closed 3-cycle: a trip's local currency is an expense-entry option, not
/// a display option, so it is excluded here by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayCurrency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "ILS")]
    Ils,
}

impl DisplayCurrency {
    /// Advance to the next currency in the fixed USD, EUR, ILS cycle.
    pub fn cycle(self) -> Self {
        match self {
            DisplayCurrency::Usd => DisplayCurrency::Eur,
            DisplayCurrency::Eur => DisplayCurrency::Ils,
            DisplayCurrency::Ils => DisplayCurrency::Usd,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DisplayCurrency::Usd => "USD",
            DisplayCurrency::Eur => "EUR",
            DisplayCurrency::Ils => "ILS",
        }
    }

    /// Parse a stored preference value. Unknown values map to None so a
    /// corrupted preference falls back to the USD default at the call site.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(DisplayCurrency::Usd),
            "EUR" => Some(DisplayCurrency::Eur),
            "ILS" => Some(DisplayCurrency::Ils),
            _ => None,
        }
    }
}

impl From<DisplayCurrency> for Currency {
    fn from(display: DisplayCurrency) -> Self {
        match display {
            DisplayCurrency::Usd => Currency::Usd,
            DisplayCurrency::Eur => Currency::Eur,
            DisplayCurrency::Ils => Currency::Ils,
        }
    }
}

impl fmt::Display for DisplayCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
