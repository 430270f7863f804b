//! Quote source abstraction for fetching live USD-based exchange rates.

use crate::domain::RateSnapshot;
use async_trait::async_trait;
use std::fmt;

pub mod frankfurter;
pub mod mock;

pub use frankfurter::FrankfurterRateSource;
pub use mock::MockRateSource;

/// Source of live USD-based quotes.
///
/// The contract is total: `fetch_rates` never fails and always finishes
/// within the implementation's configured time bound. On any failure the
/// caller-supplied fallback is returned with its ratios intact and its
/// timestamp refreshed, so every save flow still completes with a valid,
/// positively-rated snapshot.
#[async_trait]
pub trait RateSource: Send + Sync + fmt::Debug {
    /// Fetch a fresh snapshot.
    ///
    /// # Arguments
    /// * `local_code` - ISO code of the trip's local currency, if it has one
    /// * `fallback` - previous known rates (or the hard defaults) to return
    ///   restamped when the fetch fails
    async fn fetch_rates(&self, local_code: Option<&str>, fallback: &RateSnapshot) -> RateSnapshot;
}

/// Error type for quote fetch attempts, internal to implementations; it
/// never crosses the [`RateSource`] boundary.
#[derive(Debug, Clone)]
pub enum RateSourceError {
    /// Network error (connection refused, DNS failure, request timeout)
    NetworkError(String),
    /// HTTP error (4xx/5xx from the quote service)
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response)
    ParseError(String),
    /// A required quote field was absent or non-positive
    MissingQuote(String),
    /// The overall fetch deadline elapsed
    DeadlineElapsed,
}

impl fmt::Display for RateSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RateSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            RateSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            RateSourceError::MissingQuote(field) => write!(f, "Missing quote: {}", field),
            RateSourceError::DeadlineElapsed => write!(f, "Fetch deadline elapsed"),
        }
    }
}

impl std::error::Error for RateSourceError {}
