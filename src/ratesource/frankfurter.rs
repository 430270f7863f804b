//! Frankfurter quote API client.

use super::{RateSource, RateSourceError};
use crate::config::Config;
use crate::domain::{Decimal, RateSnapshot};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Rate source backed by the Frankfurter API
/// (`GET {base}/latest?from=USD&to=ILS,EUR[,LOCAL]`).
///
/// Every request carries an explicit timeout and retries are bounded by the
/// same deadline, so the save-with-fresh-rates flows can never hang on a
/// stuck quote fetch.
#[derive(Debug, Clone)]
pub struct FrankfurterRateSource {
    client: Client,
    base_url: String,
    deadline: Duration,
}

impl FrankfurterRateSource {
    /// Create a new rate source with the given overall fetch deadline.
    pub fn new(base_url: String, deadline: Duration) -> Self {
        let client = Client::builder()
            .timeout(deadline)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url,
            deadline,
        }
    }

    /// Create with the public Frankfurter URL and a 5 second deadline.
    pub fn default_url() -> Self {
        Self::new(
            "https://api.frankfurter.app".to_string(),
            Duration::from_secs(5),
        )
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quote_api_url.clone(), config.rate_fetch_timeout())
    }

    async fn try_fetch(&self, local_code: Option<&str>) -> Result<RateSnapshot, RateSourceError> {
        let mut to = vec!["ILS", "EUR"];
        if let Some(code) = local_code {
            to.push(code);
        }
        let url = format!("{}/latest?from=USD&to={}", self.base_url, to.join(","));
        debug!("Fetching quotes: {}", url);

        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.deadline),
            ..Default::default()
        };

        let body = retry(backoff, || async {
            let response = self.client.get(&url).send().await.map_err(|e| {
                backoff::Error::transient(RateSourceError::NetworkError(e.to_string()))
            })?;

            let status = response.status();
            if status.is_server_error() {
                return Err(backoff::Error::transient(RateSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(RateSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(RateSourceError::ParseError(e.to_string())))
        })
        .await?;

        parse_snapshot(&body, local_code)
    }
}

#[async_trait]
impl RateSource for FrankfurterRateSource {
    async fn fetch_rates(&self, local_code: Option<&str>, fallback: &RateSnapshot) -> RateSnapshot {
        let attempt = tokio::time::timeout(self.deadline, self.try_fetch(local_code)).await;
        match attempt {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                warn!("Quote fetch failed, using fallback rates: {}", e);
                fallback.restamped()
            }
            Err(_) => {
                warn!(
                    "Quote fetch exceeded {:?}, using fallback rates",
                    self.deadline
                );
                fallback.restamped()
            }
        }
    }
}

fn parse_snapshot(
    body: &serde_json::Value,
    local_code: Option<&str>,
) -> Result<RateSnapshot, RateSourceError> {
    let usd_ils = required_quote(body, "ILS")?;
    let usd_eur = required_quote(body, "EUR")?;

    // The local quote is best-effort: a missing or bad value leaves the
    // snapshot without a local ratio rather than failing the fetch.
    let usd_local = local_code.and_then(|code| {
        body.get("rates")
            .and_then(|rates| rates.get(code))
            .and_then(|v| v.as_f64())
            .and_then(Decimal::from_f64)
            .filter(|d| d.is_positive())
    });

    Ok(RateSnapshot::new(usd_eur, usd_ils, usd_local))
}

fn required_quote(body: &serde_json::Value, field: &str) -> Result<Decimal, RateSourceError> {
    body.get("rates")
        .and_then(|rates| rates.get(field))
        .and_then(|v| v.as_f64())
        .and_then(Decimal::from_f64)
        .filter(|d| d.is_positive())
        .ok_or_else(|| RateSourceError::MissingQuote(field.to_string()))
}
