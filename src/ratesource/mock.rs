//! Mock rate source for testing without network calls.

use super::RateSource;
use crate::domain::{Decimal, RateSnapshot};
use async_trait::async_trait;

/// Mock rate source returning a configured snapshot, or the fallback when
/// configured to fail.
#[derive(Debug, Clone)]
pub struct MockRateSource {
    snapshot: Option<RateSnapshot>,
}

impl MockRateSource {
    /// A source that always "fetches" the given base ratios.
    pub fn with_rates(usd_eur: Decimal, usd_ils: Decimal) -> Self {
        Self {
            snapshot: Some(RateSnapshot::new(usd_eur, usd_ils, None)),
        }
    }

    /// A source that always returns the given snapshot, restamped.
    pub fn with_snapshot(snapshot: RateSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    /// Include a local-currency ratio in fetched snapshots.
    pub fn with_local(mut self, usd_local: Decimal) -> Self {
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.usd_local = Some(usd_local);
        }
        self
    }

    /// A source whose every fetch fails, exercising the fallback path.
    pub fn failing() -> Self {
        Self { snapshot: None }
    }
}

#[async_trait]
impl RateSource for MockRateSource {
    async fn fetch_rates(&self, local_code: Option<&str>, fallback: &RateSnapshot) -> RateSnapshot {
        match &self.snapshot {
            Some(snapshot) => {
                let mut fresh = snapshot.restamped();
                // Only trips with a local currency receive a local ratio,
                // like the real source's `to=` parameter.
                if local_code.is_none() {
                    fresh.usd_local = None;
                }
                fresh
            }
            None => fallback.restamped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_snapshot_is_returned() {
        let source = MockRateSource::with_rates(
            Decimal::parse("0.85").unwrap(),
            Decimal::parse("3.5").unwrap(),
        );
        let snapshot = source.fetch_rates(None, &RateSnapshot::defaults()).await;
        assert_eq!(snapshot.usd_eur, Decimal::parse("0.85").unwrap());
        assert_eq!(snapshot.usd_ils, Decimal::parse("3.5").unwrap());
    }

    #[tokio::test]
    async fn test_failing_source_returns_fallback_restamped() {
        let source = MockRateSource::failing();
        let fallback = RateSnapshot::new(
            Decimal::parse("0.80").unwrap(),
            Decimal::parse("3.2").unwrap(),
            None,
        );
        let snapshot = source.fetch_rates(Some("THB"), &fallback).await;
        assert_eq!(snapshot.usd_eur, fallback.usd_eur);
        assert_eq!(snapshot.usd_ils, fallback.usd_ils);
        assert!(snapshot.locked_at >= fallback.locked_at);
    }

    #[tokio::test]
    async fn test_local_ratio_only_with_local_code() {
        let source = MockRateSource::with_rates(
            Decimal::parse("0.92").unwrap(),
            Decimal::parse("3.7").unwrap(),
        )
        .with_local(Decimal::parse("35").unwrap());

        let with = source
            .fetch_rates(Some("THB"), &RateSnapshot::defaults())
            .await;
        assert!(with.usd_local.is_some());

        let without = source.fetch_rates(None, &RateSnapshot::defaults()).await;
        assert!(without.usd_local.is_none());
    }
}
