//! Pairwise conversion table built from a rate snapshot.

use crate::domain::{Currency, Decimal, RateSnapshot};

/// A complete conversion table over USD, EUR, ILS and at most one trip-local
/// currency, derived from USD-based ratios.
///
/// Every pair is composed through USD, so the table is closed and consistent
/// by construction: `rate(x, y) * rate(y, x) == 1` for any two present
/// currencies. The local row exists only when the trip has a resolved local
/// currency *and* the snapshot carries a positive ratio for it; absence is
/// explicit (`rate` returns `None`), never a zero fill.
#[derive(Debug, Clone, PartialEq)]
pub struct RateMatrix {
    usd_eur: Decimal,
    usd_ils: Decimal,
    local: Option<(Currency, Decimal)>,
}

impl RateMatrix {
    /// Build the table from a snapshot and the trip's resolved local
    /// currency, if any.
    ///
    /// Non-positive base ratios (possible in documents written by older
    /// clients) are replaced by the hard defaults, ratio by ratio, matching
    /// how the host application has always read them.
    pub fn build(snapshot: &RateSnapshot, local_currency: Option<&Currency>) -> Self {
        let usd_eur = snapshot.usd_eur_or_default();
        let usd_ils = snapshot.usd_ils_or_default();

        // A local currency that is itself USD/EUR/ILS is already covered by
        // the core triangle.
        let local = match local_currency {
            Some(currency @ Currency::Local(_)) => snapshot
                .usd_local
                .filter(|ratio| ratio.is_positive())
                .map(|ratio| (currency.clone(), ratio)),
            _ => None,
        };

        RateMatrix {
            usd_eur,
            usd_ils,
            local,
        }
    }

    /// The multiplier taking an amount in `from` to an amount in `to`, or
    /// `None` when either currency is not in the table.
    pub fn rate(&self, from: &Currency, to: &Currency) -> Option<Decimal> {
        let from_factor = self.usd_factor(from)?;
        let to_factor = self.usd_factor(to)?;
        Some(to_factor / from_factor)
    }

    /// Whether the table has a row for the given currency.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.usd_factor(currency).is_some()
    }

    /// Units of `currency` per one USD. Factors are positive by
    /// construction, so division in [`RateMatrix::rate`] is always defined.
    fn usd_factor(&self, currency: &Currency) -> Option<Decimal> {
        match currency {
            Currency::Usd => Some(Decimal::one()),
            Currency::Eur => Some(self.usd_eur),
            Currency::Ils => Some(self.usd_ils),
            Currency::Local(_) => match &self.local {
                Some((local, ratio)) if local == currency => Some(*ratio),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(usd_eur: &str, usd_ils: &str, usd_local: Option<&str>) -> RateSnapshot {
        RateSnapshot::new(
            Decimal::parse(usd_eur).unwrap(),
            Decimal::parse(usd_ils).unwrap(),
            usd_local.map(|s| Decimal::parse(s).unwrap()),
        )
    }

    #[test]
    fn test_core_triangle() {
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", None), None);

        assert_eq!(
            matrix.rate(&Currency::Usd, &Currency::Eur),
            Some(Decimal::parse("0.92").unwrap())
        );
        assert_eq!(
            matrix.rate(&Currency::Usd, &Currency::Ils),
            Some(Decimal::parse("3.7").unwrap())
        );
        // EUR to ILS composes through USD: 3.7 / 0.92.
        let eur_ils = matrix.rate(&Currency::Eur, &Currency::Ils).unwrap();
        assert_eq!(
            eur_ils,
            Decimal::parse("3.7").unwrap() / Decimal::parse("0.92").unwrap()
        );
    }

    #[test]
    fn test_identity_rate_on_diagonal() {
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", None), None);
        for c in [Currency::Usd, Currency::Eur, Currency::Ils] {
            assert_eq!(matrix.rate(&c, &c), Some(Decimal::one()));
        }
    }

    #[test]
    fn test_local_row_requires_both_currency_and_ratio() {
        let thb = Currency::from("THB");

        // Ratio present, currency supplied: row exists.
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", Some("35")), Some(&thb));
        assert!(matrix.contains(&thb));
        assert_eq!(
            matrix.rate(&thb, &Currency::Usd),
            Some(Decimal::one() / Decimal::parse("35").unwrap())
        );

        // Ratio absent: explicit omission.
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", None), Some(&thb));
        assert!(!matrix.contains(&thb));
        assert_eq!(matrix.rate(&thb, &Currency::Usd), None);

        // Ratio present but no local currency supplied: no orphan row.
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", Some("35")), None);
        assert!(!matrix.contains(&thb));
    }

    #[test]
    fn test_different_local_code_not_found() {
        let thb = Currency::from("THB");
        let jpy = Currency::from("JPY");
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", Some("35")), Some(&thb));
        assert_eq!(matrix.rate(&jpy, &Currency::Usd), None);
    }

    #[test]
    fn test_core_local_currency_folds_into_triangle() {
        // France: local currency resolves to EUR, which needs no extra row.
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", None), Some(&Currency::Eur));
        assert!(matrix.contains(&Currency::Eur));
    }

    #[test]
    fn test_non_positive_base_ratios_fall_back_to_defaults() {
        let matrix = RateMatrix::build(&snapshot("0", "-1", None), None);
        assert_eq!(
            matrix.rate(&Currency::Usd, &Currency::Eur),
            Some(Decimal::parse("0.92").unwrap())
        );
        assert_eq!(
            matrix.rate(&Currency::Usd, &Currency::Ils),
            Some(Decimal::parse("3.7").unwrap())
        );
    }

    #[test]
    fn test_reciprocal_rates_multiply_to_one_within_tolerance() {
        let matrix = RateMatrix::build(&snapshot("0.92", "3.7", Some("35.17")), Some(&Currency::from("THB")));
        let tolerance = Decimal::parse("0.000000001").unwrap();
        let pairs = [
            (Currency::Usd, Currency::Eur),
            (Currency::Eur, Currency::Ils),
            (Currency::Ils, Currency::from("THB")),
        ];
        for (x, y) in pairs {
            let forward = matrix.rate(&x, &y).unwrap();
            let back = matrix.rate(&y, &x).unwrap();
            let product = forward * back;
            assert!(
                (product - Decimal::one()).abs() < tolerance,
                "{} -> {} round trip drifted: {}",
                x,
                y,
                product
            );
        }
    }
}
