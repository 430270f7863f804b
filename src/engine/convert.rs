//! Currency conversion over a rate matrix.

use super::RateMatrix;
use crate::domain::{Currency, Decimal, RateSnapshot};

/// Convert `amount` from one currency to another using the given matrix.
///
/// When either currency (or the pair) is missing from the matrix the amount
/// is returned unchanged. The identity fallback is deliberate: an aggregate
/// with one unconvertible record shows that record at face value instead of
/// failing the whole view. Accepted imprecision, not a defect.
///
/// No rounding happens here; callers round for display.
pub fn convert(amount: Decimal, from: &Currency, to: &Currency, matrix: &RateMatrix) -> Decimal {
    match matrix.rate(from, to) {
        Some(rate) => amount * rate,
        None => amount,
    }
}

/// Convenience for one-off conversions where no matrix is being reused:
/// builds the matrix from the snapshot and converts.
pub fn convert_with_snapshot(
    amount: Decimal,
    from: &Currency,
    to: &Currency,
    snapshot: &RateSnapshot,
    local_currency: Option<&Currency>,
) -> Decimal {
    let matrix = RateMatrix::build(snapshot, local_currency);
    convert(amount, from, to, &matrix)
}
