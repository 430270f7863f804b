//! Budget/paid/balance aggregation over a trip's expenses.

use super::{convert, LedgerContext, RateMatrix};
use crate::domain::{Currency, Decimal, DisplayCurrency};
use serde::Serialize;

/// The aggregate ledger view for one trip in one display currency.
///
/// Figures are exact; round for display with [`Decimal::round_2dp`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub display: DisplayCurrency,
    pub budget: Decimal,
    pub paid: Decimal,
    pub balance: Decimal,
}

/// Fold the trip's expenses into a budget/paid/balance view.
///
/// Each expense converts with its *own* frozen snapshot; only records that
/// predate rate locking fall back to the trip's current snapshot. The result
/// is a pure function of the context and display currency, so live rate
/// movement never changes it.
pub fn summarize(ctx: &LedgerContext<'_>, display: DisplayCurrency) -> LedgerSummary {
    let target = Currency::from(display);
    let trip_matrix = RateMatrix::build(&ctx.trip.rates, ctx.local_currency.as_ref());

    let paid = ctx
        .trip
        .expenses
        .values()
        .map(|expense| match &expense.rates {
            Some(snapshot) => {
                let matrix = RateMatrix::build(snapshot, ctx.local_currency.as_ref());
                convert(expense.amount, &expense.currency, &target, &matrix)
            }
            None => convert(expense.amount, &expense.currency, &target, &trip_matrix),
        })
        .sum::<Decimal>();

    let budget = Decimal::from_u64(ctx.trip.budget.get(display));

    LedgerSummary {
        display,
        budget,
        paid,
        balance: budget - paid,
    }
}
