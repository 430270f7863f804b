//! Orchestration of the ledger flows: trip lifecycle, expense saves, budget
//! locking. Threads the rate source, trip store and destination resolver
//! through every flow; holds no state of its own.

use crate::domain::{
    Budget, Currency, CurrencyResolver, DisplayCurrency, Expense, ExpenseDraft, RateSnapshot,
    Trip, TripMeta,
};
use crate::engine::{summarize, LedgerContext, LedgerSummary};
use crate::error::LedgerError;
use crate::ratesource::RateSource;
use crate::store::TripStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct LedgerService {
    rates: Arc<dyn RateSource>,
    store: Arc<dyn TripStore>,
    resolver: Arc<dyn CurrencyResolver>,
}

impl LedgerService {
    pub fn new(
        rates: Arc<dyn RateSource>,
        store: Arc<dyn TripStore>,
        resolver: Arc<dyn CurrencyResolver>,
    ) -> Self {
        Self {
            rates,
            store,
            resolver,
        }
    }

    /// Create a trip with a zero budget and a freshly fetched snapshot
    /// (hard defaults when the quote service is unreachable).
    pub async fn create_trip(&self, meta: TripMeta) -> Result<Trip, LedgerError> {
        let local = self.resolver.resolve(&meta.destination);
        let snapshot = self
            .rates
            .fetch_rates(local.as_ref().map(Currency::code), &RateSnapshot::defaults())
            .await;
        let trip = Trip::new(Uuid::new_v4().to_string(), meta, snapshot);
        self.store.insert_trip(trip.clone()).await?;
        info!("Created trip {} ({})", trip.id, trip.destination);
        Ok(trip)
    }

    pub async fn delete_trip(&self, trip_id: &str) -> Result<(), LedgerError> {
        self.store.delete_trip(trip_id).await?;
        Ok(())
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Trip, LedgerError> {
        self.store
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("trip {}", trip_id)))
    }

    /// The trip's local currency as derived from its destination right now.
    fn local_currency(&self, trip: &Trip) -> Option<Currency> {
        self.resolver.resolve(&trip.destination)
    }

    /// The aggregate budget/paid/balance view in the given display currency.
    pub async fn summary(
        &self,
        trip_id: &str,
        display: DisplayCurrency,
    ) -> Result<LedgerSummary, LedgerError> {
        let trip = self.load_trip(trip_id).await?;
        let ctx = LedgerContext::new(&trip, self.local_currency(&trip));
        Ok(summarize(&ctx, display))
    }

    /// Lock the budget: freeze the given figures together with a fresh rate
    /// snapshot. Rejected while already locked; unlocking is the only way
    /// out of the locked state.
    pub async fn lock_budget(&self, trip_id: &str, budget: Budget) -> Result<Trip, LedgerError> {
        let trip = self.load_trip(trip_id).await?;
        if trip.budget_locked {
            return Err(LedgerError::BudgetLocked);
        }

        let local = self.local_currency(&trip);
        let snapshot = self
            .rates
            .fetch_rates(local.as_ref().map(Currency::code), &trip.rates)
            .await;

        info!("Locking budget for trip {} at {}", trip_id, snapshot.locked_at);
        let trip = self
            .store
            .update_budget(trip_id, budget, snapshot, true)
            .await?;
        Ok(trip)
    }

    /// Re-open the budget for editing. The last-locked snapshot stays the
    /// trip's current snapshot until the next lock.
    pub async fn unlock_budget(&self, trip_id: &str) -> Result<Trip, LedgerError> {
        let trip = self.store.set_budget_locked(trip_id, false).await?;
        info!("Unlocked budget for trip {}", trip_id);
        Ok(trip)
    }

    /// Save trip metadata. While the budget is unlocked this also refreshes
    /// the trip's snapshot; a locked snapshot is never overwritten by a
    /// metadata save.
    pub async fn save_meta(&self, trip_id: &str, meta: TripMeta) -> Result<Trip, LedgerError> {
        let trip = self.load_trip(trip_id).await?;
        let fresh = if trip.budget_locked {
            None
        } else {
            let local = self.resolver.resolve(&meta.destination);
            Some(
                self.rates
                    .fetch_rates(local.as_ref().map(Currency::code), &trip.rates)
                    .await,
            )
        };
        let trip = self.store.update_meta(trip_id, meta, fresh).await?;
        Ok(trip)
    }

    /// Create or edit an expense.
    ///
    /// A new expense freezes a freshly fetched snapshot; an edited expense
    /// keeps the snapshot captured at its first save. The only mutation an
    /// existing snapshot ever receives is backfilling a missing local ratio.
    pub async fn save_expense(
        &self,
        trip_id: &str,
        draft: ExpenseDraft,
        existing_id: Option<&str>,
    ) -> Result<Expense, LedgerError> {
        let trip = self.load_trip(trip_id).await?;
        let local = self.local_currency(&trip);
        draft.validate(local.as_ref())?;

        let fresh = self
            .rates
            .fetch_rates(local.as_ref().map(Currency::code), &trip.rates)
            .await;

        let existing = existing_id.and_then(|id| trip.expenses.get(id));
        let rates = match existing.and_then(|e| e.rates.clone()) {
            Some(mut frozen) => {
                if frozen.usd_local.is_none() {
                    frozen.usd_local = fresh.usd_local;
                }
                frozen
            }
            None => fresh,
        };

        let expense = Expense {
            id: existing_id
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            desc: draft.desc,
            category: draft.category,
            amount: draft.amount,
            currency: draft.currency,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
            rates: Some(rates),
            lat: draft.lat,
            lng: draft.lng,
        };

        debug!(
            "Saving expense {} on trip {} ({} {})",
            expense.id, trip_id, expense.amount, expense.currency
        );
        self.store.upsert_expense(trip_id, expense.clone()).await?;
        Ok(expense)
    }

    pub async fn delete_expense(
        &self,
        trip_id: &str,
        expense_id: &str,
    ) -> Result<(), LedgerError> {
        self.store.delete_expense(trip_id, expense_id).await?;
        Ok(())
    }
}
