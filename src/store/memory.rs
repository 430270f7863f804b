//! In-process trip store for tests and offline use.

use super::{StoreError, TripEvent, TripStore};
use crate::domain::{Budget, Expense, RateSnapshot, Trip, TripMeta};
use async_trait::async_trait;
use futures::channel::mpsc;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`TripStore`] with the same per-field write semantics as the
/// remote store.
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    trips: Mutex<HashMap<String, Trip>>,
    subscribers: Mutex<Vec<(String, mpsc::UnboundedSender<TripEvent>)>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, trip_id: &str, event: TripEvent) {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.retain(|(id, sender)| {
            if id != trip_id {
                return true;
            }
            sender.unbounded_send(event.clone()).is_ok()
        });
    }

    fn with_trip<T>(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Trip) -> Result<T, StoreError>,
    ) -> Result<(T, Trip), StoreError> {
        let mut trips = match self.trips.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let trip = trips
            .get_mut(id)
            .ok_or_else(|| StoreError::TripNotFound(id.to_string()))?;
        let value = mutate(trip)?;
        Ok((value, trip.clone()))
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn get_trip(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        let trips = match self.trips.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(trips.get(id).cloned())
    }

    async fn insert_trip(&self, trip: Trip) -> Result<(), StoreError> {
        let id = trip.id.clone();
        {
            let mut trips = match self.trips.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            trips.insert(id.clone(), trip.clone());
        }
        self.notify(&id, TripEvent::Updated(trip));
        Ok(())
    }

    async fn delete_trip(&self, id: &str) -> Result<(), StoreError> {
        let removed = {
            let mut trips = match self.trips.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            trips.remove(id)
        };
        if removed.is_none() {
            return Err(StoreError::TripNotFound(id.to_string()));
        }
        self.notify(id, TripEvent::Deleted(id.to_string()));
        Ok(())
    }

    async fn update_meta(
        &self,
        id: &str,
        meta: TripMeta,
        rates: Option<RateSnapshot>,
    ) -> Result<Trip, StoreError> {
        let (_, trip) = self.with_trip(id, |trip| {
            trip.apply_meta(meta);
            if let Some(rates) = rates {
                trip.rates = rates;
            }
            Ok(())
        })?;
        self.notify(id, TripEvent::Updated(trip.clone()));
        Ok(trip)
    }

    async fn update_budget(
        &self,
        id: &str,
        budget: Budget,
        rates: RateSnapshot,
        locked: bool,
    ) -> Result<Trip, StoreError> {
        let (_, trip) = self.with_trip(id, |trip| {
            trip.budget = budget;
            trip.rates = rates;
            trip.budget_locked = locked;
            Ok(())
        })?;
        self.notify(id, TripEvent::Updated(trip.clone()));
        Ok(trip)
    }

    async fn set_budget_locked(&self, id: &str, locked: bool) -> Result<Trip, StoreError> {
        let (_, trip) = self.with_trip(id, |trip| {
            trip.budget_locked = locked;
            Ok(())
        })?;
        self.notify(id, TripEvent::Updated(trip.clone()));
        Ok(trip)
    }

    async fn upsert_expense(&self, trip_id: &str, expense: Expense) -> Result<Trip, StoreError> {
        let (_, trip) = self.with_trip(trip_id, |trip| {
            trip.expenses.insert(expense.id.clone(), expense);
            Ok(())
        })?;
        self.notify(trip_id, TripEvent::Updated(trip.clone()));
        Ok(trip)
    }

    async fn delete_expense(&self, trip_id: &str, expense_id: &str) -> Result<Trip, StoreError> {
        let (_, trip) = self.with_trip(trip_id, |trip| {
            trip.expenses
                .remove(expense_id)
                .ok_or_else(|| StoreError::ExpenseNotFound(expense_id.to_string()))?;
            Ok(())
        })?;
        self.notify(trip_id, TripEvent::Updated(trip.clone()));
        Ok(trip)
    }

    fn subscribe(&self, trip_id: &str) -> BoxStream<'static, TripEvent> {
        let (sender, receiver) = mpsc::unbounded();
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push((trip_id.to_string(), sender));
        receiver.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, Decimal};
    use chrono::Utc;

    fn trip(id: &str) -> Trip {
        Trip::new(id.to_string(), TripMeta::default(), RateSnapshot::defaults())
    }

    fn expense(id: &str, amount: &str) -> Expense {
        Expense {
            id: id.to_string(),
            desc: String::new(),
            category: String::new(),
            amount: Decimal::parse(amount).unwrap(),
            currency: Currency::Usd,
            created_at: Utc::now(),
            rates: None,
            lat: None,
            lng: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryTripStore::new();
        store.insert_trip(trip("t1")).await.unwrap();
        assert!(store.get_trip("t1").await.unwrap().is_some());
        assert!(store.get_trip("t2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_expense_leaves_siblings_alone() {
        let store = MemoryTripStore::new();
        store.insert_trip(trip("t1")).await.unwrap();
        store.upsert_expense("t1", expense("a", "10")).await.unwrap();
        store.upsert_expense("t1", expense("b", "20")).await.unwrap();

        // Replace "a"; "b" must survive.
        let after = store.upsert_expense("t1", expense("a", "15")).await.unwrap();
        assert_eq!(after.expenses.len(), 2);
        assert_eq!(after.expenses["a"].amount, Decimal::parse("15").unwrap());
        assert_eq!(after.expenses["b"].amount, Decimal::parse("20").unwrap());
    }

    #[tokio::test]
    async fn test_delete_expense_missing_id() {
        let store = MemoryTripStore::new();
        store.insert_trip(trip("t1")).await.unwrap();
        let result = store.delete_expense("t1", "nope").await;
        assert_eq!(result, Err(StoreError::ExpenseNotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_trip_errors() {
        let store = MemoryTripStore::new();
        let result = store.set_budget_locked("ghost", true).await;
        assert_eq!(result, Err(StoreError::TripNotFound("ghost".to_string())));
    }

    #[tokio::test]
    async fn test_subscribe_receives_updates_for_own_trip_only() {
        let store = MemoryTripStore::new();
        store.insert_trip(trip("t1")).await.unwrap();
        store.insert_trip(trip("t2")).await.unwrap();

        let mut stream = store.subscribe("t1");
        store.upsert_expense("t2", expense("x", "1")).await.unwrap();
        store.upsert_expense("t1", expense("a", "10")).await.unwrap();

        match stream.next().await {
            Some(TripEvent::Updated(t)) => {
                assert_eq!(t.id, "t1");
                assert!(t.expenses.contains_key("a"));
            }
            other => panic!("expected update for t1, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_trip_notifies() {
        let store = MemoryTripStore::new();
        store.insert_trip(trip("t1")).await.unwrap();
        let mut stream = store.subscribe("t1");
        store.delete_trip("t1").await.unwrap();
        assert_eq!(
            stream.next().await,
            Some(TripEvent::Deleted("t1".to_string()))
        );
    }
}
