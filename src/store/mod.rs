//! Trip document store abstraction.
//!
//! The remote store (Firestore in the host application) is consumed, not
//! implemented, here. The trait exposes targeted per-field writes (budget,
//! metadata, one expense at a time) instead of whole-document
//! read-modify-write, so two clients editing different expenses on the same
//! trip can no longer clobber each other's additions.

use crate::domain::{Budget, Expense, RateSnapshot, Trip, TripMeta};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::fmt;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryTripStore;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("trip {0} not found")]
    TripNotFound(String),
    #[error("expense {0} not found")]
    ExpenseNotFound(String),
    #[error("store I/O error: {0}")]
    Io(String),
}

/// A change notification for one trip document.
#[derive(Debug, Clone, PartialEq)]
pub enum TripEvent {
    Updated(Trip),
    Deleted(String),
}

/// Store of trip documents, keyed by trip id.
///
/// Writes are targeted: each method touches only the named fields of the
/// document. Methods returning `Trip` return the state after the write.
#[async_trait]
pub trait TripStore: Send + Sync + fmt::Debug {
    async fn get_trip(&self, id: &str) -> Result<Option<Trip>, StoreError>;

    async fn insert_trip(&self, trip: Trip) -> Result<(), StoreError>;

    async fn delete_trip(&self, id: &str) -> Result<(), StoreError>;

    /// Replace the trip's editable metadata, and, when `rates` is supplied,
    /// its current rate snapshot in the same write.
    async fn update_meta(
        &self,
        id: &str,
        meta: TripMeta,
        rates: Option<RateSnapshot>,
    ) -> Result<Trip, StoreError>;

    /// Write budget figures, the backing snapshot and the lock flag as one
    /// unit.
    async fn update_budget(
        &self,
        id: &str,
        budget: Budget,
        rates: RateSnapshot,
        locked: bool,
    ) -> Result<Trip, StoreError>;

    /// Flip only the lock flag. The trip's snapshot is left as-is.
    async fn set_budget_locked(&self, id: &str, locked: bool) -> Result<Trip, StoreError>;

    /// Insert or replace a single expense, keyed by its id. Sibling
    /// expenses are untouched.
    async fn upsert_expense(&self, trip_id: &str, expense: Expense) -> Result<Trip, StoreError>;

    async fn delete_expense(&self, trip_id: &str, expense_id: &str) -> Result<Trip, StoreError>;

    /// Subscribe to change notifications for one trip. The stream ends when
    /// the store is dropped.
    fn subscribe(&self, trip_id: &str) -> BoxStream<'static, TripEvent>;
}
