//! Per-trip display currency selection with persistence.

use crate::domain::DisplayCurrency;
use crate::error::LedgerError;
use crate::prefs::PreferenceStore;

/// Cycles a trip's display currency through the fixed USD, EUR, ILS loop
/// and persists the choice in the local preference store.
#[derive(Debug, Clone)]
pub struct CurrencySelector {
    prefs: PreferenceStore,
}

impl CurrencySelector {
    pub fn new(prefs: PreferenceStore) -> Self {
        Self { prefs }
    }

    /// The trip's current display currency (USD when never chosen).
    pub async fn current(&self, trip_id: &str) -> Result<DisplayCurrency, LedgerError> {
        Ok(self.prefs.display_currency(trip_id).await?)
    }

    /// Advance to the next display currency, persist it, and return it.
    pub async fn cycle(&self, trip_id: &str) -> Result<DisplayCurrency, LedgerError> {
        let next = self.prefs.display_currency(trip_id).await?.cycle();
        self.prefs.set_display_currency(trip_id, next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::init_prefs_db;
    use tempfile::TempDir;

    async fn setup() -> (CurrencySelector, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("prefs.db")
            .to_string_lossy()
            .to_string();
        let pool = init_prefs_db(&db_path).await.expect("init_prefs_db failed");
        (CurrencySelector::new(PreferenceStore::new(pool)), temp_dir)
    }

    #[tokio::test]
    async fn test_cycle_starts_from_usd() {
        let (selector, _temp) = setup().await;
        assert_eq!(selector.cycle("t1").await.unwrap(), DisplayCurrency::Eur);
    }

    #[tokio::test]
    async fn test_three_cycles_return_to_start() {
        let (selector, _temp) = setup().await;
        let start = selector.current("t1").await.unwrap();
        selector.cycle("t1").await.unwrap();
        selector.cycle("t1").await.unwrap();
        let third = selector.cycle("t1").await.unwrap();
        assert_eq!(third, start);
    }

    #[tokio::test]
    async fn test_cycle_persists_choice() {
        let (selector, _temp) = setup().await;
        selector.cycle("t1").await.unwrap();
        assert_eq!(selector.current("t1").await.unwrap(), DisplayCurrency::Eur);
        // Another trip is unaffected.
        assert_eq!(selector.current("t2").await.unwrap(), DisplayCurrency::Usd);
    }

    #[tokio::test]
    async fn test_closed_pool_surfaces_prefs_error() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("prefs.db")
            .to_string_lossy()
            .to_string();
        let pool = init_prefs_db(&db_path).await.expect("init_prefs_db failed");
        let selector = CurrencySelector::new(PreferenceStore::new(pool.clone()));
        pool.close().await;

        let err = selector.current("t1").await.unwrap_err();
        assert!(matches!(err, LedgerError::Prefs(_)), "got {err:?}");
    }
}
