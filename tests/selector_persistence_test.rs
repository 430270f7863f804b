//! Display currency preference survives reopening the store.

use tempfile::TempDir;
use tripledger::{init_prefs_db, CurrencySelector, DisplayCurrency, PreferenceStore};

#[tokio::test]
async fn test_preference_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("prefs.db")
        .to_string_lossy()
        .to_string();

    {
        let pool = init_prefs_db(&db_path).await.expect("init failed");
        let selector = CurrencySelector::new(PreferenceStore::new(pool.clone()));
        selector.cycle("t1").await.unwrap();
        selector.cycle("t1").await.unwrap();
        assert_eq!(selector.current("t1").await.unwrap(), DisplayCurrency::Ils);
        pool.close().await;
    }

    let pool = init_prefs_db(&db_path).await.expect("reopen failed");
    let selector = CurrencySelector::new(PreferenceStore::new(pool));
    assert_eq!(selector.current("t1").await.unwrap(), DisplayCurrency::Ils);

    // Continuing the cycle from the persisted position wraps to USD.
    assert_eq!(selector.cycle("t1").await.unwrap(), DisplayCurrency::Usd);
}

#[tokio::test]
async fn test_other_trips_unaffected_by_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("prefs.db")
        .to_string_lossy()
        .to_string();

    let pool = init_prefs_db(&db_path).await.expect("init failed");
    let selector = CurrencySelector::new(PreferenceStore::new(pool));
    selector.cycle("t1").await.unwrap();

    assert_eq!(selector.current("t2").await.unwrap(), DisplayCurrency::Usd);
}
