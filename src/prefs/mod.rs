//! Local per-trip preference store (SQLite).
//!
//! Holds the chosen display currency keyed by trip id. Local to the device
//! and never synced, so a preference survives reload but is not shared
//! across devices or users.

use crate::domain::DisplayCurrency;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::info;

/// Initialize the preference database with schema and pragmas.
pub async fn init_prefs_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_migrations(&pool).await?;

    info!("Preference store initialized at {}", db_path);
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema_sql = include_str!("schema.sql");
    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    // journal_mode returns the actual mode set; must use fetch to get result
    sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Repository over the preference database.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    pool: SqlitePool,
}

impl PreferenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The stored display currency for a trip. Unset (or unreadable) values
    /// default to USD.
    pub async fn display_currency(&self, trip_id: &str) -> Result<DisplayCurrency, sqlx::Error> {
        let row = sqlx::query("SELECT currency FROM display_currency WHERE trip_id = ?")
            .bind(trip_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .and_then(|row| {
                let code: String = row.get(0);
                DisplayCurrency::from_code(&code)
            })
            .unwrap_or_default())
    }

    pub async fn set_display_currency(
        &self,
        trip_id: &str,
        currency: DisplayCurrency,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO display_currency (trip_id, currency, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(trip_id) DO UPDATE SET
                currency = excluded.currency,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(trip_id)
        .bind(currency.code())
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
