//! Embedded SQLite meal repository
//!
//! Payloads are stored as JSON text and decoded on read.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::payload::{decode_payload, encode_payload, StoredPayload};
use super::traits::MealRepository;
use crate::database::DatabaseType;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::MealDay;

/// Repository implementation backed by a SQLite file
#[derive(Clone)]
pub struct SqliteMealRepository {
    pool: SqlitePool,
}

impl SqliteMealRepository {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealRepository for SqliteMealRepository {
    fn driver(&self) -> DatabaseType {
        DatabaseType::SQLite
    }

    async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meals (
                date TEXT PRIMARY KEY,
                lunch_json TEXT NOT NULL,
                dinner_json TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("create meals table", e))?;

        debug!("SQLite meals table ready");
        Ok(())
    }

    async fn upsert(&self, day: &MealDay) -> RepositoryResult<()> {
        let lunch = encode_payload(&day.lunch)?;
        let dinner = encode_payload(&day.dinner)?;

        sqlx::query(
            r#"
            INSERT INTO meals (date, lunch_json, dinner_json)
            VALUES (?, ?, ?)
            ON CONFLICT (date) DO UPDATE
            SET lunch_json = excluded.lunch_json,
                dinner_json = excluded.dinner_json
            "#,
        )
        .bind(day.date.as_str())
        .bind(lunch)
        .bind(dinner)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("upsert meal", e))?;

        debug!(date = %day.date, "Stored meals in SQLite");
        Ok(())
    }

    async fn get(&self, date: &str) -> RepositoryResult<Option<MealDay>> {
        let row = sqlx::query("SELECT lunch_json, dinner_json FROM meals WHERE date = ?")
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("get meal", e))?;

        let Some(row) = row else {
            debug!(date = %date, "No meals stored in SQLite");
            return Ok(None);
        };

        let lunch: String = row
            .try_get("lunch_json")
            .map_err(|e| RepositoryError::from_sqlx("read lunch_json", e))?;
        let dinner: String = row
            .try_get("dinner_json")
            .map_err(|e| RepositoryError::from_sqlx("read dinner_json", e))?;

        Ok(Some(MealDay::new(
            date,
            decode_payload(StoredPayload::Text(lunch))?,
            decode_payload(StoredPayload::Text(dinner))?,
        )))
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("ping", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealPart;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_repository() -> SqliteMealRepository {
        // A single long-lived connection keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = SqliteMealRepository::new(pool);
        repo.ensure_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_payloads_are_stored_as_text() {
        let repo = create_test_repository().await;
        let day = MealDay::new(
            "2024-03-01",
            MealPart::new("Lentils", false),
            MealPart {
                dish: None,
                frozen: true,
            },
        );
        repo.upsert(&day).await.unwrap();

        let (lunch, dinner): (String, String) =
            sqlx::query_as("SELECT lunch_json, dinner_json FROM meals WHERE date = ?")
                .bind("2024-03-01")
                .fetch_one(&repo.pool)
                .await
                .unwrap();
        assert_eq!(lunch, r#"{"dish":"Lentils","frozen":false}"#);
        assert_eq!(dinner, r#"{"dish":null,"frozen":true}"#);
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_date() {
        let repo = create_test_repository().await;
        let first = MealDay::new("2024-03-01", MealPart::new("Lentils", false), MealPart::default());
        let second = MealDay::new("2024-03-01", MealPart::new("Soup", true), MealPart::default());
        repo.upsert(&first).await.unwrap();
        repo.upsert(&second).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meals")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(repo.get("2024-03-01").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_an_error() {
        let repo = create_test_repository().await;
        sqlx::query("INSERT INTO meals (date, lunch_json, dinner_json) VALUES (?, ?, ?)")
            .bind("2024-03-02")
            .bind("{broken")
            .bind("{}")
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(
            repo.get("2024-03-02").await,
            Err(RepositoryError::SerializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_pool_reports_connection_failure() {
        let repo = create_test_repository().await;
        repo.pool.close().await;

        let err = repo.get("2024-03-01").await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
