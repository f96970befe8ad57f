//! Networked PostgreSQL meal repository
//!
//! The date key is a native `DATE` and payloads are `JSONB`, so rows come back
//! as structured values.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Row};
use tracing::debug;

use super::payload::{decode_payload, StoredPayload};
use super::traits::MealRepository;
use crate::database::DatabaseType;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::MealDay;

/// Repository implementation backed by a PostgreSQL server
#[derive(Clone)]
pub struct PostgresMealRepository {
    pool: PgPool,
}

impl PostgresMealRepository {
    /// Create a new repository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealRepository for PostgresMealRepository {
    fn driver(&self) -> DatabaseType {
        DatabaseType::PostgreSQL
    }

    async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meals (
                date DATE PRIMARY KEY,
                lunch_json JSONB NOT NULL,
                dinner_json JSONB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("create meals table", e))?;

        debug!("PostgreSQL meals table ready");
        Ok(())
    }

    async fn upsert(&self, day: &MealDay) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO meals (date, lunch_json, dinner_json)
            VALUES ($1::date, $2, $3)
            ON CONFLICT (date) DO UPDATE
            SET lunch_json = EXCLUDED.lunch_json,
                dinner_json = EXCLUDED.dinner_json
            "#,
        )
        .bind(day.date.as_str())
        .bind(Json(&day.lunch))
        .bind(Json(&day.dinner))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("upsert meal", e))?;

        debug!(date = %day.date, "Stored meals in PostgreSQL");
        Ok(())
    }

    async fn get(&self, date: &str) -> RepositoryResult<Option<MealDay>> {
        let row = sqlx::query("SELECT lunch_json, dinner_json FROM meals WHERE date = $1::date")
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("get meal", e))?;

        let Some(row) = row else {
            debug!(date = %date, "No meals stored in PostgreSQL");
            return Ok(None);
        };

        let lunch: Value = row
            .try_get("lunch_json")
            .map_err(|e| RepositoryError::from_sqlx("read lunch_json", e))?;
        let dinner: Value = row
            .try_get("dinner_json")
            .map_err(|e| RepositoryError::from_sqlx("read dinner_json", e))?;

        Ok(Some(MealDay::new(
            date,
            decode_payload(StoredPayload::Structured(lunch))?,
            decode_payload(StoredPayload::Structured(dinner))?,
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
