//! Meal plan service
//!
//! Validates date keys at the boundary and turns a missing row into an
//! explicit not-found error. Holds no state between calls besides the
//! repository handle.

use std::sync::Arc;
use tracing::{debug, info};

use crate::database::DatabaseType;
use crate::errors::{AppError, AppResult};
use crate::models::{validate_date, MealDay, SaveReceipt};
use crate::repositories::MealRepository;

#[derive(Clone)]
pub struct MealService {
    repository: Arc<dyn MealRepository>,
}

impl MealService {
    pub fn new(repository: Arc<dyn MealRepository>) -> Self {
        Self { repository }
    }

    /// Backend currently serving reads and writes
    pub fn driver(&self) -> DatabaseType {
        self.repository.driver()
    }

    /// Insert or fully replace the plan for `day.date`
    pub async fn save(&self, day: MealDay) -> AppResult<SaveReceipt> {
        day.validate()?;
        self.repository.upsert(&day).await?;
        info!(date = %day.date, driver = %self.driver(), "Saved meals");
        Ok(SaveReceipt::saved(&day.date))
    }

    /// Look up the plan stored for `date`
    pub async fn find(&self, date: &str) -> AppResult<MealDay> {
        validate_date(date)?;
        match self.repository.get(date).await? {
            Some(day) => Ok(day),
            None => {
                debug!(date = %date, "No meals stored");
                Err(AppError::not_found("meals", date))
            }
        }
    }

    /// Round trip to storage, used by the readiness probe
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.ping().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RepositoryResult;
    use crate::models::MealPart;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-process stand-in that records how often storage was touched
    #[derive(Default)]
    struct RecordingRepository {
        rows: Mutex<HashMap<String, MealDay>>,
        calls: Mutex<usize>,
    }

    impl RecordingRepository {
        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn touch(&self) {
            *self.calls.lock().unwrap() += 1;
        }
    }

    #[async_trait]
    impl MealRepository for RecordingRepository {
        fn driver(&self) -> DatabaseType {
            DatabaseType::SQLite
        }

        async fn ensure_schema(&self) -> RepositoryResult<()> {
            Ok(())
        }

        async fn upsert(&self, day: &MealDay) -> RepositoryResult<()> {
            self.touch();
            self.rows.lock().unwrap().insert(day.date.clone(), day.clone());
            Ok(())
        }

        async fn get(&self, date: &str) -> RepositoryResult<Option<MealDay>> {
            self.touch();
            Ok(self.rows.lock().unwrap().get(date).cloned())
        }

        async fn ping(&self) -> RepositoryResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let repo = Arc::new(RecordingRepository::default());
        let service = MealService::new(repo.clone());
        let day = MealDay::new("2024-03-01", MealPart::new("Lentils", false), MealPart::default());

        let receipt = service.save(day.clone()).await.unwrap();
        assert_eq!(receipt.message, "saved for 2024-03-01");
        assert_eq!(service.find("2024-03-01").await.unwrap(), day);
    }

    #[tokio::test]
    async fn test_missing_date_is_not_found() {
        let service = MealService::new(Arc::new(RecordingRepository::default()));
        let err = service.find("2099-01-01").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref id, .. } if id == "2099-01-01"));
    }

    #[tokio::test]
    async fn test_malformed_dates_never_reach_storage() {
        let repo = Arc::new(RecordingRepository::default());
        let service = MealService::new(repo.clone());

        let bad = MealDay::new("2024-3-1", MealPart::default(), MealPart::default());
        assert!(matches!(
            service.save(bad).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.find("not-a-date").await,
            Err(AppError::Validation { .. })
        ));
        assert_eq!(repo.calls(), 0);
    }
}
