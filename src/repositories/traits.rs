//! The storage capability shared by every backend

use async_trait::async_trait;

use crate::database::DatabaseType;
use crate::errors::RepositoryResult;
use crate::models::MealDay;

/// Durable persistence of [`MealDay`] records keyed by date
///
/// Every operation is a single-row point operation against the backing
/// store. Implementations decode payloads through
/// [`decode_payload`](super::payload::decode_payload) so callers observe the
/// same shape whichever backend is active.
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Which backend serves this repository
    fn driver(&self) -> DatabaseType;

    /// Create the `meals` table if it does not exist yet
    async fn ensure_schema(&self) -> RepositoryResult<()>;

    /// Insert the record, or wholly replace the one stored for the same date
    async fn upsert(&self, day: &MealDay) -> RepositoryResult<()>;

    /// Fetch the record stored for `date`
    async fn get(&self, date: &str) -> RepositoryResult<Option<MealDay>>;

    /// Cheap round trip used by readiness probes
    async fn ping(&self) -> RepositoryResult<()>;
}
