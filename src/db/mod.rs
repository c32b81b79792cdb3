use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Profile, Rating, RatingDraft},
};

pub mod memory;
pub mod profile;
pub mod rating;

pub use memory::{MemoryProfileStore, MemoryRatingStore};
pub use profile::PgProfileStore;
pub use rating::PgRatingStore;

/// Persistence for ratings. At most one row exists per (identity, venue).
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Inserts the row, or replaces score, comment and `updated_at` of the
    /// existing row for the same (identity, venue). `created_at` and `id`
    /// are preserved. Must be a single atomic operation.
    async fn upsert(&self, draft: RatingDraft) -> Result<Rating, AppError>;

    async fn get_by_identity_and_venue(
        &self,
        identity_id: Uuid,
        venue_id: &str,
    ) -> Result<Option<Rating>, AppError>;

    /// Newest first.
    async fn list_by_venue(&self, venue_id: &str) -> Result<Vec<Rating>, AppError>;

    /// Newest first.
    async fn list_by_identity(&self, identity_id: Uuid) -> Result<Vec<Rating>, AppError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, identity_id: Uuid) -> Result<Option<Profile>, AppError>;

    async fn get_many(&self, identity_ids: &[Uuid]) -> Result<Vec<Profile>, AppError>;

    /// Creates the profile if the identity has none yet.
    async fn set_full_name(&self, identity_id: Uuid, full_name: String)
    -> Result<Profile, AppError>;
}
