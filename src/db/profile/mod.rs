use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::ProfileStore, errors::AppError, models::Profile};

pub mod get;
pub mod patch;

#[derive(Clone)]
pub struct PgProfileStore {
    postgres: PgPool,
}

impl PgProfileStore {
    pub fn new(postgres: PgPool) -> Self {
        Self { postgres }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, identity_id: Uuid) -> Result<Option<Profile>, AppError> {
        get::get_profile(identity_id, &self.postgres).await
    }

    async fn get_many(&self, identity_ids: &[Uuid]) -> Result<Vec<Profile>, AppError> {
        get::get_profiles(identity_ids, &self.postgres).await
    }

    async fn set_full_name(
        &self,
        identity_id: Uuid,
        full_name: String,
    ) -> Result<Profile, AppError> {
        patch::set_full_name(identity_id, full_name, &self.postgres).await
    }
}
