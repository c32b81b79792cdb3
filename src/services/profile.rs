use std::{sync::Arc, time::Duration};

use uuid::Uuid;

use crate::{
    auth::Caller,
    db::ProfileStore,
    errors::AppError,
    models::{Profile, profile::normalize_full_name},
    services::bounded,
};

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    store_timeout: Duration,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>, store_timeout: Duration) -> Self {
        Self {
            profiles,
            store_timeout,
        }
    }

    /// Only ever touches the caller's own profile.
    pub async fn update_full_name(&self, caller: &Caller, name: &str) -> Result<Profile, AppError> {
        let identity_id = caller.require_identity()?;
        let full_name = normalize_full_name(name)?;

        let profile = bounded(
            self.store_timeout,
            "Profile update",
            self.profiles.set_full_name(identity_id, full_name),
        )
        .await?;

        tracing::info!("Updated profile for identity {}", identity_id);
        Ok(profile)
    }

    pub async fn get_profile(&self, identity_id: Uuid) -> Result<Option<Profile>, AppError> {
        bounded(
            self.store_timeout,
            "Profile lookup",
            self.profiles.get(identity_id),
        )
        .await
    }

    pub async fn get_my_profile(&self, caller: &Caller) -> Result<Option<Profile>, AppError> {
        let identity_id = caller.require_identity()?;
        self.get_profile(identity_id).await
    }
}
