use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{errors::AppError, models::Profile};

type ProfileRow = (Uuid, Option<String>, DateTime<Utc>);

fn into_profile((identity_id, full_name, updated_at): ProfileRow) -> Profile {
    Profile {
        identity_id,
        full_name,
        updated_at,
    }
}

pub async fn get_profile(identity_id: Uuid, postgres: &PgPool) -> Result<Option<Profile>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT identity_id, full_name, updated_at FROM profiles WHERE identity_id = $1",
    )
    .bind(identity_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::Storage(format!("Failed to fetch profile: {}", e)))?;

    Ok(row.map(into_profile))
}

pub async fn get_profiles(identity_ids: &[Uuid], postgres: &PgPool) -> Result<Vec<Profile>, AppError> {
    if identity_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, ProfileRow>(
        "SELECT identity_id, full_name, updated_at FROM profiles WHERE identity_id = ANY($1)",
    )
    .bind(identity_ids)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::Storage(format!("Failed to fetch profiles: {}", e)))?;

    Ok(rows.into_iter().map(into_profile).collect())
}
