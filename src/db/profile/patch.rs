use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{errors::AppError, models::Profile};

pub async fn set_full_name(
    identity_id: Uuid,
    full_name: String,
    postgres: &PgPool,
) -> Result<Profile, AppError> {
    let (identity_id, full_name, updated_at) =
        sqlx::query_as::<_, (Uuid, Option<String>, DateTime<Utc>)>(
            "INSERT INTO profiles (identity_id, full_name, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (identity_id) DO UPDATE
            SET full_name = EXCLUDED.full_name, updated_at = EXCLUDED.updated_at
            RETURNING identity_id, full_name, updated_at",
        )
        .bind(identity_id)
        .bind(&full_name)
        .bind(Utc::now())
        .fetch_one(postgres)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to update profile: {}", e)))?;

    Ok(Profile {
        identity_id,
        full_name,
        updated_at,
    })
}
