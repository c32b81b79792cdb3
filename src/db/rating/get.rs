use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::rating::{RatingRow, into_ratings},
    errors::AppError,
    models::Rating,
};

pub async fn get_rating(
    identity_id: Uuid,
    venue_id: &str,
    postgres: &PgPool,
) -> Result<Option<Rating>, AppError> {
    let row = sqlx::query_as::<_, RatingRow>(
        "SELECT id, identity_id, venue_id, score, comment, created_at, updated_at
        FROM ratings
        WHERE identity_id = $1 AND venue_id = $2",
    )
    .bind(identity_id)
    .bind(venue_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::Storage(format!("Failed to fetch rating: {}", e)))?;

    row.map(Rating::try_from).transpose()
}

pub async fn get_venue_ratings(venue_id: &str, postgres: &PgPool) -> Result<Vec<Rating>, AppError> {
    let rows = sqlx::query_as::<_, RatingRow>(
        "SELECT id, identity_id, venue_id, score, comment, created_at, updated_at
        FROM ratings
        WHERE venue_id = $1
        ORDER BY created_at DESC, id DESC",
    )
    .bind(venue_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::Storage(format!("Failed to fetch venue ratings: {}", e)))?;

    into_ratings(rows)
}

pub async fn get_identity_ratings(
    identity_id: Uuid,
    postgres: &PgPool,
) -> Result<Vec<Rating>, AppError> {
    let rows = sqlx::query_as::<_, RatingRow>(
        "SELECT id, identity_id, venue_id, score, comment, created_at, updated_at
        FROM ratings
        WHERE identity_id = $1
        ORDER BY created_at DESC, id DESC",
    )
    .bind(identity_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::Storage(format!("Failed to fetch identity ratings: {}", e)))?;

    into_ratings(rows)
}
