use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::rating::RatingRow,
    errors::AppError,
    models::{Rating, RatingDraft},
};

/// Single-statement upsert. The unique (identity_id, venue_id) constraint
/// resolves concurrent submissions for the same pair inside Postgres.
pub async fn upsert_rating(draft: RatingDraft, postgres: &PgPool) -> Result<Rating, AppError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, RatingRow>(
        "INSERT INTO ratings (id, identity_id, venue_id, score, comment, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (identity_id, venue_id) DO UPDATE
        SET score = EXCLUDED.score,
            comment = EXCLUDED.comment,
            updated_at = GREATEST(EXCLUDED.updated_at, ratings.updated_at + INTERVAL '1 microsecond')
        RETURNING id, identity_id, venue_id, score, comment, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(draft.identity_id)
    .bind(&draft.venue_id)
    .bind(i16::from(draft.score.value()))
    .bind(&draft.comment)
    .bind(now)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::Storage(format!("Failed to upsert rating: {}", e)))?;

    tracing::debug!(
        "Upserted rating {} for identity {} on venue {}",
        row.id,
        row.identity_id,
        row.venue_id
    );

    row.try_into()
}
