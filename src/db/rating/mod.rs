use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    db::RatingStore,
    errors::AppError,
    models::{Rating, RatingDraft, Score},
};

pub mod get;
pub mod put;

#[derive(Debug, FromRow)]
pub(crate) struct RatingRow {
    pub id: Uuid,
    pub identity_id: Uuid,
    pub venue_id: String,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = AppError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        let score = Score::new(i64::from(row.score)).map_err(|e| {
            AppError::Storage(format!("Corrupt score on rating {}: {}", row.id, e))
        })?;

        Ok(Rating {
            id: row.id,
            identity_id: row.identity_id,
            venue_id: row.venue_id,
            score,
            comment: row.comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn into_ratings(rows: Vec<RatingRow>) -> Result<Vec<Rating>, AppError> {
    rows.into_iter().map(Rating::try_from).collect()
}

#[derive(Clone)]
pub struct PgRatingStore {
    postgres: PgPool,
}

impl PgRatingStore {
    pub fn new(postgres: PgPool) -> Self {
        Self { postgres }
    }
}

#[async_trait]
impl RatingStore for PgRatingStore {
    async fn upsert(&self, draft: RatingDraft) -> Result<Rating, AppError> {
        put::upsert_rating(draft, &self.postgres).await
    }

    async fn get_by_identity_and_venue(
        &self,
        identity_id: Uuid,
        venue_id: &str,
    ) -> Result<Option<Rating>, AppError> {
        get::get_rating(identity_id, venue_id, &self.postgres).await
    }

    async fn list_by_venue(&self, venue_id: &str) -> Result<Vec<Rating>, AppError> {
        get::get_venue_ratings(venue_id, &self.postgres).await
    }

    async fn list_by_identity(&self, identity_id: Uuid) -> Result<Vec<Rating>, AppError> {
        get::get_identity_ratings(identity_id, &self.postgres).await
    }
}
