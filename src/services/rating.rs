use std::{collections::HashMap, sync::Arc, time::Duration};

use futures::future::try_join_all;
use uuid::Uuid;

use crate::{
    auth::Caller,
    db::{ProfileStore, RatingStore},
    directory::VenueDirectory,
    errors::AppError,
    models::{
        AggregateRating, Rating, RatingDraft, Score, Venue, VenueDetail, VenueSummary,
        profile::author_name,
        rating::{MyRating, MyRatings, RatingStats, RatingView, normalize_comment},
    },
    services::bounded,
};

const UNKNOWN_VENUE: &str = "Unknown Café";

#[derive(Clone)]
pub struct RatingService {
    ratings: Arc<dyn RatingStore>,
    profiles: Arc<dyn ProfileStore>,
    directory: Arc<dyn VenueDirectory>,
    store_timeout: Duration,
}

impl RatingService {
    pub fn new(
        ratings: Arc<dyn RatingStore>,
        profiles: Arc<dyn ProfileStore>,
        directory: Arc<dyn VenueDirectory>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            ratings,
            profiles,
            directory,
            store_timeout,
        }
    }

    fn venue(&self, venue_id: &str) -> Result<Venue, AppError> {
        self.directory
            .get_venue(venue_id)
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))
    }

    /// Creates the caller's rating for the venue or replaces the existing one.
    /// Nothing is written unless every check passes.
    pub async fn submit_rating(
        &self,
        caller: &Caller,
        venue_id: &str,
        score: i64,
        comment: Option<String>,
    ) -> Result<Rating, AppError> {
        let identity_id = caller.require_identity()?;
        let score = Score::new(score)?;
        let comment = normalize_comment(comment)?;
        self.venue(venue_id)?;

        let draft = RatingDraft {
            identity_id,
            venue_id: venue_id.to_string(),
            score,
            comment,
        };

        let rating = bounded(
            self.store_timeout,
            "Rating upsert",
            self.ratings.upsert(draft),
        )
        .await?;

        tracing::info!(
            "Identity {} rated venue {} with {} ({})",
            identity_id,
            venue_id,
            rating.score.value(),
            rating.score.label()
        );

        Ok(rating)
    }

    pub async fn get_user_rating(
        &self,
        caller: &Caller,
        venue_id: &str,
    ) -> Result<Option<Rating>, AppError> {
        let identity_id = caller.require_identity()?;

        bounded(
            self.store_timeout,
            "Rating lookup",
            self.ratings.get_by_identity_and_venue(identity_id, venue_id),
        )
        .await
    }

    pub async fn list_venue_ratings(&self, venue_id: &str) -> Result<Vec<RatingView>, AppError> {
        self.venue(venue_id)?;
        let ratings = self.venue_rows(venue_id).await?;
        self.decorate(ratings).await
    }

    pub async fn get_aggregate(&self, venue_id: &str) -> Result<AggregateRating, AppError> {
        let venue = self.venue(venue_id)?;
        let ratings = self.venue_rows(venue_id).await?;
        Ok(AggregateRating::compute(&venue, &ratings))
    }

    pub async fn get_venue_detail(&self, venue_id: &str) -> Result<VenueDetail, AppError> {
        let venue = self.venue(venue_id)?;
        let ratings = self.venue_rows(venue_id).await?;
        let aggregate = AggregateRating::compute(&venue, &ratings);
        let ratings = self.decorate(ratings).await?;

        Ok(VenueDetail {
            venue,
            aggregate,
            ratings,
        })
    }

    pub async fn list_venues(&self) -> Result<Vec<VenueSummary>, AppError> {
        let venues = self.directory.list_venues();

        try_join_all(venues.into_iter().map(|venue| async move {
            let ratings = self.venue_rows(&venue.id).await?;
            let aggregate = AggregateRating::compute(&venue, &ratings);
            Ok::<_, AppError>(VenueSummary { venue, aggregate })
        }))
        .await
    }

    pub async fn list_my_ratings(&self, caller: &Caller) -> Result<MyRatings, AppError> {
        let identity_id = caller.require_identity()?;

        let ratings = bounded(
            self.store_timeout,
            "Identity ratings listing",
            self.ratings.list_by_identity(identity_id),
        )
        .await?;

        let stats = RatingStats::from_ratings(&ratings);
        let ratings = ratings
            .into_iter()
            .map(|rating| {
                let venue = self.directory.get_venue(&rating.venue_id);
                MyRating {
                    venue_name: venue
                        .as_ref()
                        .map(|v| v.name.clone())
                        .unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
                    venue_address: venue.map(|v| v.address),
                    rating,
                }
            })
            .collect();

        Ok(MyRatings { ratings, stats })
    }

    async fn venue_rows(&self, venue_id: &str) -> Result<Vec<Rating>, AppError> {
        bounded(
            self.store_timeout,
            "Venue ratings listing",
            self.ratings.list_by_venue(venue_id),
        )
        .await
    }

    async fn decorate(&self, ratings: Vec<Rating>) -> Result<Vec<RatingView>, AppError> {
        let mut identity_ids: Vec<Uuid> = ratings.iter().map(|r| r.identity_id).collect();
        identity_ids.sort_unstable();
        identity_ids.dedup();

        let profiles = bounded(
            self.store_timeout,
            "Profile lookup",
            self.profiles.get_many(&identity_ids),
        )
        .await?;
        let by_identity: HashMap<Uuid, _> =
            profiles.into_iter().map(|p| (p.identity_id, p)).collect();

        Ok(ratings
            .into_iter()
            .map(|rating| RatingView {
                author_name: author_name(by_identity.get(&rating.identity_id)),
                label: rating.score.label(),
                rating,
            })
            .collect())
    }
}
