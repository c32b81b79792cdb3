use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    http::handlers::log_failure,
    models::{AggregateRating, VenueDetail, VenueSummary},
    state::AppState,
};

pub async fn list_venues_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<VenueSummary>>, (StatusCode, String)> {
    let venues = state.ratings.list_venues().await.map_err(|e| {
        log_failure("listing venues", &e);
        e.to_response()
    })?;

    Ok(Json(venues))
}

pub async fn get_venue_handler(
    Path(venue_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<VenueDetail>, (StatusCode, String)> {
    let detail = state
        .ratings
        .get_venue_detail(&venue_id)
        .await
        .map_err(|e| {
            log_failure(&format!("retrieving venue {venue_id}"), &e);
            e.to_response()
        })?;

    tracing::info!(
        "Retrieved venue {} with {} ratings",
        venue_id,
        detail.ratings.len()
    );
    Ok(Json(detail))
}

pub async fn get_aggregate_handler(
    Path(venue_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AggregateRating>, (StatusCode, String)> {
    let aggregate = state.ratings.get_aggregate(&venue_id).await.map_err(|e| {
        log_failure(&format!("computing aggregate for venue {venue_id}"), &e);
        e.to_response()
    })?;

    Ok(Json(aggregate))
}
