use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    auth::Caller,
    errors::AppError,
    http::handlers::log_failure,
    models::{
        Rating,
        rating::{MyRatings, RatingView},
    },
    state::AppState,
};

#[derive(Deserialize)]
pub struct SubmitRatingPayload {
    pub score: Value,
    pub comment: Option<String>,
}

/// Accepts integral JSON numbers only: `4` and `4.0` pass, `4.5` and `"4"` do not.
fn parse_score(value: &Value) -> Result<i64, AppError> {
    let invalid = || AppError::Validation("Score must be an integer between 1 and 5".into());

    if let Some(score) = value.as_i64() {
        return Ok(score);
    }

    match value.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(invalid()),
    }
}

/// Auth is checked before the body is looked at, so an anonymous caller
/// always gets `AuthRequired` whatever it sent.
async fn submit(
    state: &AppState,
    caller: &Caller,
    venue_id: &str,
    payload: Result<Json<SubmitRatingPayload>, JsonRejection>,
) -> Result<Rating, AppError> {
    caller.require_identity()?;
    let Json(payload) = payload
        .map_err(|e| AppError::Validation(format!("Invalid rating payload: {}", e.body_text())))?;
    let score = parse_score(&payload.score)?;

    state
        .ratings
        .submit_rating(caller, venue_id, score, payload.comment)
        .await
}

pub async fn submit_rating_handler(
    Path(venue_id): Path<String>,
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<SubmitRatingPayload>, JsonRejection>,
) -> Result<Json<Rating>, (StatusCode, String)> {
    let rating = submit(&state, &caller, &venue_id, payload)
        .await
        .map_err(|e| {
            log_failure("submitting rating", &e);
            e.to_response()
        })?;

    Ok(Json(rating))
}

pub async fn get_my_rating_handler(
    Path(venue_id): Path<String>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Option<Rating>>, (StatusCode, String)> {
    let rating = state
        .ratings
        .get_user_rating(&caller, &venue_id)
        .await
        .map_err(|e| {
            log_failure("fetching own rating", &e);
            e.to_response()
        })?;

    Ok(Json(rating))
}

pub async fn list_venue_ratings_handler(
    Path(venue_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RatingView>>, (StatusCode, String)> {
    let ratings = state
        .ratings
        .list_venue_ratings(&venue_id)
        .await
        .map_err(|e| {
            log_failure("listing venue ratings", &e);
            e.to_response()
        })?;

    tracing::info!("Retrieved {} ratings for venue {}", ratings.len(), venue_id);
    Ok(Json(ratings))
}

pub async fn list_my_ratings_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<MyRatings>, (StatusCode, String)> {
    let mine = state.ratings.list_my_ratings(&caller).await.map_err(|e| {
        log_failure("listing own ratings", &e);
        e.to_response()
    })?;

    Ok(Json(mine))
}
