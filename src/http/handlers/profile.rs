use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::Caller, errors::AppError, http::handlers::log_failure, models::Profile,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    pub full_name: String,
}

async fn update(
    state: &AppState,
    caller: &Caller,
    payload: Result<Json<UpdateProfilePayload>, JsonRejection>,
) -> Result<Profile, AppError> {
    caller.require_identity()?;
    let Json(payload) = payload
        .map_err(|e| AppError::Validation(format!("Invalid profile payload: {}", e.body_text())))?;

    state
        .profiles
        .update_full_name(caller, &payload.full_name)
        .await
}

pub async fn update_profile_handler(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<UpdateProfilePayload>, JsonRejection>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let profile = update(&state, &caller, payload).await.map_err(|e| {
        log_failure("updating profile", &e);
        e.to_response()
    })?;

    Ok(Json(profile))
}

pub async fn get_my_profile_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Option<Profile>>, (StatusCode, String)> {
    let profile = state.profiles.get_my_profile(&caller).await.map_err(|e| {
        log_failure("retrieving own profile", &e);
        e.to_response()
    })?;

    Ok(Json(profile))
}

pub async fn get_profile_handler(
    Path(identity_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let profile = state
        .profiles
        .get_profile(identity_id)
        .await
        .and_then(|p| p.ok_or_else(|| AppError::NotFound("Profile not found".into())))
        .map_err(|e| {
            log_failure(&format!("retrieving profile {identity_id}"), &e);
            e.to_response()
        })?;

    Ok(Json(profile))
}
