use axum::{Router, routing::get};

use crate::{
    http::handlers::{
        get_aggregate_handler, get_my_profile_handler, get_my_rating_handler,
        get_profile_handler, get_venue_handler, list_my_ratings_handler,
        list_venue_ratings_handler, list_venues_handler, submit_rating_handler,
        update_profile_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/venues", get(list_venues_handler))
        .route("/venues/{venue_id}", get(get_venue_handler))
        .route("/venues/{venue_id}/ratings", get(list_venue_ratings_handler))
        .route("/venues/{venue_id}/aggregate", get(get_aggregate_handler))
        .route(
            "/venues/{venue_id}/rating",
            get(get_my_rating_handler).put(submit_rating_handler),
        )
        .route("/me/ratings", get(list_my_ratings_handler))
        .route(
            "/me/profile",
            get(get_my_profile_handler).patch(update_profile_handler),
        )
        .route("/profiles/{identity_id}", get(get_profile_handler))
        .with_state(state)
}
