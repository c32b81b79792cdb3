use std::sync::Arc;

use crate::{
    auth::TokenVerifier,
    services::{ProfileService, RatingService},
};

#[derive(Clone)]
pub struct AppState {
    pub ratings: RatingService,
    pub profiles: ProfileService,
    pub tokens: Arc<TokenVerifier>,
}
