#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use brewscore_be::{
    db::{MemoryProfileStore, MemoryRatingStore, ProfileStore, RatingStore},
    directory::SeedDirectory,
    models::Venue,
    services::{ProfileService, RatingService},
};

pub const TIMEOUT: Duration = Duration::from_secs(2);

pub struct Harness {
    pub ratings: Arc<MemoryRatingStore>,
    pub profiles: Arc<MemoryProfileStore>,
    pub rating_service: RatingService,
    pub profile_service: ProfileService,
}

pub fn venue(id: &str, baseline_average: f64, baseline_count: u64) -> Venue {
    Venue {
        id: id.into(),
        name: format!("Café {id}"),
        address: format!("Rua {id}, Lisboa"),
        baseline_average,
        baseline_count,
        price_range: "€€".into(),
        open_now: true,
        specialties: vec!["Espresso".into()],
    }
}

pub fn harness() -> Harness {
    harness_with(vec![venue("v1", 4.8, 324), venue("v2", 4.3, 89)])
}

pub fn harness_with(venues: Vec<Venue>) -> Harness {
    let ratings = Arc::new(MemoryRatingStore::new());
    let profiles = Arc::new(MemoryProfileStore::new());

    let rating_service = RatingService::new(
        ratings.clone() as Arc<dyn RatingStore>,
        profiles.clone() as Arc<dyn ProfileStore>,
        Arc::new(SeedDirectory::new(venues)),
        TIMEOUT,
    );
    let profile_service = ProfileService::new(profiles.clone() as Arc<dyn ProfileStore>, TIMEOUT);

    Harness {
        ratings,
        profiles,
        rating_service,
        profile_service,
    }
}
