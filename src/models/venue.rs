use serde::{Deserialize, Serialize};

use crate::models::rating::{AggregateRating, RatingView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    pub baseline_average: f64,
    pub baseline_count: u64,
    pub price_range: String,
    pub open_now: bool,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSummary {
    #[serde(flatten)]
    pub venue: Venue,
    pub aggregate: AggregateRating,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub aggregate: AggregateRating,
    pub ratings: Vec<RatingView>,
}
