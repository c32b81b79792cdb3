use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, models::venue::Venue};

pub const MAX_COMMENT_CHARS: usize = 500;

/// A star score, always within 1..=5 once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u8);

impl Score {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Result<Self, AppError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(AppError::Validation(format!(
                "Score must be an integer between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Poor",
            2 => "Fair",
            3 => "Good",
            4 => "Very Good",
            _ => "Excellent",
        }
    }
}

impl TryFrom<i64> for Score {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        i64::from(score.0)
    }
}

/// Trims the comment and enforces the length cap. `None` stays `None`,
/// an empty string stays an empty string.
pub fn normalize_comment(comment: Option<String>) -> Result<Option<String>, AppError> {
    let Some(raw) = comment else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len > MAX_COMMENT_CHARS {
        return Err(AppError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_CHARS} characters, got {len}"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub identity_id: Uuid,
    pub venue_id: String,
    pub score: Score,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input handed to a store upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDraft {
    pub identity_id: Uuid,
    pub venue_id: String,
    pub score: Score,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateSource {
    Ratings,
    Baseline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub average: f64,
    pub count: u64,
    pub source: AggregateSource,
}

impl AggregateRating {
    /// Mean over the stored ratings, or the venue's baseline when none exist.
    pub fn compute(venue: &Venue, ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self {
                average: venue.baseline_average,
                count: venue.baseline_count,
                source: AggregateSource::Baseline,
            };
        }

        let total: u64 = ratings.iter().map(|r| u64::from(r.score.value())).sum();
        let count = ratings.len() as u64;

        Self {
            average: total as f64 / count as f64,
            count,
            source: AggregateSource::Ratings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    #[serde(flatten)]
    pub rating: Rating,
    pub author_name: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRating {
    #[serde(flatten)]
    pub rating: Rating,
    pub venue_name: String,
    pub venue_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub total: u64,
    pub average: Option<f64>,
}

impl RatingStats {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let total = ratings.len() as u64;
        let average = (total > 0).then(|| {
            let sum: u64 = ratings.iter().map(|r| u64::from(r.score.value())).sum();
            sum as f64 / total as f64
        });
        Self { total, average }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRatings {
    pub ratings: Vec<MyRating>,
    pub stats: RatingStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> Venue {
        Venue {
            id: "v1".into(),
            name: "Test Café".into(),
            address: "Rua Teste 1".into(),
            baseline_average: 4.2,
            baseline_count: 17,
            price_range: "€".into(),
            open_now: true,
            specialties: vec![],
        }
    }

    fn rating(score: i64) -> Rating {
        let now = Utc::now();
        Rating {
            id: Uuid::new_v4(),
            identity_id: Uuid::new_v4(),
            venue_id: "v1".into(),
            score: Score::new(score).unwrap(),
            comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn score_bounds() {
        assert!(Score::new(0).is_err());
        assert!(Score::new(6).is_err());
        assert!(Score::new(-3).is_err());
        assert_eq!(Score::new(1).unwrap().value(), 1);
        assert_eq!(Score::new(5).unwrap().value(), 5);
    }

    #[test]
    fn score_labels() {
        let labels: Vec<_> = (1..=5).map(|s| Score::new(s).unwrap().label()).collect();
        assert_eq!(labels, ["Poor", "Fair", "Good", "Very Good", "Excellent"]);
    }

    #[test]
    fn score_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Score>("4").is_ok());
        assert!(serde_json::from_str::<Score>("9").is_err());
        assert_eq!(serde_json::to_string(&Score::new(3).unwrap()).unwrap(), "3");
    }

    #[test]
    fn comment_is_trimmed_and_capped() {
        assert_eq!(normalize_comment(None).unwrap(), None);
        assert_eq!(normalize_comment(Some("".into())).unwrap(), Some("".into()));
        assert_eq!(
            normalize_comment(Some("  great galão \n".into())).unwrap(),
            Some("great galão".into())
        );

        let exact = "é".repeat(MAX_COMMENT_CHARS);
        assert!(normalize_comment(Some(exact)).is_ok());

        let padded = format!("   {}   ", "a".repeat(MAX_COMMENT_CHARS));
        assert!(normalize_comment(Some(padded)).is_ok());

        let over = "a".repeat(MAX_COMMENT_CHARS + 1);
        assert!(matches!(
            normalize_comment(Some(over)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn aggregate_falls_back_to_baseline() {
        let agg = AggregateRating::compute(&venue(), &[]);
        assert_eq!(agg.average, 4.2);
        assert_eq!(agg.count, 17);
        assert_eq!(agg.source, AggregateSource::Baseline);
    }

    #[test]
    fn aggregate_is_mean_of_stored_scores() {
        let agg = AggregateRating::compute(&venue(), &[rating(5), rating(4), rating(3)]);
        assert_eq!(agg.average, 4.0);
        assert_eq!(agg.count, 3);
        assert_eq!(agg.source, AggregateSource::Ratings);
    }

    #[test]
    fn stats_have_no_average_when_empty() {
        assert_eq!(
            RatingStats::from_ratings(&[]),
            RatingStats {
                total: 0,
                average: None
            }
        );
        let stats = RatingStats::from_ratings(&[rating(2), rating(5)]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average, Some(3.5));
    }
}
