use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    db::{ProfileStore, RatingStore},
    errors::AppError,
    models::{Profile, Rating, RatingDraft},
};

type RatingKey = (Uuid, String);

fn newest_first(mut ratings: Vec<Rating>) -> Vec<Rating> {
    ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    ratings
}

/// Rating rows behind one lock. Each operation runs its whole read-modify-write
/// without awaiting while the guard is held.
#[derive(Debug, Default)]
pub struct MemoryRatingStore {
    rows: Mutex<HashMap<RatingKey, Rating>>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn upsert(&self, draft: RatingDraft) -> Result<Rating, AppError> {
        let mut rows = self.rows.lock().await;
        let now = Utc::now();

        let rating = match rows.entry((draft.identity_id, draft.venue_id.clone())) {
            Entry::Occupied(mut entry) => {
                let row = entry.get_mut();
                row.score = draft.score;
                row.comment = draft.comment;
                row.updated_at = now.max(row.updated_at + Duration::microseconds(1));
                row.clone()
            }
            Entry::Vacant(entry) => entry
                .insert(Rating {
                    id: Uuid::new_v4(),
                    identity_id: draft.identity_id,
                    venue_id: draft.venue_id,
                    score: draft.score,
                    comment: draft.comment,
                    created_at: now,
                    updated_at: now,
                })
                .clone(),
        };

        Ok(rating)
    }

    async fn get_by_identity_and_venue(
        &self,
        identity_id: Uuid,
        venue_id: &str,
    ) -> Result<Option<Rating>, AppError> {
        let rows = self.rows.lock().await;
        Ok(rows.get(&(identity_id, venue_id.to_string())).cloned())
    }

    async fn list_by_venue(&self, venue_id: &str) -> Result<Vec<Rating>, AppError> {
        let rows = self.rows.lock().await;
        let ratings = rows
            .values()
            .filter(|r| r.venue_id == venue_id)
            .cloned()
            .collect();
        Ok(newest_first(ratings))
    }

    async fn list_by_identity(&self, identity_id: Uuid) -> Result<Vec<Rating>, AppError> {
        let rows = self.rows.lock().await;
        let ratings = rows
            .values()
            .filter(|r| r.identity_id == identity_id)
            .cloned()
            .collect();
        Ok(newest_first(ratings))
    }
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    rows: Mutex<HashMap<Uuid, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, identity_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.rows.lock().await.get(&identity_id).cloned())
    }

    async fn get_many(&self, identity_ids: &[Uuid]) -> Result<Vec<Profile>, AppError> {
        let rows = self.rows.lock().await;
        Ok(identity_ids
            .iter()
            .filter_map(|id| rows.get(id).cloned())
            .collect())
    }

    async fn set_full_name(
        &self,
        identity_id: Uuid,
        full_name: String,
    ) -> Result<Profile, AppError> {
        let mut rows = self.rows.lock().await;
        let profile = Profile {
            identity_id,
            full_name: Some(full_name),
            updated_at: Utc::now(),
        };
        rows.insert(identity_id, profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Score;

    fn draft(identity_id: Uuid, venue_id: &str, score: i64) -> RatingDraft {
        RatingDraft {
            identity_id,
            venue_id: venue_id.into(),
            score: Score::new(score).unwrap(),
            comment: None,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = MemoryRatingStore::new();
        let user = Uuid::new_v4();

        let first = store.upsert(draft(user, "1", 2)).await.unwrap();
        let second = store.upsert(draft(user, "1", 5)).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.score.value(), 5);
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let store = MemoryRatingStore::new();
        let user = Uuid::new_v4();

        store.upsert(draft(user, "1", 3)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.upsert(draft(user, "2", 4)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.upsert(draft(Uuid::new_v4(), "2", 1)).await.unwrap();

        let mine: Vec<_> = store
            .list_by_identity(user)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.venue_id)
            .collect();
        assert_eq!(mine, ["2", "1"]);

        let venue: Vec<_> = store
            .list_by_venue("2")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.score.value())
            .collect();
        assert_eq!(venue, [1, 4]);
    }

    #[tokio::test]
    async fn profiles_are_created_on_first_name_update() {
        let store = MemoryProfileStore::new();
        let user = Uuid::new_v4();

        assert!(store.get(user).await.unwrap().is_none());
        store.set_full_name(user, "João P.".into()).await.unwrap();

        let profile = store.get(user).await.unwrap().unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("João P."));
        assert_eq!(store.get_many(&[user, Uuid::new_v4()]).await.unwrap().len(), 1);
    }
}
