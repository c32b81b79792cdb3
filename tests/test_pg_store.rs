//! Runs against a real Postgres. Needs `DATABASE_URL`:
//! `cargo test --test test_pg_store -- --ignored`

use brewscore_be::{
    db::{PgProfileStore, PgRatingStore, ProfileStore, RatingStore},
    models::{RatingDraft, Score},
};
use sqlx::PgPool;
use uuid::Uuid;

fn draft(identity_id: Uuid, venue_id: &str, score: i64, comment: Option<&str>) -> RatingDraft {
    RatingDraft {
        identity_id,
        venue_id: venue_id.into(),
        score: Score::new(score).unwrap(),
        comment: comment.map(String::from),
    }
}

async fn row_count(pool: &PgPool, identity_id: Uuid, venue_id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM ratings WHERE identity_id = $1 AND venue_id = $2",
    )
    .bind(identity_id)
    .bind(venue_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test]
#[ignore]
async fn upsert_replaces_and_keeps_created_at(pool: PgPool) {
    let store = PgRatingStore::new(pool.clone());
    let user = Uuid::new_v4();

    let first = store
        .upsert(draft(user, "1", 2, Some("too bitter")))
        .await
        .unwrap();
    let second = store.upsert(draft(user, "1", 5, None)).await.unwrap();

    assert_eq!(row_count(&pool, user, "1").await, 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.score.value(), 5);
    assert_eq!(second.comment, None);

    let stored = store
        .get_by_identity_and_venue(user, "1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, second);
}

#[sqlx::test]
#[ignore]
async fn updated_at_advances_even_when_the_clock_does_not(pool: PgPool) {
    let store = PgRatingStore::new(pool.clone());
    let user = Uuid::new_v4();

    let first = store.upsert(draft(user, "2", 3, None)).await.unwrap();

    // Push the stored timestamp into the future so the next write's `now` is older.
    sqlx::query(
        "UPDATE ratings SET updated_at = updated_at + INTERVAL '1 hour' WHERE id = $1",
    )
    .bind(first.id)
    .execute(&pool)
    .await
    .unwrap();

    let bumped = first.updated_at + chrono::Duration::hours(1);
    let second = store.upsert(draft(user, "2", 4, None)).await.unwrap();
    assert!(second.updated_at > bumped);
    assert_eq!(second.created_at, first.created_at);
}

#[sqlx::test]
#[ignore]
async fn concurrent_upserts_for_one_pair_leave_one_row(pool: PgPool) {
    let store = PgRatingStore::new(pool.clone());
    let user = Uuid::new_v4();

    let results = futures::future::join_all((0..16).map(|i| {
        let store = store.clone();
        async move {
            store
                .upsert(draft(user, "3", (i % 5) + 1, Some("race")))
                .await
        }
    }))
    .await;

    let mut ids: Vec<_> = results.into_iter().map(|r| r.unwrap().id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(row_count(&pool, user, "3").await, 1);
}

#[sqlx::test]
#[ignore]
async fn listings_are_newest_first(pool: PgPool) {
    let store = PgRatingStore::new(pool.clone());
    let user = Uuid::new_v4();

    store.upsert(draft(user, "1", 3, None)).await.unwrap();
    store.upsert(draft(user, "4", 4, None)).await.unwrap();
    store.upsert(draft(Uuid::new_v4(), "4", 1, None)).await.unwrap();

    let mine: Vec<_> = store
        .list_by_identity(user)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.venue_id)
        .collect();
    assert_eq!(mine, ["4", "1"]);

    let venue: Vec<_> = store
        .list_by_venue("4")
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.score.value())
        .collect();
    assert_eq!(venue, [1, 4]);
}

#[sqlx::test]
#[ignore]
async fn profile_upsert_creates_then_renames(pool: PgPool) {
    let store = PgProfileStore::new(pool);
    let user = Uuid::new_v4();

    assert!(store.get(user).await.unwrap().is_none());
    store.set_full_name(user, "Ana L.".into()).await.unwrap();
    store.set_full_name(user, "Ana Lima".into()).await.unwrap();

    let profiles = store.get_many(&[user, Uuid::new_v4()]).await.unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].full_name.as_deref(), Some("Ana Lima"));
}
