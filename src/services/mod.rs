use std::{future::Future, time::Duration};

use crate::errors::AppError;

pub mod profile;
pub mod rating;

pub use profile::ProfileService;
pub use rating::RatingService;

/// Bounds a store call. On elapse the call is dropped and reported as a
/// transient storage failure.
pub(crate) async fn bounded<T, F>(limit: Duration, what: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("{} timed out after {}ms", what, limit.as_millis());
            Err(AppError::Storage(format!(
                "{} timed out after {}ms",
                what,
                limit.as_millis()
            )))
        }
    }
}
