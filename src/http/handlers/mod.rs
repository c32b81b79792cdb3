use tracing::Level;

use crate::errors::AppError;

pub mod profile;
pub mod rating;
pub mod venue;

pub use profile::{get_my_profile_handler, get_profile_handler, update_profile_handler};
pub use rating::{
    get_my_rating_handler, list_my_ratings_handler, list_venue_ratings_handler,
    submit_rating_handler,
};
pub use venue::{get_aggregate_handler, get_venue_handler, list_venues_handler};

/// Caller mistakes are warnings, infrastructure failures are errors.
pub(crate) fn failure_level(err: &AppError) -> Level {
    match err {
        AppError::Storage(_) | AppError::EnvError(_) => Level::ERROR,
        _ => Level::WARN,
    }
}

pub(crate) fn log_failure(action: &str, err: &AppError) {
    if failure_level(err) == Level::ERROR {
        tracing::error!("Error {}: {}", action, err);
    } else {
        tracing::warn!("Rejected {}: {}", action, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_infrastructure_failures_log_as_errors() {
        assert_eq!(
            failure_level(&AppError::Storage("timed out".into())),
            Level::ERROR
        );
        assert_eq!(
            failure_level(&AppError::EnvError("JWT_SECRET".into())),
            Level::ERROR
        );
        for err in [
            AppError::AuthRequired("sign in".into()),
            AppError::Unauthorized("bad token".into()),
            AppError::Validation("score".into()),
            AppError::NotFound("venue".into()),
        ] {
            assert_eq!(failure_level(&err), Level::WARN, "{err}");
        }
    }
}
