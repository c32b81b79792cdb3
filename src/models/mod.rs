pub mod profile;
pub mod rating;
pub mod venue;

pub use profile::Profile;
pub use rating::{AggregateRating, AggregateSource, Rating, RatingDraft, Score};
pub use venue::{Venue, VenueDetail, VenueSummary};
