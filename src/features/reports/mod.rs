pub mod dtos;
pub mod feed;
pub mod filters;
pub mod geocoding;
pub mod models;
pub mod store;
pub mod upvotes;

pub use feed::{FeedScope, FetchOutcome, ReportFeed};
pub use filters::FilterCriteria;
pub use geocoding::{GeocodingService, ReverseGeocoder};
pub use models::{Report, ReportCategory, ReportStatus, Urgency};
pub use store::ReportStore;
pub use upvotes::UpvoteController;
