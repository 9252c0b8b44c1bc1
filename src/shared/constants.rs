/// Maximum number of photos a report may carry
pub const MAX_PHOTOS: usize = 5;

/// Maximum accepted size for a single image upload
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum length of a report title
pub const TITLE_MAX_CHARS: usize = 50;

/// Maximum length of a report description
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Placeholder shown when reverse geocoding yields nothing
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Tooltip label on the self-location marker
pub const SELF_MARKER_LABEL: &str = "You are here";

/// The accuracy circle around the self marker is capped at this radius
pub const ACCURACY_CIRCLE_CAP_METERS: f64 = 500.0;
