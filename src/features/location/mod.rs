pub mod model;
pub mod tracker;

pub use model::{LocationSample, Position, PositionError, SampleSource};
pub use tracker::{LocationState, LocationTracker, PositionSource, StreamPositionSource};
