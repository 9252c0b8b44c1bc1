use chrono::{DateTime, Utc};
use thiserror::Error;

/// A raw position fix from the platform's positioning stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSource {
    /// Produced by the continuous positioning stream
    Automatic,
    /// Set by a map click or marker drag while manual mode was active
    Manual,
    /// Configured default coordinate, used before any fix arrives
    Fallback,
}

/// The single "current location" value. Exactly one is held at a time;
/// a manual override replaces the live stream value until the next
/// automatic sample arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub source: SampleSource,
}

impl LocationSample {
    pub fn automatic(position: Position) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
            accuracy: position.accuracy,
            timestamp: Utc::now(),
            source: SampleSource::Automatic,
        }
    }

    pub fn manual(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: Utc::now(),
            source: SampleSource::Manual,
        }
    }

    pub fn fallback(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: Utc::now(),
            source: SampleSource::Fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Timed out acquiring location")]
    Timeout,

    #[error("Geolocation is not supported on this platform")]
    Unsupported,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

impl PositionError {
    /// Permission denial and missing platform support will not recover by
    /// waiting for the next sample; the watch loop stops on these.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PositionError::PermissionDenied | PositionError::Unsupported)
    }
}
