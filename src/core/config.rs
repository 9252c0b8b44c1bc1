use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub geocode: GeocodeConfig,
    pub location: LocationConfig,
    pub session: SessionConfig,
}

/// Backend REST API connection settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Reverse-geocoding (Nominatim) settings
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    pub base_url: String,
}

/// Geolocation tracking settings
#[derive(Debug, Clone)]
pub struct LocationConfig {
    /// Fallback coordinate shown when no position fix is available
    pub default_latitude: f64,
    pub default_longitude: f64,
    /// Position acquisition timeout in seconds
    pub acquire_timeout_secs: u64,
}

/// Persisted session storage settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            geocode: GeocodeConfig::from_env()?,
            location: LocationConfig::from_env()?,
            session: SessionConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("CIVIC_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".to_string());

        let timeout_secs = env::var("CIVIC_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CIVIC_HTTP_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }
}

impl GeocodeConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("CIVIC_GEOCODE_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl LocationConfig {
    // Fallback coordinate matches the map's initial center
    const DEFAULT_LATITUDE: f64 = 13.083512739205634;
    const DEFAULT_LONGITUDE: f64 = 80.27065486455128;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let default_latitude = env::var("CIVIC_DEFAULT_LATITUDE")
            .unwrap_or_else(|_| Self::DEFAULT_LATITUDE.to_string())
            .parse::<f64>()
            .map_err(|_| "CIVIC_DEFAULT_LATITUDE must be a valid number".to_string())?;

        let default_longitude = env::var("CIVIC_DEFAULT_LONGITUDE")
            .unwrap_or_else(|_| Self::DEFAULT_LONGITUDE.to_string())
            .parse::<f64>()
            .map_err(|_| "CIVIC_DEFAULT_LONGITUDE must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("CIVIC_LOCATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CIVIC_LOCATION_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            default_latitude,
            default_longitude,
            acquire_timeout_secs,
        })
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let file = env::var("CIVIC_SESSION_FILE")
            .unwrap_or_else(|_| ".civicconnect/session.json".to_string());

        Ok(Self {
            file: PathBuf::from(file),
        })
    }
}
