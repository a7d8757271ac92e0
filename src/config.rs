//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Optional catalog file replacing the embedded seed catalog
    pub activities_path: Option<PathBuf>,
    /// Frontend URL allowed by CORS in addition to localhost
    pub frontend_url: String,
    /// Reject signups once an activity is at `max_participants`
    pub enforce_capacity: bool,
}

impl Config {
    /// Config for tests: embedded catalog, capacity not enforced.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            static_dir: PathBuf::from("static"),
            activities_path: None,
            frontend_url: "http://localhost:8080".to_string(),
            enforce_capacity: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            activities_path: env::var("ACTIVITIES_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            frontend_url: env::var("FRONTEND_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            enforce_capacity: parse_var("ENFORCE_CAPACITY", false)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-wide, so every case lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("PORT");
        env::remove_var("ENFORCE_CAPACITY");
        env::remove_var("ACTIVITIES_PATH");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.port, 8080);
        assert!(!config.enforce_capacity);
        assert!(config.activities_path.is_none());

        env::set_var("PORT", "9090");
        env::set_var("ENFORCE_CAPACITY", "true");
        env::set_var("ACTIVITIES_PATH", "data/activities.json");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.port, 9090);
        assert!(config.enforce_capacity);
        assert_eq!(
            config.activities_path,
            Some(PathBuf::from("data/activities.json"))
        );

        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        env::remove_var("PORT");
        env::remove_var("ENFORCE_CAPACITY");
        env::remove_var("ACTIVITIES_PATH");
    }
}
