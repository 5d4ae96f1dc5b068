//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;

/// OAuth scopes requested from Strava.
pub const STRAVA_SCOPES: [&str; 2] = ["read", "activity:read_all"];

const STRAVA_AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Where Strava sends the user back after consent
    pub strava_redirect_uri: String,
    /// Where the browser lands after sign-in and sign-out
    pub frontend_url: String,
    /// Page title shown by the dashboard (the current year is appended)
    pub meta_title: String,
    /// Page description shown by the dashboard
    pub meta_description: String,
    /// Server port
    pub port: u16,
    /// JSON file holding the `token` and `settings` records
    pub data_path: PathBuf,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_redirect_uri: "http://localhost:8080/auth/strava/callback".to_string(),
            frontend_url: "/".to_string(),
            meta_title: "Goal Tracker".to_string(),
            meta_description: "Yearly distance goal".to_string(),
            port: 8080,
            data_path: env::temp_dir().join("strava-goals-test.json"),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            strava_redirect_uri: env::var("STRAVA_REDIRECT_URI").unwrap_or_else(|_| {
                format!("http://localhost:{}/auth/strava/callback", port)
            }),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "/".to_string()),
            meta_title: env::var("META_TITLE").unwrap_or_else(|_| "Goal Tracker".to_string()),
            meta_description: env::var("META_DESCRIPTION").unwrap_or_default(),
            port: port
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", port.clone()))?,
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/storage.json")),
        })
    }

    /// Strava consent page URL the sign-in link points at.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?client_id={}&response_type=code&redirect_uri={}&approval_prompt=force&scope={}",
            STRAVA_AUTHORIZE_URL,
            urlencoding::encode(&self.strava_client_id),
            urlencoding::encode(&self.strava_redirect_uri),
            STRAVA_SCOPES.join(",")
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
