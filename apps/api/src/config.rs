use anyhow::{Context, Result};

pub const DEFAULT_CATALOG_BASE_URL: &str =
    "https://raw.githubusercontent.com/Araise25/Release-Check-DB/master/tech-essentials";
pub const DEFAULT_SUBMISSION_REPO: &str = "Araise25/Release-Check-DB";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub catalog_base_url: String,
    /// Local JSON catalog to serve instead of fetching the upstream lists.
    pub catalog_file: Option<String>,
    /// Pins the year used to judge claims. Defaults to the system clock.
    pub current_year: Option<i32>,
    /// Enables the submission relay when present.
    pub github_token: Option<String>,
    pub submission_repo: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_BASE_URL.to_string()),
            catalog_file: optional_env("CATALOG_FILE"),
            current_year: optional_env("CURRENT_YEAR")
                .map(|v| v.parse::<i32>())
                .transpose()
                .context("CURRENT_YEAR must be an integer year")?,
            github_token: optional_env("GITHUB_TOKEN"),
            submission_repo: std::env::var("SUBMISSION_REPO")
                .unwrap_or_else(|_| DEFAULT_SUBMISSION_REPO.to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
