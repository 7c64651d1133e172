use std::env;

use crate::constants::{DEFAULT_ACCOUNTS_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TABLES_DIR};

/// Store configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository slug, e.g. "owner/campaign-data"
    pub repository: String,
    /// Branch the documents live on
    pub branch: String,
    /// Bearer token for the contents API
    pub token: String,
    /// Path of the accounts document inside the repository
    pub accounts_path: String,
    /// Directory holding the per-table documents
    pub tables_dir: String,
    /// Timeout for a single store request, in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let repository = env::var("STORE_REPOSITORY")
            .map_err(|_| "STORE_REPOSITORY must be set (owner/name)")?;

        let branch = env::var("STORE_BRANCH").unwrap_or_else(|_| "main".to_string());

        let token = env::var("STORE_TOKEN")
            .map_err(|_| "STORE_TOKEN must be set for store authentication")?;

        let accounts_path =
            env::var("ACCOUNTS_PATH").unwrap_or_else(|_| DEFAULT_ACCOUNTS_PATH.to_string());

        let tables_dir = env::var("TABLES_DIR").unwrap_or_else(|_| DEFAULT_TABLES_DIR.to_string());

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid REQUEST_TIMEOUT_SECS")?;

        Ok(Config {
            repository,
            branch,
            token,
            accounts_path,
            tables_dir,
            request_timeout_secs,
        })
    }
}
