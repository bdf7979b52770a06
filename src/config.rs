use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::api::DEFAULT_API_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = var("MOCK_TEST_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let state_dir = var("MOCK_TEST_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("mock-test"));

        let log_dir = var("MOCK_TEST_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| state_dir.join("logs"));

        let log_filter = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Self {
            api_url,
            state_dir,
            log_dir,
            log_filter,
        }
    }
}
