//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the remote API base address and request timeouts.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the remote API; all endpoint paths are relative to it.
    pub base_url: String,
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout_seconds = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECONDS.to_string())
            .parse::<u64>()
            .context("API_REQUEST_TIMEOUT_SECONDS must be a valid number")?;

        Ok(Config {
            base_url,
            request_timeout_seconds,
        })
    }

    /// Creates a configuration pointing at the given base address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}
