//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix login, the comic source and the feedback relay.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub comics: ComicsConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Where comics come from and how they are fetched.
#[derive(Debug, Deserialize, Clone)]
pub struct ComicsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_random_url")]
    pub random_url: String,
    /// The upstream rejects default client identifiers.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub search_page_size: usize,
}

impl Default for ComicsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            random_url: default_random_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            search_page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://xkcd.com".to_string()
}
fn default_random_url() -> String {
    "https://c.xkcd.com/random/comic/".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:57.0) Gecko/20100101 Firefox/57.0".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> usize {
    5
}

/// Feedback relay. Without a room, `/feedback` answers with an apology.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub room: Option<String>,
}
