//! Process configuration loaded from the environment.
//!
//! Provider credentials are optional here: their absence is reported per
//! request by the orchestrator, so the server can start without them.

use crate::{Error, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_STORY_MODEL: &str = "gpt-4";
pub const DEFAULT_FAL_BASE_URL: &str = "https://fal.run";
pub const DEFAULT_FAL_PRIMARY_MODEL: &str = "fal-ai/ideogram/v2a/turbo";
pub const DEFAULT_FAL_ALTERNATE_MODEL: &str = "fal-ai/ideogram/v2a";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub openai_api_key: Option<String>,
    pub fal_key: Option<String>,
    pub openai_base_url: String,
    pub story_model: String,
    pub fal_base_url: String,
    pub fal_primary_model: String,
    pub fal_alternate_model: String,
    pub openai_timeout: Duration,
    pub fal_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let or_default = |key: &str, default: &str| {
            non_empty(key)
                .map(|value| value.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = or_default("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("BIND_ADDR: {}", e)))?;

        Ok(Self {
            bind_addr,
            openai_api_key: non_empty("OPENAI_API_KEY"),
            fal_key: non_empty("FAL_KEY"),
            openai_base_url: or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            story_model: or_default("STORY_MODEL", DEFAULT_STORY_MODEL),
            fal_base_url: or_default("FAL_BASE_URL", DEFAULT_FAL_BASE_URL),
            fal_primary_model: or_default("FAL_PRIMARY_MODEL", DEFAULT_FAL_PRIMARY_MODEL),
            fal_alternate_model: or_default("FAL_ALTERNATE_MODEL", DEFAULT_FAL_ALTERNATE_MODEL),
            openai_timeout: parse_secs(non_empty("OPENAI_TIMEOUT_SECS"), "OPENAI_TIMEOUT_SECS", 60)?,
            fal_timeout: parse_secs(non_empty("FAL_TIMEOUT_SECS"), "FAL_TIMEOUT_SECS", 120)?,
        })
    }
}

fn parse_secs(value: Option<String>, key: &str, default: u64) -> Result<Duration> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", key, e))),
    }
}
