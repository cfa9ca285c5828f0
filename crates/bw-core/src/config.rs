use std::{env, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_HIBP_API_BASE: &str = "https://haveibeenpwned.com";
pub const DEFAULT_HIBP_USER_AGENT: &str = "BreachWatcherProBot";

/// Typed configuration, built once at startup and shared behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram
    pub telegram_bot_token: String,
    pub telegram_safe_limit: usize,

    // HIBP
    pub hibp: HibpConfig,
}

/// Settings for the breach API client.
#[derive(Clone, Debug)]
pub struct HibpConfig {
    pub api_key: String,
    pub api_base: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// When true, HIBP answers with breach names only (its own default).
    pub truncate_response: bool,
}

impl Config {
    /// Load from the process environment, seeded from `.env` if present.
    ///
    /// Variables already set in the environment are never overridden by `.env`.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Error::Config(format!(".env could not be read: {e}"))),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        // Required secrets
        let telegram_bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELEGRAM_BOT_TOKEN"))
            .ok_or_else(|| {
                Error::Config("BOT_TOKEN environment variable is required".to_string())
            })?;
        let api_key = get("HIBP_KEY").ok_or_else(|| {
            Error::Config("HIBP_KEY environment variable is required".to_string())
        })?;

        let api_base = get("HIBP_API_BASE")
            .unwrap_or_else(|| DEFAULT_HIBP_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let user_agent =
            get("HIBP_USER_AGENT").unwrap_or_else(|| DEFAULT_HIBP_USER_AGENT.to_string());
        let timeout_ms =
            parse_num::<u64>("HIBP_TIMEOUT_MS", get("HIBP_TIMEOUT_MS"))?.unwrap_or(10_000);
        let timeout = Duration::from_millis(timeout_ms);
        let truncate_response =
            parse_bool("HIBP_TRUNCATE_RESPONSE", get("HIBP_TRUNCATE_RESPONSE"))?.unwrap_or(false);

        let telegram_safe_limit =
            parse_num::<usize>("TELEGRAM_SAFE_LIMIT", get("TELEGRAM_SAFE_LIMIT"))?
                .unwrap_or(4000)
                .clamp(200, 4096);

        Ok(Self {
            telegram_bot_token,
            telegram_safe_limit,
            hibp: HibpConfig {
                api_key,
                api_base,
                user_agent,
                timeout,
                truncate_response,
            },
        })
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, v: Option<String>) -> Result<Option<T>> {
    let Some(v) = v else {
        return Ok(None);
    };
    v.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got {v:?}")))
}

fn parse_bool(key: &str, v: Option<String>) -> Result<Option<bool>> {
    let Some(v) = v else {
        return Ok(None);
    };
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(Error::Config(format!("{key} must be a boolean, got {v:?}"))),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
