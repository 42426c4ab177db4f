//! Minimal client config: token, API URL, log path, request timeout.
//! Loaded from env vars BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE, TELEGRAM_REQUEST_TIMEOUT_SECS.

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Default Bot API host.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_LOG_FILE: &str = "logs/botapi.log";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Telegram Bot API client config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL; `None` means [`DEFAULT_API_URL`].
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// TELEGRAM_REQUEST_TIMEOUT_SECS; 0 disables the client-wide timeout.
    pub request_timeout_secs: u64,
}

impl TelegramConfig {
    /// Load from env: BOT_TOKEN required, the rest optional.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load from env. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let mut config = Self::with_token(bot_token);
        config.telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        if let Ok(log_file) = env::var("LOG_FILE") {
            config.log_file = log_file;
        }
        config.request_timeout_secs = env::var("TELEGRAM_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Ok(config)
    }

    /// Build from the given token, everything else default.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// API base URL, falling back to [`DEFAULT_API_URL`].
    pub fn api_url(&self) -> &str {
        self.telegram_api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Token must be non-empty; API URL must parse if set.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
