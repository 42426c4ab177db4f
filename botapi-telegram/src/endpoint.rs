//! Bot API endpoint: `<base>/bot<token>/<method>` URL building.

use std::fmt;

use anyhow::{Context, Result};
use botapi_core::SendError;
use reqwest::Url;

/// Masks a bot token for logging: first 7 chars + `***` + last 4 chars.
/// Tokens of length ≤ 11 are fully masked.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Root of the bot's method URLs. Cheap to clone.
#[derive(Clone)]
pub struct ApiEndpoint {
    root: Url,
    masked_token: String,
}

impl ApiEndpoint {
    /// Builds the endpoint from an API base (e.g. `https://api.telegram.org`) and bot token.
    pub fn new(base: &str, token: &str) -> Result<Self> {
        let root = format!("{}/bot{}/", base.trim_end_matches('/'), token);
        let root = Url::parse(&root)
            .with_context(|| format!("Invalid Bot API base URL: {}", base))?;
        if root.cannot_be_a_base() {
            anyhow::bail!("Bot API base URL cannot be a base: {}", base);
        }
        Ok(Self {
            root,
            masked_token: mask_token(token),
        })
    }

    /// Absolute URL of `method`, without query.
    pub fn method_url(&self, method: &'static str) -> Result<Url, SendError> {
        self.root
            .join(method)
            .map_err(|e| SendError::transport(method, format!("invalid method URL: {}", e)))
    }
}

impl fmt::Debug for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiEndpoint")
            .field("host", &self.root.host_str())
            .field("token", &self.masked_token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let endpoint = ApiEndpoint::new("https://api.telegram.org/", "123:abc").unwrap();
        assert_eq!(
            endpoint.method_url("sendMessage").unwrap().as_str(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_method_url_keeps_base_path() {
        let endpoint = ApiEndpoint::new("http://localhost:8081/tg", "tok").unwrap();
        assert_eq!(
            endpoint.method_url("getUpdates").unwrap().as_str(),
            "http://localhost:8081/tg/bottok/getUpdates"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base() {
        assert!(ApiEndpoint::new("not a url", "tok").is_err());
    }

    #[test]
    fn test_debug_masks_token() {
        let endpoint =
            ApiEndpoint::new("https://api.telegram.org", "1234567890:AAHsecretsecret").unwrap();
        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("AAHsecretsecret"));
        assert!(debug.contains("1234567***cret"));
    }

    #[test]
    fn test_mask_token_short_returns_all_star() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("123:abc"), "***");
    }
}
