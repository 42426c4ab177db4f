//! The capability shared by the text and file paths.

use async_trait::async_trait;
use botapi_core::{OutboundMessage, SendError};

/// Sends one [`OutboundMessage`] and returns the raw response body.
///
/// Failures are typed: pre-flight checks use their own [`botapi_core::ErrorKind`],
/// everything past them is `Transport`.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Operation name used in logs and errors.
    fn operation(&self) -> &'static str;

    async fn send(&self, message: &OutboundMessage) -> Result<String, SendError>;
}
