//! Text path: one JSON-body POST to `sendMessage`.
//!
//! Free-form text travels in the JSON body rather than the query string, so `&`, `#`,
//! angle brackets, quotes, control characters and emoji reach the API unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use botapi_core::{OutboundMessage, ReplyMarkup, SendError};
use serde::Serialize;
use tracing::info;

use crate::endpoint::ApiEndpoint;
use crate::sender::MessageSender;
use crate::transport::{RequestBody, Transport};

pub const SEND_MESSAGE: &str = "sendMessage";
/// Rich-text mode used unless the message carries its own.
pub const DEFAULT_PARSE_MODE: &str = "html";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a ReplyMarkup>,
}

/// Builds the `sendMessage` JSON body. Fails with `InvalidRequest` when text is unset.
pub fn send_message_body(message: &OutboundMessage) -> Result<serde_json::Value, SendError> {
    let text = message
        .text_value()
        .ok_or_else(|| SendError::invalid_request(SEND_MESSAGE, "text not set"))?;
    let request = SendMessageRequest {
        chat_id: &message.chat_id,
        text,
        parse_mode: message.parse_mode.as_deref().unwrap_or(DEFAULT_PARSE_MODE),
        disable_web_page_preview: true,
        reply_to_message_id: message.reply_to_message_id,
        reply_markup: message.reply_markup.as_ref(),
    };
    serde_json::to_value(&request).map_err(|e| {
        SendError::transport(SEND_MESSAGE, format!("failed to serialize request: {}", e))
    })
}

/// Sends plain text messages. Never reads files or builds multipart bodies.
#[derive(Clone)]
pub struct TextSender {
    endpoint: ApiEndpoint,
    transport: Arc<dyn Transport>,
}

impl TextSender {
    pub fn new(endpoint: ApiEndpoint, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }
}

#[async_trait]
impl MessageSender for TextSender {
    fn operation(&self) -> &'static str {
        SEND_MESSAGE
    }

    async fn send(&self, message: &OutboundMessage) -> Result<String, SendError> {
        let body = send_message_body(message)?;
        let url = self.endpoint.method_url(SEND_MESSAGE)?;
        info!(
            chat_id = %message.chat_id,
            text_len = message.text_value().map(str::len).unwrap_or(0),
            has_markup = message.reply_markup.is_some(),
            "step: sendMessage request"
        );
        self.transport
            .execute_post(url, RequestBody::Json(body))
            .await
            .map_err(|e| SendError::from_transport(SEND_MESSAGE, e))
    }
}
