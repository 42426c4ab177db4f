//! [`BotApi`]: routes an [`OutboundMessage`] to the text or file sender and turns every
//! outcome (raw body, transport fault, pre-flight failure) into a typed result.
//!
//! Failures are reported to the injected [`SendObserver`] with the originating operation
//! name and returned; nothing panics past this boundary. Bodies are decoded here and only
//! here: empty → `EmptyResponse`, unparseable → `Decode`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use botapi_core::{
    Message, OutboundMessage, ResponseEnvelope, Route, SendError, SendObserver, SendOutcome,
    TracingObserver, Update,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::TelegramConfig;
use crate::endpoint::ApiEndpoint;
use crate::file::FileSender;
use crate::sender::MessageSender;
use crate::text::TextSender;
use crate::transport::{ReqwestTransport, Transport};

pub const GET_UPDATES: &str = "getUpdates";
pub const DELETE_MESSAGE: &str = "deleteMessage";
/// Operation name for failures that happen before a sender is chosen.
pub const SEND: &str = "send";

/// Decodes a raw body into an envelope. Whitespace-only counts as empty.
pub fn decode_envelope<T: DeserializeOwned>(
    operation: &'static str,
    body: &str,
) -> Result<ResponseEnvelope<T>, SendError> {
    if body.trim().is_empty() {
        return Err(SendError::empty_response(operation));
    }
    serde_json::from_str(body).map_err(|e| SendError::decode(operation, e.to_string()))
}

/// Bot API client. Cheap to share behind `Arc`; every method takes `&self` and holds no locks,
/// so any number of sends may run concurrently over the transport's connection pool.
#[derive(Clone)]
pub struct BotApi {
    endpoint: ApiEndpoint,
    transport: Arc<dyn Transport>,
    text: TextSender,
    file: FileSender,
    observer: Arc<dyn SendObserver>,
}

impl BotApi {
    /// Client over a pooled reqwest transport, configured from `config`.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = ApiEndpoint::new(config.api_url(), &config.bot_token)?;
        let transport = ReqwestTransport::new(config.request_timeout())?;
        debug!(endpoint = ?endpoint, "Bot API client initialized");
        Ok(Self::with_transport(endpoint, Arc::new(transport)))
    }

    /// Client over a caller-supplied transport. Logs failures through [`TracingObserver`].
    pub fn with_transport(endpoint: ApiEndpoint, transport: Arc<dyn Transport>) -> Self {
        Self {
            text: TextSender::new(endpoint.clone(), transport.clone()),
            file: FileSender::new(endpoint.clone(), transport.clone()),
            endpoint,
            transport,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the observer; pass [`botapi_core::NoopObserver`] for silence.
    pub fn with_observer(mut self, observer: Arc<dyn SendObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn sender_for(&self, route: Route) -> &dyn MessageSender {
        match route {
            Route::Text => &self.text,
            Route::File => &self.file,
        }
    }

    /// Reports and passes through the outcome of `operation`.
    fn observe<T>(
        &self,
        operation: &'static str,
        outcome: Result<ResponseEnvelope<T>, SendError>,
    ) -> Result<ResponseEnvelope<T>, SendError> {
        match &outcome {
            Ok(envelope) => self.observer.on_success(operation, envelope.ok),
            Err(err) => self.observer.on_failure(err.operation(), err),
        }
        outcome
    }

    /// Sends text or a file. A file reference selects the file path (text becomes the caption);
    /// text alone selects the text path; neither fails with `InvalidRequest` and no I/O.
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id))]
    pub async fn send_message(&self, message: &OutboundMessage) -> SendOutcome {
        let outcome = match Route::classify(message) {
            None => Err(SendError::invalid_request(
                SEND,
                "neither text nor file reference is set",
            )),
            Some(route) => {
                let sender = self.sender_for(route);
                debug!(route = ?route, operation = sender.operation(), "step: route selected");
                match sender.send(message).await {
                    Ok(body) => decode_envelope::<Message>(sender.operation(), &body),
                    Err(err) => Err(err),
                }
            }
        };
        self.observe(SEND, outcome)
    }

    /// [`Self::send_message`] bounded by `timeout`. On expiry the in-flight request is dropped
    /// and the result is a `Transport` failure.
    pub async fn send_message_within(
        &self,
        message: &OutboundMessage,
        timeout: Duration,
    ) -> SendOutcome {
        match tokio::time::timeout(timeout, self.send_message(message)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let err =
                    SendError::transport(SEND, format!("timed out after {} ms", timeout.as_millis()));
                self.observer.on_failure(SEND, &err);
                Err(err)
            }
        }
    }

    /// One `getUpdates` call. `offset` is sent only when given.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
    ) -> Result<ResponseEnvelope<Vec<Update>>, SendError> {
        let outcome = self.fetch_updates(offset).await;
        self.observe(GET_UPDATES, outcome)
    }

    /// Deletes `message_id` in `chat_id`. The envelope's `result` is the platform's boolean.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        chat_id: &str,
        message_id: i64,
    ) -> Result<ResponseEnvelope<bool>, SendError> {
        let outcome = self.delete(chat_id, message_id).await;
        self.observe(DELETE_MESSAGE, outcome)
    }

    async fn fetch_updates(
        &self,
        offset: Option<i64>,
    ) -> Result<ResponseEnvelope<Vec<Update>>, SendError> {
        let mut url = self.endpoint.method_url(GET_UPDATES)?;
        if let Some(offset) = offset {
            url.query_pairs_mut()
                .append_pair("offset", &offset.to_string());
        }
        let body = self
            .transport
            .execute_get(url)
            .await
            .map_err(|e| SendError::from_transport(GET_UPDATES, e))?;
        decode_envelope(GET_UPDATES, &body)
    }

    async fn delete(
        &self,
        chat_id: &str,
        message_id: i64,
    ) -> Result<ResponseEnvelope<bool>, SendError> {
        let mut url = self.endpoint.method_url(DELETE_MESSAGE)?;
        url.query_pairs_mut()
            .append_pair("chat_id", chat_id)
            .append_pair("message_id", &message_id.to_string());
        let body = self
            .transport
            .execute_get(url)
            .await
            .map_err(|e| SendError::from_transport(DELETE_MESSAGE, e))?;
        decode_envelope(DELETE_MESSAGE, &body)
    }
}
