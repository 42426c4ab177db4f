//! # botapi-core
//!
//! Core types for the bot API client: platform models and the response [`ResponseEnvelope`],
//! the caller-facing [`OutboundMessage`] with its [`Route`] and [`MediaKind`] classification,
//! the [`SendError`] taxonomy, the [`SendObserver`] seam, and tracing initialization.
//! Transport-agnostic; used by botapi-telegram and botapi-cli.

pub mod error;
pub mod logger;
pub mod observer;
pub mod outbound;
pub mod types;

pub use error::{ErrorKind, SendError, SendOutcome, TransportError};
pub use logger::init_tracing;
pub use observer::{NoopObserver, SendObserver, TracingObserver};
pub use outbound::{
    file_name_from_reference, remote_url, FilePayload, MediaKind, OutboundMessage, Route,
};
pub use types::{
    Audio, Chat, InlineKeyboardButton, KeyboardButton, Message, MessageEntity, PhotoSize,
    ReplyMarkup, ResponseEnvelope, Update, User, Video, WebAppInfo,
};
