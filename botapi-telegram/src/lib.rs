//! # botapi-telegram
//!
//! Telegram Bot API client: [`BotApi`] routes outbound messages to the text or file
//! sender over a [`Transport`] and decodes every response into a typed outcome.
//! Also covers one-shot `getUpdates` / `deleteMessage`, endpoint URLs and env config.
//! No polling loop, retries or persistence.

mod api;
mod config;
mod endpoint;
mod file;
mod sender;
mod text;
mod transport;

#[cfg(test)]
mod test_support;

pub use api::{decode_envelope, BotApi, DELETE_MESSAGE, GET_UPDATES, SEND};
pub use config::{TelegramConfig, DEFAULT_API_URL};
pub use endpoint::{mask_token, ApiEndpoint};
pub use file::{upload_url, FileSender, SEND_FILE};
pub use sender::MessageSender;
pub use text::{send_message_body, TextSender, DEFAULT_PARSE_MODE, SEND_MESSAGE};
pub use transport::{multipart_form, ReqwestTransport, RequestBody, Transport};
