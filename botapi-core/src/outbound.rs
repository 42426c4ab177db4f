//! Outbound message request and its classification: [`Route`] (text vs. file) and
//! [`MediaKind`] (by file extension).

use std::fmt;

use url::Url;

use crate::types::ReplyMarkup;

/// One outgoing message as handed to the client. At least one of `text` or
/// `file_reference` must be set; both means a file with a caption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutboundMessage {
    /// Destination chat identifier.
    pub chat_id: String,
    pub text: Option<String>,
    /// Absolute http(s) URL or local filesystem path.
    pub file_reference: Option<String>,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<ReplyMarkup>,
    /// Overrides the default `html` parse mode on the text path.
    pub parse_mode: Option<String>,
}

impl OutboundMessage {
    /// Plain text message.
    pub fn text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// File message without caption.
    pub fn file(chat_id: impl Into<String>, file_reference: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            file_reference: Some(file_reference.into()),
            ..Self::default()
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.text = Some(caption.into());
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn with_markup(mut self, markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = Some(parse_mode.into());
        self
    }

    /// Text, treating an empty string as unset.
    pub fn text_value(&self) -> Option<&str> {
        non_empty(self.text.as_deref())
    }

    /// File reference, treating an empty string as unset.
    pub fn file_reference_value(&self) -> Option<&str> {
        non_empty(self.file_reference.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Which sender handles a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Text,
    File,
}

impl Route {
    /// Text when only text is set; File whenever a file reference is set; `None` when neither is.
    pub fn classify(message: &OutboundMessage) -> Option<Route> {
        match (message.text_value(), message.file_reference_value()) {
            (Some(_), None) => Some(Route::Text),
            (_, Some(_)) => Some(Route::File),
            (None, None) => None,
        }
    }
}

/// Media classification of an outbound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
    Unsupported,
}

impl MediaKind {
    /// Classifies by extension, case-insensitively. For URLs the path is used, so query
    /// strings and fragments do not affect the result.
    pub fn from_reference(reference: &str) -> MediaKind {
        let name = file_name_from_reference(reference);
        let extension = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return MediaKind::Unsupported,
        };
        match extension.as_str() {
            "jpg" | "jpeg" | "png" => MediaKind::Photo,
            "mp4" => MediaKind::Video,
            "mp3" | "wav" => MediaKind::Audio,
            _ => MediaKind::Unsupported,
        }
    }

    /// Multipart part name for this kind; `None` for `Unsupported`.
    pub fn form_field(&self) -> Option<&'static str> {
        match self {
            MediaKind::Photo => Some("photo"),
            MediaKind::Video => Some("video"),
            MediaKind::Audio => Some("audio"),
            MediaKind::Unsupported => None,
        }
    }

    /// Remote operation used to send this kind; `None` for `Unsupported`.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            MediaKind::Photo => Some("sendPhoto"),
            MediaKind::Video => Some("sendVideo"),
            MediaKind::Audio => Some("sendAudio"),
            MediaKind::Unsupported => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_field().unwrap_or("unsupported"))
    }
}

/// File bytes ready for upload. Owned by a single send and moved into the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_kind: MediaKind,
}

/// Parses `reference` as a remote file location. Only absolute http(s) URLs qualify;
/// anything else (including `C:\...` paths) is a local path.
pub fn remote_url(reference: &str) -> Option<Url> {
    Url::parse(reference)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Trailing path segment of a URL (query and fragment stripped) or filesystem path.
pub fn file_name_from_reference(reference: &str) -> String {
    if let Some(url) = remote_url(reference) {
        return url
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or_default()
            .to_string();
    }
    reference
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(reference)
        .to_string()
}
