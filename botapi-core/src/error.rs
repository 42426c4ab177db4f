//! Error taxonomy for outbound sends and the transport boundary.

use std::fmt;

use thiserror::Error;

use crate::types::{Message, ResponseEnvelope};

/// Result of one send: the decoded envelope or a typed failure.
pub type SendOutcome = std::result::Result<ResponseEnvelope<Message>, SendError>;

/// Failure category of a send. Every variant is recoverable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed caller input; no I/O attempted.
    InvalidRequest,
    /// File extension not recognized as a sendable media kind.
    UnsupportedMedia,
    /// File bytes could not be downloaded or read.
    FileUnavailable,
    /// Non-2xx status or network fault.
    Transport,
    /// 2xx with no body.
    EmptyResponse,
    /// Body present but not a valid envelope.
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::UnsupportedMedia => "unsupported media",
            ErrorKind::FileUnavailable => "file unavailable",
            ErrorKind::Transport => "transport",
            ErrorKind::EmptyResponse => "empty response",
            ErrorKind::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Typed failure returned from every client operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation}() - {kind} error: {detail}")]
pub struct SendError {
    kind: ErrorKind,
    operation: &'static str,
    detail: String,
    status: Option<u16>,
}

impl SendError {
    pub fn new(kind: ErrorKind, operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            detail: detail.into(),
            status: None,
        }
    }

    pub fn invalid_request(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, operation, detail)
    }

    pub fn unsupported_media(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedMedia, operation, detail)
    }

    pub fn file_unavailable(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileUnavailable, operation, detail)
    }

    pub fn transport(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, operation, detail)
    }

    /// 2xx with an empty body. Detail is always empty.
    pub fn empty_response(operation: &'static str) -> Self {
        Self::new(ErrorKind::EmptyResponse, operation, "")
    }

    pub fn decode(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, operation, detail)
    }

    /// Maps a transport failure to a `Transport` error, keeping the HTTP status if there was one.
    pub fn from_transport(operation: &'static str, err: TransportError) -> Self {
        let status = err.status();
        Self {
            status,
            ..Self::transport(operation, err.to_string())
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Name of the operation that failed (e.g. `sendMessage`, `sendFile`).
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// HTTP status for non-2xx transport failures.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Failure reported by a transport; carries no interpretation of the body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed with status code: {status}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request build error: {0}")]
    Request(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
