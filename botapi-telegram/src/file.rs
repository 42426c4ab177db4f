//! File path: classify the media kind, acquire the bytes (download or local read),
//! then one multipart POST to `sendPhoto` / `sendVideo` / `sendAudio`.
//!
//! Scalar parameters (`chat_id`, `caption`) go on the URL; the file is the only body part.
//! Reference, media kind and file name are checked before any byte is read.

use std::sync::Arc;

use async_trait::async_trait;
use botapi_core::{
    file_name_from_reference, remote_url, FilePayload, MediaKind, OutboundMessage, SendError,
};
use reqwest::Url;
use tracing::{debug, info};

use crate::endpoint::ApiEndpoint;
use crate::sender::MessageSender;
use crate::transport::{RequestBody, Transport};

/// Operation name for pre-flight failures; wire failures carry the media operation instead.
pub const SEND_FILE: &str = "sendFile";

/// Sends photo, video and audio files with an optional caption.
#[derive(Clone)]
pub struct FileSender {
    endpoint: ApiEndpoint,
    transport: Arc<dyn Transport>,
}

impl FileSender {
    pub fn new(endpoint: ApiEndpoint, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    /// Downloads absolute http(s) URLs; reads anything else from the local filesystem.
    async fn read_bytes(&self, reference: &str) -> Result<Vec<u8>, SendError> {
        if let Some(url) = remote_url(reference) {
            debug!(host = ?url.host_str(), "downloading file for upload");
            return self.transport.fetch_bytes(url).await.map_err(|e| {
                SendError::file_unavailable(
                    SEND_FILE,
                    format!("failed to retrieve file bytes: {}", e),
                )
            });
        }
        tokio::fs::read(reference).await.map_err(|e| {
            SendError::file_unavailable(
                SEND_FILE,
                format!("failed to retrieve file bytes: {}: {}", reference, e),
            )
        })
    }
}

/// URL for `operation` with `chat_id` and, when present, `caption` as percent-encoded query pairs.
pub fn upload_url(
    endpoint: &ApiEndpoint,
    operation: &'static str,
    message: &OutboundMessage,
) -> Result<Url, SendError> {
    let mut url = endpoint.method_url(operation)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("chat_id", &message.chat_id);
        if let Some(caption) = message.text_value() {
            query.append_pair("caption", caption);
        }
    }
    Ok(url)
}

#[async_trait]
impl MessageSender for FileSender {
    fn operation(&self) -> &'static str {
        SEND_FILE
    }

    async fn send(&self, message: &OutboundMessage) -> Result<String, SendError> {
        let reference = message
            .file_reference_value()
            .ok_or_else(|| SendError::invalid_request(SEND_FILE, "file reference not set"))?;

        let media_kind = MediaKind::from_reference(reference);
        let operation = media_kind.operation().ok_or_else(|| {
            SendError::unsupported_media(
                SEND_FILE,
                format!("unsupported file type: {}", file_name_from_reference(reference)),
            )
        })?;
        let file_name = file_name_from_reference(reference);

        let bytes = self.read_bytes(reference).await?;
        let url = upload_url(&self.endpoint, operation, message)?;

        info!(
            chat_id = %message.chat_id,
            method = operation,
            file_name = %file_name,
            size = bytes.len(),
            has_caption = message.text_value().is_some(),
            "step: file upload request"
        );

        let payload = FilePayload {
            bytes,
            file_name,
            media_kind,
        };
        self.transport
            .execute_post(url, RequestBody::Multipart(payload))
            .await
            .map_err(|e| SendError::from_transport(operation, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{query_pairs, MockHttpTransport, TEST_API_URL, TEST_TOKEN};
    use botapi_core::{ErrorKind, TransportError};
    use std::path::Path;

    fn sender(transport: MockHttpTransport) -> FileSender {
        let endpoint = ApiEndpoint::new(TEST_API_URL, TEST_TOKEN).unwrap();
        FileSender::new(endpoint, Arc::new(transport))
    }

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> String {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_local_photo_with_caption_posts_one_multipart_part() {
        let dir = tempfile::tempdir().unwrap();
        let reference = write_file(dir.path(), "photo.jpg", b"jpeg-bytes");

        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute_post()
            .times(1)
            .withf(|url, body| {
                url.path().ends_with("/sendPhoto")
                    && query_pairs(url)
                        == vec![
                            ("chat_id".to_string(), "123".to_string()),
                            ("caption".to_string(), "caption".to_string()),
                        ]
                    && *body
                        == RequestBody::Multipart(FilePayload {
                            bytes: b"jpeg-bytes".to_vec(),
                            file_name: "photo.jpg".to_string(),
                            media_kind: MediaKind::Photo,
                        })
            })
            .returning(|_, _| Ok(r#"{"ok":true,"result":{"message_id":5}}"#.to_string()));

        let message = OutboundMessage::file("123", reference).with_caption("caption");
        let raw = sender(transport).send(&message).await.unwrap();
        assert!(raw.contains("\"message_id\":5"));
    }

    #[tokio::test]
    async fn test_unsupported_extension_fails_before_reading() {
        // No expectations: any transport call panics.
        let transport = MockHttpTransport::new();
        let message = OutboundMessage::file("123", "https://example.com/report.PDF");
        let err = sender(transport).send(&message).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedMedia);
        assert!(err.detail().contains("unsupported file type"));
    }

    #[tokio::test]
    async fn test_missing_reference_is_invalid_request() {
        let transport = MockHttpTransport::new();
        let message = OutboundMessage::text("123", "no file here");
        let err = sender(transport).send(&message).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.detail(), "file reference not set");
    }

    #[tokio::test]
    async fn test_missing_local_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("gone.png");
        let transport = MockHttpTransport::new();
        let message = OutboundMessage::file("123", reference.to_str().unwrap());
        let err = sender(transport).send(&message).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileUnavailable);
        assert!(err.detail().starts_with("failed to retrieve file bytes"));
    }

    #[tokio::test]
    async fn test_remote_video_is_downloaded_then_sent_as_video() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_fetch_bytes()
            .times(1)
            .withf(|url| url.as_str() == "https://cdn.example.com/clips/clip.MP4?sig=abc")
            .returning(|_| Ok(b"mp4-bytes".to_vec()));
        transport
            .expect_execute_post()
            .times(1)
            .withf(|url, body| {
                url.path().ends_with("/sendVideo")
                    && query_pairs(url) == vec![("chat_id".to_string(), "-100".to_string())]
                    && matches!(
                        body,
                        RequestBody::Multipart(p)
                            if p.file_name == "clip.MP4" && p.media_kind == MediaKind::Video
                    )
            })
            .returning(|_, _| Ok(r#"{"ok":true}"#.to_string()));

        let message = OutboundMessage::file("-100", "https://cdn.example.com/clips/clip.MP4?sig=abc");
        sender(transport).send(&message).await.unwrap();
    }

    #[tokio::test]
    async fn test_download_failure_is_unavailable_and_skips_upload() {
        let mut transport = MockHttpTransport::new();
        transport.expect_fetch_bytes().times(1).returning(|_| {
            Err(TransportError::Status {
                status: 404,
                body: String::new(),
            })
        });

        let message = OutboundMessage::file("1", "https://cdn.example.com/a.png");
        let err = sender(transport).send(&message).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileUnavailable);
        assert!(err.detail().contains("404"));
    }

    #[tokio::test]
    async fn test_audio_is_sent_via_send_audio() {
        let dir = tempfile::tempdir().unwrap();
        let reference = write_file(dir.path(), "song.wav", b"riff");

        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute_post()
            .times(1)
            .withf(|url, body| {
                url.path().ends_with("/sendAudio")
                    && matches!(body, RequestBody::Multipart(p) if p.media_kind == MediaKind::Audio)
            })
            .returning(|_, _| Ok(r#"{"ok":true}"#.to_string()));

        sender(transport)
            .send(&OutboundMessage::file("1", reference))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_failure_carries_media_operation() {
        let dir = tempfile::tempdir().unwrap();
        let reference = write_file(dir.path(), "photo.png", b"png");

        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute_post()
            .times(1)
            .returning(|_, _| Err(TransportError::Network("connection reset".to_string())));

        let err = sender(transport)
            .send(&OutboundMessage::file("1", reference))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.operation(), "sendPhoto");
    }

    #[test]
    fn test_upload_url_percent_encodes_caption() {
        let endpoint = ApiEndpoint::new(TEST_API_URL, TEST_TOKEN).unwrap();
        let message = OutboundMessage::file("123", "a.jpg").with_caption("a & b #1 ✓");
        let url = upload_url(&endpoint, "sendPhoto", &message).unwrap();
        let query = url.query().unwrap();
        assert!(!query.contains(" & "));
        assert!(!query.contains('#'));
        assert_eq!(
            query_pairs(&url),
            vec![
                ("chat_id".to_string(), "123".to_string()),
                ("caption".to_string(), "a & b #1 ✓".to_string()),
            ]
        );
    }
}
