//! Transport double for unit tests. Unexpected calls panic, so a test that sets no
//! expectation for a method also asserts the method is never invoked.

use async_trait::async_trait;
use botapi_core::TransportError;
use reqwest::Url;

use crate::transport::{RequestBody, Transport};

mockall::mock! {
    pub HttpTransport {}

    #[async_trait]
    impl Transport for HttpTransport {
        async fn execute_get(&self, url: Url) -> Result<String, TransportError>;
        async fn execute_post(&self, url: Url, body: RequestBody) -> Result<String, TransportError>;
        async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>, TransportError>;
    }
}

pub const TEST_API_URL: &str = "https://api.telegram.org";
pub const TEST_TOKEN: &str = "123456:test-token";

/// Query pairs of `url` as owned strings, in order.
pub fn query_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn sent_message_body(message_id: i64) -> String {
    serde_json::json!({
        "ok": true,
        "result": {"message_id": message_id, "date": 1706529600, "chat": {"id": 123, "type": "private"}}
    })
    .to_string()
}
