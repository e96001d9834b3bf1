use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::sink::DocumentSink;
use super::tree::Document;
use crate::core::error::{MetaError, MetaResult};

/// Uploads each document with an HTTP `PUT` to `<base>/<path>`.
///
/// Works against any object store or static host that accepts plain PUTs
/// (pre-authorised bucket endpoints, WebDAV).
pub struct HttpPutSink {
    client: Client,
    base_url: String,
}

impl HttpPutSink {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DocumentSink for HttpPutSink {
    async fn put(&self, path: &str, document: &Document) -> MetaResult<()> {
        let url = self.url_for(path);

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, document.content_type.as_str())
            .body(document.bytes.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetaError::UploadFailed {
                url,
                status: status.as_u16(),
            });
        }

        debug!("Uploaded: {} ({} bytes)", url, document.bytes.len());
        Ok(())
    }
}
