//! HTTP object storage client for listing images.
//!
//! Speaks the Supabase-style storage REST API:
//! - upload: `POST {base}/storage/v1/object/{bucket}/{name}`
//! - public: `{base}/storage/v1/object/public/{bucket}/{name}`

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use tracing::{debug, warn};

use crate::common::UploadError;
use crate::kernel::BaseAssetStore;

#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl HttpObjectStore {
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self::with_client(Client::new(), base_url, bucket, service_key)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            service_key: service_key.into(),
        }
    }

    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(name)
        )
    }
}

impl std::fmt::Debug for HttpObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpObjectStore")
            .field("base_url", &self.base_url)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

/// Maps a non-success storage response to an upload error.
fn classify_failure(status: StatusCode, body: &str, name: &str) -> UploadError {
    // The storage API reports duplicates as 409, or as 400 with "Duplicate" in the body
    if status == StatusCode::CONFLICT
        || (status == StatusCode::BAD_REQUEST && body.contains("Duplicate"))
    {
        return UploadError::Conflict(name.to_string());
    }
    if status == StatusCode::PAYLOAD_TOO_LARGE || status == StatusCode::INSUFFICIENT_STORAGE {
        return UploadError::QuotaExceeded;
    }
    UploadError::Rejected {
        status: status.as_u16(),
        message: body.to_string(),
    }
}

#[async_trait]
impl BaseAssetStore for HttpObjectStore {
    async fn upload(
        &self,
        bytes: Bytes,
        proposed_name: &str,
        content_type: Option<&str>,
    ) -> Result<String, UploadError> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(proposed_name))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "false")
            .header(
                header::CONTENT_TYPE,
                content_type.unwrap_or("application/octet-stream"),
            )
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(name = %proposed_name, size, "Asset uploaded");
            return Ok(proposed_name.to_string());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(name = %proposed_name, status = %status, "Asset upload rejected");
        Err(classify_failure(status, &body, proposed_name))
    }

    fn public_url(&self, stored_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(stored_name)
        )
    }
}
