use std::path::Path;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use super::postgrest_datasource::RemoteSession;
use crate::errors::{MissingAttachment, ReadError, RemoteRequestFailed, UploadFailed};

#[async_trait]
pub(crate) trait StorageDatasource: Send + Sync {
    async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        remote_key: &str,
        content_type: &str,
    ) -> Result<String, ServerError>;

    async fn upload_file(
        &self,
        local_path: &Path,
        remote_key: &str,
        content_type: &str,
    ) -> Result<String, ServerError> {
        if !tokio::fs::try_exists(local_path).await.unwrap_or(false) {
            return Err(MissingAttachment::new(&local_path.display().to_string()));
        }
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| ReadError::with_debug(&local_path.display().to_string(), &e))?;
        self.upload_bytes(bytes, remote_key, content_type).await
    }
}

/// Supabase Storage, one bucket.
pub(crate) struct StorageDatasourceImpl {
    session: RemoteSession,
    bucket: String,
}

impl StorageDatasourceImpl {
    pub(crate) fn new(session: RemoteSession, bucket: &str) -> Self {
        Self {
            session,
            bucket: bucket.to_string(),
        }
    }

    /// Each key segment is percent-encoded, so `#`, `?` or spaces stay part
    /// of the object name.
    fn object_url(&self, remote_key: &str) -> Result<reqwest::Url, ServerError> {
        let base = &self.session.base_url;
        let mut url = reqwest::Url::parse(base)
            .map_err(|e| RemoteRequestFailed::with_debug(base, &e))?;
        url.path_segments_mut()
            .map_err(|_| RemoteRequestFailed::new(base))?
            .pop_if_empty()
            .extend(["storage", "v1", "object", self.bucket.as_str()])
            .extend(remote_key.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl StorageDatasource for StorageDatasourceImpl {
    async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        remote_key: &str,
        content_type: &str,
    ) -> Result<String, ServerError> {
        let url = self.object_url(remote_key)?;
        let builder = self
            .session
            .client
            .post(url.clone())
            .header("x-upsert", "true")
            .header("Content-Type", content_type)
            .body(bytes);
        let response = self
            .session
            .authorize(builder)
            .send()
            .await
            .map_err(|e| RemoteRequestFailed::with_debug(url.as_str(), &e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadFailed::with_debug(
                &self.bucket,
                remote_key,
                &format!("HTTP {status}: {body}"),
            ));
        }
        Ok(remote_key.trim_start_matches('/').to_string())
    }
}
