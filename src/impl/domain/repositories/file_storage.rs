use std::path::Path;

use async_trait::async_trait;
use fractic_server_error::ServerError;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Uploads (overwriting) and returns the stored key.
    async fn upload_file(
        &self,
        local_path: &Path,
        remote_key: &str,
        content_type: &str,
    ) -> Result<String, ServerError>;
}
