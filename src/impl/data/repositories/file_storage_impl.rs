use std::path::Path;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::{
        postgrest_datasource::RemoteSession,
        storage_datasource::{StorageDatasource, StorageDatasourceImpl},
    },
    domain::repositories::file_storage::FileStorage,
};

pub(crate) struct FileStorageImpl<DS = StorageDatasourceImpl>
where
    DS: StorageDatasource,
{
    datasource: DS,
}

impl FileStorageImpl {
    pub(crate) fn new(session: RemoteSession, bucket: &str) -> Self {
        Self {
            datasource: StorageDatasourceImpl::new(session, bucket),
        }
    }
}

#[async_trait]
impl<DS: StorageDatasource> FileStorage for FileStorageImpl<DS> {
    async fn upload_file(
        &self,
        local_path: &Path,
        remote_key: &str,
        content_type: &str,
    ) -> Result<String, ServerError> {
        tracing::debug!(local_path = %local_path.display(), remote_key, "uploading file");
        self.datasource
            .upload_file(local_path, remote_key, content_type)
            .await
    }
}
