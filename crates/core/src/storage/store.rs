//! The blob store trait and its OpenDAL implementation.

use bytes::Bytes;
use opendal::{services, ErrorKind, Operator};

use super::config::StorageProvider;
use super::error::StorageError;

/// Opaque blob storage collaborator.
///
/// `put` is idempotent-on-overwrite: re-uploading the same name replaces
/// content, with the store's native last-write-wins semantics for
/// concurrent writers. The store is the sole system of record; callers
/// check `exists` once before first use of a container, not before every
/// write.
pub trait BlobStore: Send + Sync {
    /// Store bytes under a blob name within a container, overwriting any
    /// existing blob of the same name.
    fn put(
        &self,
        container: &str,
        blob_name: &str,
        bytes: Bytes,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Check whether a container exists.
    fn exists(
        &self,
        container: &str,
    ) -> impl std::future::Future<Output = Result<bool, StorageError>> + Send;

    /// Create a container, succeeding if it already exists.
    fn create_container(
        &self,
        container: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

/// Vendor-agnostic [`BlobStore`] over an OpenDAL operator.
///
/// Containers map to top-level directories under the operator root.
#[derive(Debug, Clone)]
pub struct OpendalBlobStore {
    operator: Operator,
    provider_name: &'static str,
}

impl OpendalBlobStore {
    /// Create a blob store from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        let operator = create_operator(provider)?;
        Ok(Self {
            operator,
            provider_name: provider.name(),
        })
    }

    /// Get the provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }
}

impl BlobStore for OpendalBlobStore {
    async fn put(
        &self,
        container: &str,
        blob_name: &str,
        bytes: Bytes,
    ) -> Result<(), StorageError> {
        self.operator
            .write(&blob_key(container, blob_name), bytes)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    async fn exists(&self, container: &str) -> Result<bool, StorageError> {
        match self.operator.stat(&container_key(container)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    async fn create_container(&self, container: &str) -> Result<(), StorageError> {
        self.operator
            .create_dir(&container_key(container))
            .await
            .map_err(StorageError::from)
    }
}

/// Create OpenDAL operator from provider config.
fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
    match provider {
        StorageProvider::S3 {
            endpoint,
            bucket,
            access_key_id,
            secret_access_key,
            region,
        } => {
            let builder = services::S3::default()
                .endpoint(endpoint)
                .bucket(bucket)
                .access_key_id(access_key_id)
                .secret_access_key(secret_access_key)
                .region(region);

            Ok(Operator::new(builder)
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish())
        }
        StorageProvider::AzureBlob {
            account,
            access_key,
            container,
        } => {
            let builder = services::Azblob::default()
                .account_name(account)
                .account_key(access_key)
                .container(container);

            Ok(Operator::new(builder)
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish())
        }
        StorageProvider::LocalFs { root } => {
            let builder = services::Fs::default().root(
                root.to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?,
            );

            Ok(Operator::new(builder)
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish())
        }
    }
}

fn container_key(container: &str) -> String {
    format!("{container}/")
}

fn blob_key(container: &str, blob_name: &str) -> String {
    format!("{container}/{blob_name}")
}
