//! S3-compatible [`BlobStore`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use camwatch_core::error::CoreError;
use camwatch_core::media::BlobStore;

use crate::config::StorageConfig;
use crate::public_object_url;

/// Name reported by the static credentials provider.
const CREDENTIALS_PROVIDER: &str = "camwatch-storage-env";

pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    /// Build a client from static HMAC credentials. No network I/O happens here.
    pub async fn connect(config: &StorageConfig) -> Self {
        let creds = &config.credentials;
        let provider = Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(creds.region().to_string()))
            .endpoint_url(creds.endpoint())
            .credentials_provider(provider)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        tracing::info!(
            bucket = %config.bucket,
            endpoint = %creds.endpoint(),
            "Video storage client configured",
        );

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn exists(&self, key: &str) -> Result<bool, CoreError> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(CoreError::Internal(format!(
                "HeadObject {key} failed: {}",
                DisplayErrorContext(&err)
            ))),
        }
    }

    async fn make_public(&self, key: &str) -> Result<(), CoreError> {
        self.client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|err| {
                CoreError::Internal(format!(
                    "PutObjectAcl {key} failed: {}",
                    DisplayErrorContext(&err)
                ))
            })?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.public_base_url, &self.bucket, key)
    }
}
