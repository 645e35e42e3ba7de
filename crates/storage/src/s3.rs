//! S3-backed object storage.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{check_key, public_url, ObjectStorage, StorageError};

/// Connection settings for [`S3ObjectStorage`].
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2). Enables
    /// path-style addressing.
    pub endpoint: Option<String>,
    /// Base for returned URLs. Defaults to the bucket's virtual-host URL.
    pub public_base_url: Option<String>,
}

impl S3Settings {
    fn base_url(&self) -> String {
        match &self.public_base_url {
            Some(base) => base.clone(),
            None => match &self.endpoint {
                Some(endpoint) => {
                    format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket)
                }
                None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
            },
        }
    }
}

/// Stores objects in one S3 bucket. Credentials come from the standard AWS
/// provider chain.
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    base_url: String,
}

impl S3ObjectStorage {
    pub async fn connect(settings: S3Settings) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        tracing::info!(bucket = %settings.bucket, region = %settings.region, "S3 storage configured");
        Self {
            client,
            base_url: settings.base_url(),
            bucket: settings.bucket,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        check_key(key)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("put_object {key}: {e}")))?;
        Ok(public_url(&self.base_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("delete_object {key}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> S3Settings {
        S3Settings {
            bucket: "site-uploads".into(),
            region: "eu-west-1".into(),
            endpoint: None,
            public_base_url: None,
        }
    }

    #[test]
    fn default_url_is_virtual_host() {
        assert_eq!(
            settings().base_url(),
            "https://site-uploads.s3.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn custom_endpoint_uses_path_style_url() {
        let s = S3Settings {
            endpoint: Some("http://localhost:9000/".into()),
            ..settings()
        };
        assert_eq!(s.base_url(), "http://localhost:9000/site-uploads");
    }

    #[test]
    fn explicit_public_base_wins() {
        let s = S3Settings {
            public_base_url: Some("https://cdn.example.com".into()),
            ..settings()
        };
        assert_eq!(s.base_url(), "https://cdn.example.com");
    }
}
