//! S3-backed asset store

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use tracing::debug;

use super::{AssetStore, StoreError, StoreResult};
use crate::types::Environment;

/// Asset store backed by an S3 bucket
///
/// Uploads are plain `PutObject` calls: last write wins at a key, with
/// no existence probe first.
pub struct S3AssetStore {
    client: S3Client,
    bucket_name: String,
    public_base_url: String,
}

impl S3AssetStore {
    /// Creates a new store from a pre-configured S3 client
    ///
    /// `public_base_url` is the base under which uploaded objects are
    /// fetchable; the durable URL for a key is `{base}/{key}`.
    #[must_use]
    pub fn new(client: S3Client, bucket_name: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket_name,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a new store configured from the given environment
    ///
    /// # Panics
    ///
    /// Panics if required bucket configuration is missing outside
    /// development (see [`Environment::s3_bucket`])
    pub async fn from_environment(environment: &Environment) -> Self {
        let client = S3Client::from_conf(environment.s3_client_config().await);
        Self::new(
            client,
            environment.s3_bucket(),
            environment.avatar_public_base_url(),
        )
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn upload(&self, bytes: Vec<u8>, key: &str) -> StoreResult<String> {
        debug!("Uploading {} bytes to key: {}", bytes.len(), key);

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type("application/octet-stream")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(StoreError::from)?;

        let url = self.object_url(key);
        debug!("Uploaded avatar object, fetchable at: {}", url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> S3AssetStore {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .build();
        S3AssetStore::new(
            S3Client::from_conf(config),
            "user-avatars".to_string(),
            base.to_string(),
        )
    }

    #[test]
    fn object_url_joins_base_and_key() {
        let s = store("https://media.example.com");
        assert_eq!(
            s.object_url("avatarsUsers/img1.jpg"),
            "https://media.example.com/avatarsUsers/img1.jpg"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let s = store("https://media.example.com/");
        assert_eq!(
            s.object_url("avatarsUsers/img1.jpg"),
            "https://media.example.com/avatarsUsers/img1.jpg"
        );
    }
}
