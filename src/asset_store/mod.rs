//! Asset store gateway for avatar uploads

mod error;
mod s3;

use async_trait::async_trait;

pub use error::{StoreError, StoreResult};
pub use s3::S3AssetStore;

/// Key prefix under which user avatars are stored
const AVATAR_KEY_PREFIX: &str = "avatarsUsers";

/// Derives the store key for a picked asset from its local URI
///
/// The key is the URI's last path segment under the avatar prefix.
/// Collisions at a key resolve last-write-wins, which is acceptable
/// because picked URIs carry effectively unique filenames.
#[must_use]
pub fn avatar_key(local_uri: &str) -> String {
    let filename = local_uri.rsplit('/').next().unwrap_or(local_uri);
    format!("{AVATAR_KEY_PREFIX}/{filename}")
}

/// Write-only store for avatar assets
///
/// Removing an avatar only clears the reference and the remote object
/// stays in place, so no delete or list capability is required here.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Uploads `bytes` under `key` and returns a durable fetchable URL
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the transfer or the storage service fails
    async fn upload(&self, bytes: Vec<u8>, key: &str) -> StoreResult<String>;
}
