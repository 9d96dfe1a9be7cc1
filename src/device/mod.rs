//! Device asset access

use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default timeout for remote asset fetches
const FETCH_TIMEOUT_SECS: u64 = 30;
/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Errors that can occur while reading a picked asset
#[derive(Error, Debug)]
pub enum AssetReadError {
    /// The URI is not a usable asset locator
    #[error("unsupported asset URI {uri}: {reason}")]
    InvalidUri {
        /// The offending URI
        uri: String,
        /// Why the URI was rejected
        reason: String,
    },

    /// Reading a `file://` asset from disk failed
    #[error("failed to read local asset {uri}: {source}")]
    File {
        /// The asset URI
        uri: String,
        /// The underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Fetching an `http(s)://` asset failed
    #[error("failed to fetch asset {uri}: {source}")]
    Fetch {
        /// The asset URI
        uri: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },
}

/// Resolves picked asset URIs to their raw bytes
///
/// Pickers hand back device-local `file://` URIs in the common case,
/// but some platforms surface `http(s)://` locators instead; both are
/// supported, mirroring a platform fetch of the URI.
pub struct AssetReader {
    http_client: reqwest::Client,
}

impl AssetReader {
    /// Creates a new asset reader
    ///
    /// # Panics
    ///
    /// If the HTTP client fails to be created
    #[must_use]
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .build()
            .expect("Failed to create HTTP client");

        Self { http_client }
    }

    /// Reads the bytes of the asset at `uri`
    ///
    /// # Errors
    ///
    /// Returns `AssetReadError` if the URI is unsupported or the read
    /// fails
    pub async fn read(&self, uri: &str) -> Result<Vec<u8>, AssetReadError> {
        let parsed = Url::parse(uri).map_err(|e| AssetReadError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|()| AssetReadError::InvalidUri {
                        uri: uri.to_string(),
                        reason: "not a valid file path".to_string(),
                    })?;
                debug!("Reading local asset: {}", path.display());
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| AssetReadError::File {
                        uri: uri.to_string(),
                        source,
                    })
            }
            "http" | "https" => {
                debug!("Fetching remote asset: {}", uri);
                let response = self
                    .http_client
                    .get(parsed)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(|source| AssetReadError::Fetch {
                        uri: uri.to_string(),
                        source,
                    })?;
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|source| AssetReadError::Fetch {
                        uri: uri.to_string(),
                        source,
                    })?;
                Ok(bytes.to_vec())
            }
            other => Err(AssetReadError::InvalidUri {
                uri: uri.to_string(),
                reason: format!("unsupported scheme: {other}"),
            }),
        }
    }
}

impl Default for AssetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_file_uri_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset.jpg");
        tokio::fs::write(&path, b"jpeg bytes").await.unwrap();
        let uri = Url::from_file_path(&path).unwrap().to_string();

        let bytes = AssetReader::new().read(&uri).await.unwrap();
        assert_eq!(bytes, b"jpeg bytes");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = AssetReader::new()
            .read("file:///definitely/not/here.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, AssetReadError::File { .. }));
    }

    #[tokio::test]
    async fn rejects_unsupported_scheme() {
        let err = AssetReader::new()
            .read("content://media/external/images/1234")
            .await
            .unwrap_err();
        assert!(matches!(err, AssetReadError::InvalidUri { .. }));
    }

    #[tokio::test]
    async fn rejects_unparseable_uri() {
        let err = AssetReader::new().read("not a uri").await.unwrap_err();
        assert!(matches!(err, AssetReadError::InvalidUri { .. }));
    }
}
