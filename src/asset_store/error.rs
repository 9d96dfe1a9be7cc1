//! Error types for asset store operations

use aws_sdk_s3::{error::SdkError, operation::put_object::PutObjectError};
use thiserror::Error;

/// Result type for asset store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while storing an asset
#[derive(Error, Debug)]
pub enum StoreError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl From<SdkError<PutObjectError>> for StoreError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match &error {
            SdkError::ServiceError(service_err)
                if service_err.raw().status().as_u16() >= 500 =>
            {
                Self::UpstreamError(format!("{service_err:?}"))
            }
            _ => Self::S3Error(error.to_string()),
        }
    }
}
