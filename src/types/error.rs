//! Error types for the avatar pick flow

use thiserror::Error;

use crate::asset_store::StoreError;
use crate::device::AssetReadError;
use crate::picker::PickerError;

/// Result type for the avatar pick flow
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Failures that can abort an avatar pick flow
///
/// User cancellation is not represented here: backing out of the picker
/// is a normal outcome of the flow, not an error. Every variant is
/// caught at the operation boundary and leaves prior state intact.
#[derive(Error, Debug)]
pub enum AvatarError {
    /// The device picker could not be presented or failed mid-flight
    #[error("image picker error: {0}")]
    Picker(#[from] PickerError),

    /// Reading the picked asset's bytes failed
    #[error("asset read error: {0}")]
    AssetRead(#[from] AssetReadError),

    /// Uploading the asset to the remote store failed
    #[error("avatar upload error: {0}")]
    Upload(#[from] StoreError),
}
