//! Device image picker capability

use async_trait::async_trait;
use thiserror::Error;

/// Media types the picker offers the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypes {
    /// Images and videos
    All,
    /// Still images only
    Images,
}

/// Parameters for a single pick request
#[derive(Debug, Clone, PartialEq)]
pub struct PickRequest {
    /// Media types offered by the picker
    pub media_types: MediaTypes,
    /// Whether the user may edit/crop the image before confirming
    pub allows_editing: bool,
    /// Fixed aspect ratio (width, height) applied during editing
    pub aspect: (u32, u32),
    /// Quality in `0.0..=1.0`, where `1.0` is full quality
    pub quality: f32,
}

impl PickRequest {
    /// The request used for avatar selection: any media type, user
    /// editing enabled, fixed 4:3 aspect, full quality
    #[must_use]
    pub const fn avatar() -> Self {
        Self {
            media_types: MediaTypes::All,
            allows_editing: true,
            aspect: (4, 3),
            quality: 1.0,
        }
    }
}

/// Outcome of a pick request
///
/// Cancellation is a first-class outcome, not an error: the user
/// backing out of the picker leaves all avatar state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user dismissed the picker without choosing an image
    Cancelled,
    /// The user confirmed an image
    Selected {
        /// Device-local resource locator for the chosen asset
        uri: String,
    },
}

/// Errors from the picker capability
#[derive(Error, Debug)]
pub enum PickerError {
    /// The picker cannot be presented (e.g. media-library permission denied)
    #[error("picker unavailable: {0}")]
    Unavailable(String),

    /// The picker was presented but failed to deliver a result
    #[error("picker failed: {0}")]
    Failed(String),
}

/// Device image selection capability
///
/// `pick_image` suspends for as long as the user interacts with the
/// picker UI; how that UI is presented is the hosting platform's
/// concern.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Presents the picker and resolves with the user's choice
    async fn pick_image(&self, request: &PickRequest) -> Result<PickOutcome, PickerError>;
}
