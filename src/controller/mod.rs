//! Avatar lifecycle controller

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::asset_store::{avatar_key, AssetStore};
use crate::device::AssetReader;
use crate::picker::{ImagePicker, PickOutcome, PickRequest};
use crate::profile::ProfileStatePort;
use crate::types::AvatarResult;

/// Display state of the avatar slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarState {
    /// No image selected; the host shows an "add" affordance
    Empty,
    /// An image is selected; the host shows it plus a "remove" affordance
    Populated,
}

/// Result of a `pick_avatar` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickFlow {
    /// A new avatar was uploaded and committed
    Committed,
    /// The user dismissed the picker; nothing changed
    Cancelled,
    /// The flow aborted; prior state is intact and the failure was logged
    Failed,
}

/// Mediates between the device picker, the asset store, and shared
/// profile state
///
/// The controller owns the transient local selection: the reference the
/// hosting view should display right now. The selection mirrors the
/// profile's `avatar_path` after every sync but may briefly diverge
/// during an in-flight pick, when it optimistically holds the freshly
/// picked device URI.
pub struct AvatarController {
    profile: Arc<dyn ProfileStatePort>,
    picker: Arc<dyn ImagePicker>,
    store: Arc<dyn AssetStore>,
    assets: AssetReader,
    selection: watch::Sender<Option<String>>,
}

impl AvatarController {
    /// Creates a controller with an empty local selection
    #[must_use]
    pub fn new(
        profile: Arc<dyn ProfileStatePort>,
        picker: Arc<dyn ImagePicker>,
        store: Arc<dyn AssetStore>,
    ) -> Self {
        let (selection, _) = watch::channel(None);
        Self {
            profile,
            picker,
            store,
            assets: AssetReader::new(),
            selection,
        }
    }

    /// Returns a receiver over the reference the host should display
    #[must_use]
    pub fn display_source(&self) -> watch::Receiver<Option<String>> {
        self.selection.subscribe()
    }

    /// Returns the current local selection
    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.selection.borrow().clone()
    }

    /// Returns the current display state
    #[must_use]
    pub fn state(&self) -> AvatarState {
        if self.selection.borrow().is_some() {
            AvatarState::Populated
        } else {
            AvatarState::Empty
        }
    }

    /// Applies an externally-driven change of the profile avatar field
    ///
    /// Non-empty values become the local selection; `None` and empty
    /// strings clear it. Idempotent, and must also be applied for the
    /// value already present when the controller attaches, not just for
    /// deltas.
    pub fn on_external_avatar_change(&self, new_value: Option<&str>) {
        let next = new_value.filter(|v| !v.is_empty()).map(str::to_owned);
        self.selection.send_replace(next);
    }

    /// Mirrors profile avatar changes into the local selection until
    /// `shutdown` is cancelled or the profile state is dropped
    ///
    /// Reconciles with the value current at startup first, then with
    /// every later change, including the controller's own commits.
    pub async fn run(&self, shutdown: CancellationToken) {
        let mut changes = self.profile.subscribe();
        let current = changes.borrow_and_update().clone();
        self.on_external_avatar_change(current.as_deref());

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    info!("Avatar controller shutting down");
                    break;
                }
                changed = changes.changed() => {
                    if changed.is_err() {
                        debug!("Profile state dropped, stopping avatar sync");
                        break;
                    }
                    let value = changes.borrow_and_update().clone();
                    self.on_external_avatar_change(value.as_deref());
                }
            }
        }
    }

    /// Runs the pick → upload → commit flow
    ///
    /// Suspends while the user interacts with the picker and while the
    /// upload is in flight. Cancellation and failure both leave the
    /// local selection and the profile field exactly as they were;
    /// failures surface only as [`PickFlow::Failed`] after being
    /// logged.
    #[instrument(skip(self))]
    pub async fn pick_avatar(&self) -> PickFlow {
        match self.pick_and_commit().await {
            Ok(flow) => flow,
            Err(e) => {
                warn!("Avatar pick flow failed: {e}");
                PickFlow::Failed
            }
        }
    }

    async fn pick_and_commit(&self) -> AvatarResult<PickFlow> {
        let outcome = self.picker.pick_image(&PickRequest::avatar()).await?;

        let PickOutcome::Selected { uri } = outcome else {
            debug!("Avatar pick cancelled by user");
            return Ok(PickFlow::Cancelled);
        };

        let bytes = self.assets.read(&uri).await?;
        let key = avatar_key(&uri);
        debug!("Uploading picked avatar under key: {}", key);
        let remote_url = self.store.upload(bytes, &key).await?;

        // The profile field only ever holds a durable URL, so it is
        // written strictly after the upload resolves.
        self.profile.set_avatar_path(Some(remote_url.clone()));
        // Display the device-local copy immediately instead of waiting
        // on a refetch of the remote URL. The local URI can in principle
        // go stale (cache eviction) before the next profile sync
        // replaces it.
        self.selection.send_replace(Some(uri));

        info!("Avatar committed: {}", remote_url);
        Ok(PickFlow::Committed)
    }

    /// Clears the avatar reference locally and in the profile field
    ///
    /// The remote object stays in place; only the reference is dropped.
    /// No I/O, cannot fail.
    pub fn delete_avatar(&self) {
        self.selection.send_replace(None);
        self.profile.set_avatar_path(None);
        info!("Avatar reference cleared");
    }
}
