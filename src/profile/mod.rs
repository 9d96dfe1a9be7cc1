//! Shared profile state port

use tokio::sync::watch;

/// Narrow interface onto the externally-owned profile state
///
/// The controller depends only on this port: the authoritative
/// `avatar_path` field can be read, written, and watched regardless of
/// the state mechanism the host actually uses. Empty strings are
/// normalized by the controller, not by the port.
pub trait ProfileStatePort: Send + Sync {
    /// Returns the current avatar path, if any
    fn avatar_path(&self) -> Option<String>;

    /// Writes the avatar path; `None` clears the reference
    fn set_avatar_path(&self, value: Option<String>);

    /// Subscribes to avatar path changes
    ///
    /// The receiver holds the value current at subscription time and
    /// observes every later write.
    fn subscribe(&self) -> watch::Receiver<Option<String>>;
}

/// In-process profile state backed by a watch channel
///
/// Serves as the real store in hosts without their own state layer and
/// as the profile double in tests.
pub struct SharedProfileState {
    tx: watch::Sender<Option<String>>,
}

impl SharedProfileState {
    /// Creates profile state with no avatar set
    #[must_use]
    pub fn new() -> Self {
        Self::with_avatar_path(None)
    }

    /// Creates profile state holding the given avatar path
    #[must_use]
    pub fn with_avatar_path(value: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }
}

impl Default for SharedProfileState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStatePort for SharedProfileState {
    fn avatar_path(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    fn set_avatar_path(&self, value: Option<String>) {
        self.tx.send_replace(value);
    }

    fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_visible_to_reads() {
        let state = SharedProfileState::new();
        assert_eq!(state.avatar_path(), None);

        state.set_avatar_path(Some("https://store/x.jpg".to_string()));
        assert_eq!(state.avatar_path().as_deref(), Some("https://store/x.jpg"));

        state.set_avatar_path(None);
        assert_eq!(state.avatar_path(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let state = SharedProfileState::new();
        let mut rx = state.subscribe();
        assert_eq!(*rx.borrow_and_update(), None);

        state.set_avatar_path(Some("https://store/x.jpg".to_string()));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_deref(), Some("https://store/x.jpg"));
    }

    #[test]
    fn initial_value_is_observed_by_late_subscribers() {
        let state =
            SharedProfileState::with_avatar_path(Some("https://store/x.jpg".to_string()));
        let rx = state.subscribe();
        assert_eq!(rx.borrow().as_deref(), Some("https://store/x.jpg"));
    }
}
