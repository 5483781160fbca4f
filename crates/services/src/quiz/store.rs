use std::sync::Arc;

use tokio::sync::watch;

use quiz_core::model::{Session, TransitionError};

/// Single-writer container for the published session snapshot.
///
/// Every write replaces the whole snapshot under the channel lock and wakes
/// subscribers, so observers never see a half-applied transition.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::new());
        Self { tx: Arc::new(tx) }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Receiver that always yields the latest snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Run a transition against the current snapshot and publish its result.
    ///
    /// Subscribers are only notified when the transition succeeds.
    ///
    /// # Errors
    ///
    /// Returns the transition's error; the snapshot is unchanged in that case.
    pub fn transition<T>(
        &self,
        apply: impl FnOnce(&Session) -> Result<(Session, T), TransitionError>,
    ) -> Result<T, TransitionError> {
        // Overwritten by the closure, which `send_if_modified` always runs.
        let mut outcome = Err(TransitionError::NotLoading);
        self.tx.send_if_modified(|current| match apply(current) {
            Ok((next, value)) => {
                *current = next;
                outcome = Ok(value);
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        outcome
    }

    /// Replace the snapshot unconditionally and return the new one.
    pub fn replace_with(&self, build: impl FnOnce(&Session) -> Session) -> Session {
        let mut published = Session::new();
        self.tx.send_modify(|current| {
            *current = build(current);
            published = current.clone();
        });
        published
    }
}
