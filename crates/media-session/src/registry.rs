//! Session registry
//!
//! Owns the id space and the id-to-inbox map. Ids are monotonically
//! increasing and never reused for the registry's lifetime, so a stale id
//! can never address a newer session.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use imsmedia_config::AudioConfig;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::backend::{
    Backend, BackendKind, LocalBackend, LocalEngineSender, OffloadBackend, OffloadServiceSender,
};
use crate::callback::AudioSessionCallback;
use crate::error::{Result, SessionError};
use crate::events::{LocalEndpoint, MessageSender, SessionCommand, SessionMessage};
use crate::session::{AudioSession, SessionActor};

/// State shared between the registry and its session actors.
#[derive(Debug)]
pub(crate) struct RegistryShared {
    sessions: DashMap<u32, MessageSender>,
    next_session_id: AtomicU32,
}

impl RegistryShared {
    fn new() -> Self {
        Self { sessions: DashMap::new(), next_session_id: AtomicU32::new(1) }
    }

    fn next_id(&self) -> u32 {
        self.next_session_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Removes the session from the map. Called by the actor on any exit
    /// path, so removal is idempotent.
    pub(crate) fn deregister(&self, session_id: u32) {
        self.sessions.remove(&session_id);
    }
}

/// Creates sessions, hands out their ids, and routes close requests.
///
/// The registry is a plain value: clients hold it (or clone it) wherever
/// sessions are created, there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    shared: Arc<RegistryShared>,
    local_engine: LocalEngineSender,
    offload_service: OffloadServiceSender,
}

impl SessionRegistry {
    /// A registry bound to one local engine and one offload service. Which
    /// of the two a session uses is fixed per session at `open_session`.
    pub fn new(local_engine: LocalEngineSender, offload_service: OffloadServiceSender) -> Self {
        Self { shared: Arc::new(RegistryShared::new()), local_engine, offload_service }
    }

    /// Creates a session bound to `kind`, registers it, and enqueues the
    /// open. Returns immediately; the outcome arrives as
    /// `on_open_session_success` or `on_open_session_failure` on `callback`.
    pub fn open_session(
        &self,
        endpoint: LocalEndpoint,
        config: AudioConfig,
        kind: BackendKind,
        callback: Arc<dyn AudioSessionCallback>,
    ) -> AudioSession {
        let session_id = self.shared.next_id();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let backend = match kind {
            BackendKind::Local => {
                Backend::Local(LocalBackend::new(session_id, self.local_engine.clone(), inbox_tx.clone()))
            }
            BackendKind::Offload => Backend::Offload(OffloadBackend::new(
                session_id,
                self.offload_service.clone(),
                inbox_tx.clone(),
            )),
        };

        let session = AudioSession::new(session_id, inbox_tx.clone());
        self.shared.sessions.insert(session_id, inbox_tx.clone());

        let actor = SessionActor::new(
            session_id,
            backend,
            callback,
            session.clone(),
            inbox_rx,
            Arc::clone(&self.shared),
        );
        tokio::spawn(actor.run());

        info!(session_id, ?kind, "Opening media session");
        if inbox_tx.send(SessionMessage::Command(SessionCommand::Open { endpoint, config })).is_err()
        {
            warn!(session_id, "Session actor exited before the open was enqueued");
        }
        session
    }

    /// Deregisters the session and enqueues its close. The close runs after
    /// any commands already queued, including an open still in flight.
    pub fn close_session(&self, session: &AudioSession) -> Result<()> {
        let session_id = session.session_id();
        let (_, inbox) = self
            .shared
            .sessions
            .remove(&session_id)
            .ok_or(SessionError::SessionNotFound { session_id })?;

        debug!(session_id, "Closing media session");
        inbox
            .send(SessionMessage::Command(SessionCommand::Close))
            .map_err(|_| SessionError::SessionStopped { session_id })
    }

    /// True while the session is registered (opened and neither closed nor
    /// failed).
    pub fn contains(&self, session_id: u32) -> bool {
        self.shared.sessions.contains_key(&session_id)
    }

    pub fn session_count(&self) -> usize {
        self.shared.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SessionRegistry {
        let (local_tx, _local_rx) = mpsc::unbounded_channel();
        let (offload_tx, _offload_rx) = mpsc::unbounded_channel();
        SessionRegistry::new(local_tx, offload_tx)
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let shared = RegistryShared::new();
        let first = shared.next_id();
        let second = shared.next_id();
        assert!(second > first);

        shared.deregister(first);
        assert!(shared.next_id() > second);
    }

    #[tokio::test]
    async fn close_of_unknown_session_is_an_error() {
        let registry = registry();
        let (tx, _rx) = mpsc::unbounded_channel();
        let stranger = AudioSession::new(999, tx);

        assert!(matches!(
            registry.close_session(&stranger),
            Err(SessionError::SessionNotFound { session_id: 999 })
        ));
    }
}
