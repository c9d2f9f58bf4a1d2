//! Registry of live sessions.
//!
//! [`SessionRegistry`] maps [`SessionId`]s to their [`Session`] handles. It
//! is owned by the connection manager, which in turn is owned by the single
//! dispatcher task, so the map is only ever touched from one place and needs
//! no locking.

use std::collections::HashMap;

use super::{Session, SessionId};
use crate::error::ConsoleError;

/// Explicit store for all live sessions.
///
/// Created at startup, dropped at shutdown. Dropping the registry drops every
/// session's outbound queue, which makes each transport task close its socket.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Internal`] if a session with the same ID is
    /// already registered (should never happen with UUID v4).
    pub fn insert(&mut self, session: Session) -> Result<SessionId, ConsoleError> {
        let id = session.id();
        if self.sessions.contains_key(&id) {
            return Err(ConsoleError::Internal(format!(
                "session {id} already registered"
            )));
        }
        self.sessions.insert(id, session);
        Ok(id)
    }

    /// Returns a mutable handle to a live session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SessionNotFound`] if the session is not (or no
    /// longer) registered.
    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut Session, ConsoleError> {
        self.sessions
            .get_mut(&id)
            .ok_or(ConsoleError::SessionNotFound(id))
    }

    /// Deregisters a session and returns it in the `Disconnected` state.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SessionNotFound`] if the session is not
    /// registered.
    pub fn remove(&mut self, id: SessionId) -> Result<Session, ConsoleError> {
        let mut session = self
            .sessions
            .remove(&id)
            .ok_or(ConsoleError::SessionNotFound(id))?;
        session.mark_disconnected();
        Ok(session)
    }

    /// Returns `true` if the session is registered.
    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no session is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
