use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::core::config::SessionConfig;
use crate::core::error::Result;

/// Session-scoped user profile, loaded once at startup and not refetched
/// reactively within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Notification published to mounted components whenever the session changes,
/// so they re-check authentication synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Initialized,
    SignedIn,
    SignedOut,
    /// The backend rejected the token on a protected call; the UI should
    /// redirect to the login entry point.
    Expired,
}

/// Process-wide session context: the single owner of the persisted
/// token/user pair. Components read through `current()` and observe changes
/// through `subscribe()` instead of re-reading storage ad hoc.
pub struct SessionStore {
    path: Option<PathBuf>,
    inner: RwLock<Option<Session>>,
    events: watch::Sender<SessionEvent>,
}

impl SessionStore {
    /// Initialize from the persisted session file. A missing or unreadable
    /// file means signed out; it is not an error.
    pub fn load(config: &SessionConfig) -> Self {
        let session = match fs::read_to_string(&config.file) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Discarding unreadable session file: {}", e);
                    None
                }
            },
            Err(_) => None,
        };

        let (events, _) = watch::channel(SessionEvent::Initialized);

        Self {
            path: Some(config.file.clone()),
            inner: RwLock::new(session),
            events,
        }
    }

    /// Session store without persistence.
    pub fn in_memory() -> Self {
        let (events, _) = watch::channel(SessionEvent::Initialized);
        Self {
            path: None,
            inner: RwLock::new(None),
            events,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current().map(|s| s.user)
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Store a freshly authenticated session and notify subscribers.
    pub fn sign_in(&self, session: Session) -> Result<()> {
        self.persist(Some(&session))?;
        *self.inner.write().expect("session lock poisoned") = Some(session);
        let _ = self.events.send(SessionEvent::SignedIn);
        Ok(())
    }

    /// Clear the persisted session and notify subscribers.
    pub fn sign_out(&self) -> Result<()> {
        self.persist(None)?;
        *self.inner.write().expect("session lock poisoned") = None;
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    /// Drop the session after the backend rejected the token. Subscribers
    /// receive `Expired` and should route to login.
    pub fn mark_expired(&self) {
        if let Err(e) = self.persist(None) {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
        *self.inner.write().expect("session lock poisoned") = None;
        let _ = self.events.send(SessionEvent::Expired);
    }

    fn persist(&self, session: Option<&Session>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        match session {
            Some(session) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, serde_json::to_string_pretty(session)?)?;
            }
            None => {
                if path.exists() {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}
