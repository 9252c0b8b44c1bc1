use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::session::{Session, SessionStore, SessionUser};
use crate::modules::api::CivicApi;

/// Google sign-in and logout, bound to the process-wide session store.
pub struct AuthService {
    api: Arc<dyn CivicApi>,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<dyn CivicApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Exchange a Google ID token for a backend session. On success the
    /// session is persisted and subscribers see `SignedIn`.
    pub async fn login_with_google(&self, id_token: &str) -> Result<SessionUser> {
        let response = self.api.google_login(id_token).await.map_err(|e| {
            tracing::error!("Google login failed: {}", e);
            AppError::Auth("Login failed. Please try again.".to_string())
        })?;

        let user = response.user.clone();
        self.session.sign_in(Session {
            token: response.token,
            user: response.user,
        })?;
        tracing::info!("Signed in as {}", user.email);

        Ok(user)
    }

    /// Logout is local: clear the persisted session and notify subscribers.
    pub fn logout(&self) -> Result<()> {
        self.session.sign_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionEvent;
    use crate::shared::test_helpers::MockApi;

    #[tokio::test]
    async fn login_persists_session_and_notifies() {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(SessionStore::in_memory());
        let mut rx = session.subscribe();

        let auth = AuthService::new(api, session.clone());
        let user = auth.login_with_google("google-id-token").await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().id, user.id);
        assert!(session.token().is_some());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SessionEvent::SignedIn);

        auth.logout().unwrap();
        assert!(!session.is_authenticated());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn login_failure_surfaces_as_auth_error() {
        let api = Arc::new(MockApi::new());
        api.fail_next_login();
        let session = Arc::new(SessionStore::in_memory());

        let auth = AuthService::new(api, session.clone());
        let result = auth.login_with_google("bad-token").await;

        match result {
            Err(AppError::Auth(message)) => {
                assert_eq!(message, "Login failed. Please try again.")
            }
            other => panic!("expected auth error, got {:?}", other.map(|u| u.id)),
        }
        assert!(!session.is_authenticated());
    }
}
