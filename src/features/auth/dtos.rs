use serde::{Deserialize, Serialize};

use crate::core::session::SessionUser;

/// Body for `POST /auth/google`: the Google ID token obtained by the
/// OAuth widget.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}
