//! Session data passed explicitly to the client.
//!
//! The auth token lives here instead of any process-wide storage; each
//! view gets the session it was built with.

use shared::UserInfo;

/// Session data stored in memory during the client's lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for API authentication.
    pub token: Option<String>,
    /// Current user information after login.
    pub user: Option<UserInfo>,
}

impl Session {
    /// Creates a new anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from a token obtained elsewhere.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Sets the token and user info after successful login.
    pub fn set_login(&mut self, token: String, user: UserInfo) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Clears the session data on logout.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value, if signed in.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Returns the current user info if available.
    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }
}
