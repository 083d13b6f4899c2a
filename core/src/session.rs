//! Session controller: anonymous vs. authenticated.
//!
//! The server is authoritative; credentials travel as cookies held by the
//! HTTP client. This type only tracks which face of the UI to show. Logout
//! must also clear the cart and close the cart view, which the view-state
//! container enforces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    /// Successful login or startup probe.
    pub fn log_in(&mut self, user: User) {
        *self = Session::Authenticated(user);
    }

    /// Explicit logout. Idempotent.
    pub fn log_out(&mut self) {
        *self = Session::Anonymous;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = Session::default();
        session.log_in(user());
        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("reader"));

        session.log_out();
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut session = Session::default();
        session.log_out();
        assert_eq!(session, Session::Anonymous);
    }
}
