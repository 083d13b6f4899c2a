//! Wire shapes for the store API.

use serde::{Deserialize, Serialize};

use crate::session::User;

/// Standard `{ "data": ... }` wrapper used by the catalog and profile
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Body of `POST /api/auth/login`, success and failure alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Book;

    #[test]
    fn test_envelope_of_books() {
        let json = r#"{"data": [{"id": 1, "title": "A", "price": 10, "stockQuantity": 2}]}"#;
        let env: Envelope<Vec<Book>> = serde_json::from_str(json).unwrap();
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.data[0].id, 1);
    }

    #[test]
    fn test_login_response_failure_shape() {
        let json = r#"{"success": false, "message": "bad creds"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message, "bad creds");
        assert!(resp.data.is_none());
    }
}
