//! HTTP client for the remote store API.
//!
//! One client instance lives for the whole session. It keeps an in-process
//! cookie store so the session cookie set by `/api/auth/login` rides along
//! on later requests, which is how the profile probe works.

use reqwest::StatusCode;

use crate::api::{Envelope, LoginResponse};
use crate::catalog::Book;
use crate::error::ApiError;
use crate::session::User;

const BODY_PREVIEW_LIMIT: usize = 512;

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    if trimmed.len() <= BODY_PREVIEW_LIMIT {
        return trimmed.to_string();
    }
    let mut cut = BODY_PREVIEW_LIMIT;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut out = trimmed[..cut].to_string();
    out.push_str("...");
    out
}

#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    // Pre-built endpoint URLs, normalized once at construction
    url_books: String,
    url_profile: String,
    url_login: String,
}

impl StoreClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .cookie_store(true)
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            url_books: format!("{normalized}/api/books"),
            url_profile: format!("{normalized}/api/customers/profile"),
            url_login: format!("{normalized}/api/auth/login"),
        })
    }

    /// `GET /api/books`: the full catalog, all-or-nothing.
    pub async fn fetch_books(&self) -> Result<Vec<Book>, ApiError> {
        let url = &self.url_books;
        tracing::debug!(target: "bookstall.api", stage = "books.in", url = %url);
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: preview_body(&body),
            });
        }
        let env = resp
            .json::<Envelope<Vec<Book>>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(
            target: "bookstall.api",
            stage = "books.out",
            status = %status,
            count = env.data.len()
        );
        Ok(env.data)
    }

    /// `GET /api/customers/profile`: asks whether the ambient cookie still
    /// identifies a user. Callers downgrade any error to anonymous.
    pub async fn probe_session(&self) -> Result<User, ApiError> {
        let url = &self.url_profile;
        tracing::debug!(target: "bookstall.api", stage = "profile.in", url = %url);
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: preview_body(&body),
            });
        }
        let env = resp
            .json::<Envelope<User>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(
            target: "bookstall.api",
            stage = "profile.out",
            status = %status,
            username = %env.data.username
        );
        Ok(env.data)
    }

    /// `POST /api/auth/login` with form-encoded credentials. A 401 maps to
    /// [`ApiError::InvalidCredentials`] carrying the server message when one
    /// is present; a 2xx body with `success: false` maps to
    /// [`ApiError::Rejected`] with the body message verbatim.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let url = &self.url_login;
        tracing::debug!(target: "bookstall.api", stage = "login.in", url = %url, username = %username);
        let resp = self
            .http
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            let message = resp
                .json::<LoginResponse>()
                .await
                .ok()
                .map(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Invalid username or password".to_string());
            tracing::debug!(target: "bookstall.api", stage = "login.out", status = %status);
            return Err(ApiError::InvalidCredentials(message));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: preview_body(&body),
            });
        }

        let body = resp
            .json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(
            target: "bookstall.api",
            stage = "login.out",
            status = %status,
            success = body.success
        );
        if !body.success {
            return Err(ApiError::Rejected(body.message));
        }
        body.data
            .ok_or_else(|| ApiError::Decode("login response missing user data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const TIMEOUT_MS: u64 = 1_000;

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = StoreClient::new("http://localhost:8080/", TIMEOUT_MS).unwrap();
        assert_eq!(client.url_books, "http://localhost:8080/api/books");
        assert_eq!(client.url_login, "http://localhost:8080/api/auth/login");
    }

    #[tokio::test]
    async fn test_fetch_books_decodes_envelope() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/books")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [{"id": 1, "title": "A", "description": "d",
                    "price": 10.0, "stockQuantity": 2}]}"#,
            )
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let books = client.fetch_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "A");
        assert_eq!(books[0].stock_quantity, 2);
    }

    #[tokio::test]
    async fn test_fetch_books_server_error_is_typed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/books")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let err = client.fetch_books().await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_books_retry_reissues_same_get() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/books")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": []}"#)
            .expect(2)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        client.fetch_books().await.unwrap();
        client.fetch_books().await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_session_returns_user() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/customers/profile")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"id": 5, "username": "reader", "email": "r@x.io"}}"#)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let user = client.probe_session().await.unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(user.username, "reader");
    }

    #[tokio::test]
    async fn test_probe_session_unauthenticated_is_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/customers/profile")
            .with_status(401)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        assert!(client.probe_session().await.is_err());
    }

    #[tokio::test]
    async fn test_login_success_sends_form_and_returns_user() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/login")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "reader".into()),
                Matcher::UrlEncoded("password".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "message": "ok",
                    "data": {"id": 5, "username": "reader", "email": "r@x.io"}}"#,
            )
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let user = client.login("reader", "secret").await.unwrap();
        assert_eq!(user.username, "reader");
    }

    #[tokio::test]
    async fn test_login_401_carries_server_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "message": "account locked"}"#)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let err = client.login("reader", "nope").await.unwrap_err();
        match err {
            ApiError::InvalidCredentials(msg) => assert_eq!(msg, "account locked"),
            other => panic!("expected invalid credentials, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_401_without_body_uses_default_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/login")
            .with_status(401)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let err = client.login("reader", "nope").await.unwrap_err();
        match err {
            ApiError::InvalidCredentials(msg) => {
                assert_eq!(msg, "Invalid username or password");
            }
            other => panic!("expected invalid credentials, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_rejected_surfaces_body_message_verbatim() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "message": "bad creds"}"#)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), TIMEOUT_MS).unwrap();
        let err = client.login("reader", "nope").await.unwrap_err();
        match err {
            ApiError::Rejected(msg) => assert_eq!(msg, "bad creds"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
