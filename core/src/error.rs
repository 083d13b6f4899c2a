use thiserror::Error;

/// Failures talking to the store API.
///
/// Login failures are split out so the UI can word them differently:
/// `InvalidCredentials` is an HTTP 401, `Rejected` is a 2xx body with
/// `success: false`. Both carry the server message when one was sent.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show inline in the login form.
    pub fn login_message(&self) -> String {
        match self {
            ApiError::InvalidCredentials(msg) | ApiError::Rejected(msg) => msg.clone(),
            _ => "Login failed. Please try again.".to_string(),
        }
    }
}
