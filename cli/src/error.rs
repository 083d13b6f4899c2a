use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("startup failed: {0}")]
    Init(String),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("client error: {0}")]
    Client(#[from] bookstall_core::ApiError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
