use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    /// Detected locally, never reaches the network.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Resolution(String),

    #[error("Network error: {0}")]
    Transport(#[from] blurtpay_network::NetworkError),

    /// Structured failure message from a backend, shown verbatim.
    #[error("{0}")]
    RemoteRejection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
