use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The client is not in a state that allows the operation, or its
    /// configuration is incomplete.
    #[error("configuration error : {0}")]
    Configuration(String),
    /// Connection or stream failure, or a status without a dedicated variant.
    #[error("transport failed : {0}")]
    Transport(#[from] reqwest::Error),
    /// HTTP 401, carrying the status text.
    #[error("OAuth authorization error : {0}")]
    Authorization(String),
    /// HTTP 400 rejecting the nonce/timestamp pair that was sent.
    #[error("invalid nonce or timestamp in an OAuth request : nonce {nonce}, timestamp {timestamp}")]
    Nonce { nonce: String, timestamp: String },
    /// HTTP 400 with any other body. The body is kept verbatim.
    #[error("bad OAuth request : {0}")]
    Request(String),
    #[error("response has malformed format: not found {key} in {body}")]
    MalformedTokenResponse { key: &'static str, body: String },
    #[error("unexpected HTTP status : {0}")]
    UnexpectedStatus(StatusCode),
}
