use std::error::Error as _;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no server url registered for client `{interface}`")]
    Routing { interface: &'static str },

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("request argument to json: {0}")]
    Request(serde_json::Error),

    #[error("response json to return type: {0}")]
    Response(serde_json::Error),
}

/// Failures raised by a [`Transport`](crate::net::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request: {0}")]
    Http(reqwest::Error),

    #[error("server at {url} answered with status {status}")]
    Status { status: u16, url: String },

    /// The server could not be reached. [`HttpTransport`](crate::HttpTransport)
    /// reports refused or failed connects here; custom transports should too.
    #[error("connection: {0}")]
    Connection(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            let mut message = err.to_string();
            let mut cause = err.source();
            while let Some(inner) = cause {
                message.push_str(": ");
                message.push_str(&inner.to_string());
                cause = inner.source();
            }
            TransportError::Connection(message)
        } else {
            TransportError::Http(err)
        }
    }
}
