/*!
 * Error types for the Homelink SDK.
 *
 * This module defines the shared error type used across the Homelink crates.
 */
use thiserror::Error;

/// Error type for Homelink operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Host runtime error
    #[error("Host error: {0}")]
    Host(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// The host control API reported a non-OK status
    #[error("API error: {0}")]
    Api(String),

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Create a runtime error
    pub fn runtime<S: Into<String>>(message: S) -> Self {
        Error::Runtime(message.into())
    }

    /// Create a host error
    pub fn host<S: Into<String>>(message: S) -> Self {
        Error::Host(message.into())
    }

    /// Create an HTTP transport error
    pub fn http<S: Into<String>>(message: S) -> Self {
        Error::Http(message.into())
    }

    /// Create an API status error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Error::Api(message.into())
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Error::Serialization(message.into())
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Error::Timeout(message.into())
    }

    /// Create an other error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Error::Other(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Result type for Homelink operations
pub type Result<T> = std::result::Result<T, Error>;
