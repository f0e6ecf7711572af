//! Error types for the epson-connect library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for epson-connect operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
/// None of the variants are recovered internally; a failed call is final,
/// but the session remains reusable afterwards.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors from the token exchange.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Errors reported by the Epson Connect API itself.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (base URL, upload URI, scan destinations).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The response body was non-empty but not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failed to read a file queued for upload.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication errors, raised only by the token exchange.
///
/// Either the server rejected the grant outright (its response carried an
/// `error` field), or the exchange itself failed and the underlying error
/// is wrapped.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the password grant.
    #[error("token endpoint rejected the request: {error}")]
    Rejected { error: String },

    /// The token exchange failed before a grant could be evaluated.
    #[error("token exchange failed: {source}")]
    Exchange {
        #[source]
        source: Box<Error>,
    },
}

/// An error reported in an API response body.
///
/// The Epson Connect API signals failures through a `code` field in the
/// decoded response, independent of the HTTP status line.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code of the exchange.
    pub status: u16,
    /// Error code reported by the API.
    pub code: String,
    /// Human-readable message, when the API provides one.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: String, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} [{}]", self.status, self.code)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// The presigned upload URI could not be used.
    #[error("invalid upload URI '{value}': {reason}")]
    UploadUri { value: String, reason: String },

    /// File extension not accepted for printing.
    #[error("'{extension}' is not a valid printing extension")]
    Extension { extension: String },

    /// Scan destination alias name outside the accepted length.
    #[error("scan destination name must be 1-32 characters")]
    DestinationName,

    /// Scan destination address outside the accepted length.
    #[error("scan destination must be 4-544 characters")]
    Destination,

    /// Scan destination id is not known to this client.
    #[error("scan destination '{id}' is not yet registered")]
    UnknownDestination { id: String },

    /// A required credential was neither configured nor in the environment.
    #[error("{name} can not be empty")]
    MissingCredential { name: &'static str },
}
