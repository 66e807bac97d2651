//! Standard errors used by all functions in the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error collecting all possible failures of the Stark Bank client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout configured on the HTTP client, ...).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// Error returned by a Stark Bank API endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// The digital signature attached to some inbound content could not be validated,
    /// neither with the cached public key nor with a freshly fetched one.
    #[error("The provided digital signature and content do not match the Stark Bank public key")]
    InvalidSignature,
    /// The credential is not usable to sign requests.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
    /// A JSON payload could not be decoded into the requested resource.
    #[error("Error decoding JSON: {0}")]
    DecodeError(#[from] serde_json::Error),
    /// Failure inside the cryptographic backend.
    #[error("Cryptographic error: {0}")]
    CryptoError(#[from] openssl::error::ErrorStack),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl Error {
    /// Returns `true` if the server answered with a 404-class status.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ApiError(api_error) if api_error.status() == 404)
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Failure reported by the Stark Bank HTTP APIs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more validation failures on the submitted input.
    ///
    /// The caller can recover by correcting the input and sending the request again.
    InputErrors {
        /// HTTP status returned by the server.
        status: u16,
        /// Every failure reported by the server, in the order it was reported.
        errors: Vec<ErrorElement>,
    },
    /// Server-side fault. Safe to retry later, never retried automatically.
    InternalServerError {
        /// HTTP status returned by the server.
        status: u16,
        /// Raw response body, possibly empty.
        content: String,
    },
    /// The server returned a failure this client does not know how to interpret.
    UnknownError {
        /// HTTP status returned by the server.
        status: u16,
        /// Raw response body, reported verbatim.
        content: String,
    },
}

impl ApiError {
    /// HTTP status returned by the server.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InputErrors { status, .. }
            | ApiError::InternalServerError { status, .. }
            | ApiError::UnknownError { status, .. } => *status,
        }
    }

    /// Validation failures carried by this error. Empty for anything but `InputErrors`.
    pub fn errors(&self) -> &[ErrorElement] {
        match self {
            ApiError::InputErrors { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InputErrors { status, errors } => {
                write!(f, "Stark Bank input errors (HTTP {}):", status)?;
                for error in errors {
                    write!(f, "\n- {}", error)?;
                }
                Ok(())
            }
            ApiError::InternalServerError { status, .. } => write!(
                f,
                "Houston, we have a problem. Stark Bank internal server error (HTTP {})",
                status
            ),
            ApiError::UnknownError { status, content } => {
                write!(f, "Unknown Stark Bank error (HTTP {}): {}", status, content)
            }
        }
    }
}

/// Single validation failure reported by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorElement {
    /// Stable, machine readable identifier of the failure (e.g. `invalidAmount`).
    pub code: String,
    /// Human readable description of the failure.
    pub message: String,
}

impl fmt::Display for ErrorElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
