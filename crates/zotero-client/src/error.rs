//! Error types for Zotero API operations.

use crate::http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad caller input: empty required string, missing title.
    #[error("{message}")]
    Validation { message: String },

    /// The API answered with a non-2xx status.
    #[error("{operation} failed ({status}): {status_text}")]
    Remote {
        operation: String,
        status: u16,
        status_text: String,
    },

    /// Connect-phase failure wrapping the underlying transport or parse
    /// error. The rendered message includes the API key for diagnostics,
    /// so treat it as sensitive.
    #[error(
        "Connection failed - API key: {api_key}, ID: {library_id}, type: {library_type}. {source}"
    )]
    Connection {
        api_key: String,
        library_id: String,
        library_type: &'static str,
        source: HttpError,
    },

    /// A creation response did not match any recognized shape.
    #[error("API did not return a valid created record")]
    MalformedResponse,

    /// Transport-level failure outside the connect phase.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}
