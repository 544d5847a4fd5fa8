use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a single connection.
///
/// None of these produce a response on the wire; the connection is closed
/// and the caller logs the error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Reading from or writing to the socket failed.
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),

    /// Header line without the `": "` separator.
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    /// The stream ended before `Content-Length` bytes arrived.
    #[error("body truncated: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },

    /// `Content-Length` is not a non-negative integer.
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The connection deadline expired during a read or write.
    #[error("connection deadline exceeded")]
    Timeout,

    /// Stat, read or write under the serving directory failed (not-found excluded).
    #[error("filesystem error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HttpError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        HttpError::InvalidRequest(reason.into())
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HttpError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;
