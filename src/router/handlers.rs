//! Route handlers.
//!
//! Each handler turns a request into an [`Outcome`]; a missing file is an
//! outcome, filesystem failures are errors.

use crate::http::error::HttpResult;
use crate::http::request::{Request, USER_AGENT};
use crate::http::response::Response;
use crate::router::files::FileStore;
use crate::router::target::Segments;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Result of routing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 200 with no headers and no body.
    Ok,
    /// 200 with `Content-Type`, `Content-Length` and a text body.
    Text {
        content_type: &'static str,
        body: String,
    },
    /// 200 with `Content-Type`, `Content-Length` and raw bytes.
    Static {
        content_type: &'static str,
        bytes: Vec<u8>,
    },
    /// 201 with no headers and no body.
    Created,
    /// 404 with no headers and no body.
    NotFound,
}

impl Outcome {
    pub fn into_response(self) -> Response {
        match self {
            Outcome::Ok => Response::ok(),
            Outcome::Text { content_type, body } => Response::text(content_type, body),
            Outcome::Static {
                content_type,
                bytes,
            } => Response::binary(content_type, bytes),
            Outcome::Created => Response::created(),
            Outcome::NotFound => Response::not_found(),
        }
    }
}

pub fn root(segments: &Segments<'_>) -> Outcome {
    if segments.is_root() {
        Outcome::Ok
    } else {
        Outcome::NotFound
    }
}

pub fn echo(segments: &Segments<'_>) -> Outcome {
    Outcome::Text {
        content_type: TEXT_PLAIN,
        body: segments.rest_or_empty().to_string(),
    }
}

pub fn user_agent(request: &Request) -> Outcome {
    Outcome::Text {
        content_type: TEXT_PLAIN,
        body: request.header(USER_AGENT).unwrap_or_default().to_string(),
    }
}

pub async fn read_file(store: &FileStore, segments: &Segments<'_>) -> HttpResult<Outcome> {
    let Some(path) = store.resolve(segments.rest_or_empty()) else {
        return Ok(Outcome::NotFound);
    };

    match store.read(&path).await? {
        Some(bytes) => {
            tracing::debug!(path = %path.display(), size = bytes.len(), "Serving file");
            Ok(Outcome::Static {
                content_type: OCTET_STREAM,
                bytes,
            })
        }
        None => Ok(Outcome::NotFound),
    }
}

pub async fn write_file(
    store: &FileStore,
    segments: &Segments<'_>,
    request: &Request,
) -> HttpResult<Outcome> {
    let Some(path) = store.resolve(segments.rest_or_empty()) else {
        return Ok(Outcome::NotFound);
    };

    let body = request.body_bytes();
    store.write(&path, body).await?;
    tracing::debug!(path = %path.display(), size = body.len(), "Wrote file");
    Ok(Outcome::Created)
}
