use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use crate::http::deadline::with_deadline;
use crate::http::error::{HttpError, HttpResult};
use crate::http::response::{Body, Response};

const CRLF: &[u8] = b"\r\n";

/// Serializes everything that goes through the line-oriented path:
/// status line, headers, the blank line, and a text body followed by CRLF.
///
/// Binary bodies are not included; see [`ResponseWriter`].
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.extend_from_slice(resp.status.status_line().as_bytes());
    buf.extend_from_slice(CRLF);

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(CRLF);
    }

    // Header/body separator
    buf.extend_from_slice(CRLF);

    if let Body::Text(text) = &resp.body {
        if !text.is_empty() {
            buf.extend_from_slice(text.as_bytes());
            buf.extend_from_slice(CRLF);
        }
    }

    buf
}

/// Every byte that [`ResponseWriter`] puts on the wire, in order.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = serialize_head(resp);
    if let Body::Binary(bytes) = &resp.body {
        buf.extend_from_slice(bytes);
    }
    buf
}

/// Writes one response as two segments: the serialized head, then the raw
/// binary body if any. Partial writes are resumed.
pub struct ResponseWriter {
    segments: Vec<Vec<u8>>,
    segment: usize,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let head = serialize_head(&response);
        let mut segments = vec![head];
        if let Body::Binary(bytes) = response.body {
            if !bytes.is_empty() {
                segments.push(bytes);
            }
        }
        Self {
            segments,
            segment: 0,
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(
        &mut self,
        stream: &mut W,
        deadline: Option<Instant>,
    ) -> HttpResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.segment < self.segments.len() {
            let current = &self.segments[self.segment];

            while self.written < current.len() {
                let n = with_deadline(deadline, stream.write(&current[self.written..])).await?;

                if n == 0 {
                    return Err(HttpError::Stream(std::io::Error::new(
                        std::io::ErrorKind::WriteZero,
                        "connection closed while writing",
                    )));
                }

                self.written += n;
            }

            self.segment += 1;
            self.written = 0;
        }

        with_deadline(deadline, stream.flush()).await
    }
}
