//! Buffered line reader over a raw byte stream.
//!
//! Yields CRLF-delimited text lines for the start line and header block,
//! and switches to a raw mode for the fixed-length body, which may contain
//! any byte including `\n`.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::Instant;

use crate::http::deadline::with_deadline;
use crate::http::error::{HttpError, HttpResult};

const READ_CHUNK: usize = 4096;

pub const DEFAULT_MAX_HEAD_BYTES: usize = 8 * 1024;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Upper bounds on what one request may make the reader buffer.
///
/// The head limit covers the start line and header block including line
/// terminators. The body limit is checked against the declared length
/// before any body byte is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_head_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

pub struct LineReader<R> {
    inner: R,
    buffer: BytesMut,
    eof: bool,
    deadline: Option<Instant>,
    limits: Limits,
    head_read: usize,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_deadline(inner, None)
    }

    pub fn with_deadline(inner: R, deadline: Option<Instant>) -> Self {
        Self {
            inner,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            eof: false,
            deadline,
            limits: Limits::default(),
            head_read: 0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Reads the next line with its `\r\n` (or bare `\n`) terminator stripped.
    ///
    /// Returns `Ok(None)` only when the stream is exhausted and nothing is
    /// buffered. Bytes left over at end of stream without a terminator are
    /// returned as the final line. Fails with `InvalidRequest` once the lines
    /// read so far, or a pending unterminated line, exceed the head limit.
    pub async fn read_line(&mut self) -> HttpResult<Option<String>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                self.check_head(pos + 1)?;
                self.head_read += pos + 1;
                let raw = self.buffer.split_to(pos + 1);
                let mut line = &raw[..pos];
                if let Some(stripped) = line.strip_suffix(b"\r") {
                    line = stripped;
                }
                return Ok(Some(String::from_utf8_lossy(line).into_owned()));
            }

            self.check_head(self.buffer.len())?;

            if self.eof {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let rest = self.buffer.split();
                return Ok(Some(String::from_utf8_lossy(&rest).into_owned()));
            }

            self.fill().await?;
        }
    }

    /// Reads exactly `len` bytes, draining anything already buffered first.
    pub async fn read_body(&mut self, len: usize) -> HttpResult<Vec<u8>> {
        if len > self.limits.max_body_bytes {
            return Err(HttpError::invalid_request(format!(
                "declared body of {len} bytes exceeds the {} byte limit",
                self.limits.max_body_bytes
            )));
        }

        while self.buffer.len() < len {
            if self.eof {
                return Err(HttpError::TruncatedBody {
                    expected: len,
                    received: self.buffer.len(),
                });
            }
            self.fill().await?;
        }

        let mut body = vec![0u8; len];
        self.buffer.copy_to_slice(&mut body);
        Ok(body)
    }

    fn check_head(&self, pending: usize) -> HttpResult<()> {
        if self.head_read + pending > self.limits.max_head_bytes {
            return Err(HttpError::invalid_request(format!(
                "request head exceeds {} bytes",
                self.limits.max_head_bytes
            )));
        }
        Ok(())
    }

    async fn fill(&mut self) -> HttpResult<()> {
        self.buffer.reserve(READ_CHUNK);
        let n = with_deadline(self.deadline, self.inner.read_buf(&mut self.buffer)).await?;
        if n == 0 {
            self.eof = true;
        }
        Ok(())
    }
}
