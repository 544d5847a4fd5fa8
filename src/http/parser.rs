//! Request parser.
//!
//! Pulls lines from a [`LineReader`] through a small state machine:
//!
//! ```text
//! StartLine ──▶ Headers ──┬──────────────▶ Done
//!                         └──▶ Body ──────▶ Done
//! ```
//!
//! A parser builds exactly one request. Calling [`RequestParser::parse`]
//! again once it reached `Done` is an error; pipelined requests are not
//! supported.

use std::collections::HashMap;

use tokio::io::AsyncRead;

use crate::http::error::{HttpError, HttpResult};
use crate::http::reader::LineReader;
use crate::http::request::{CONTENT_LENGTH, Request, parse_content_length};

const HEADER_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    StartLine,
    Headers,
    Body(usize),
    Done,
}

pub struct RequestParser {
    state: ParseState,
    protocol: String,
    headers: HashMap<String, String>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::StartLine,
            protocol: String::new(),
            headers: HashMap::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub async fn parse<R>(&mut self, reader: &mut LineReader<R>) -> HttpResult<Request>
    where
        R: AsyncRead + Unpin,
    {
        loop {
            match self.state {
                ParseState::StartLine => {
                    let line = reader.read_line().await?.ok_or_else(|| {
                        HttpError::invalid_request("stream closed before the start line")
                    })?;
                    self.protocol = line;
                    self.state = ParseState::Headers;
                }

                ParseState::Headers => {
                    let line = reader.read_line().await?.ok_or_else(|| {
                        HttpError::invalid_request("stream closed inside the header block")
                    })?;
                    if !line.is_empty() {
                        self.insert_header(line)?;
                        continue;
                    }
                    let declared = self
                        .headers
                        .get(CONTENT_LENGTH)
                        .map(|value| parse_content_length(value))
                        .transpose()?;
                    match declared {
                        Some(len) => self.state = ParseState::Body(len),
                        None => {
                            self.state = ParseState::Done;
                            return Ok(self.finish(None));
                        }
                    }
                }

                ParseState::Body(len) => {
                    let body = reader.read_body(len).await?;
                    self.state = ParseState::Done;
                    return Ok(self.finish(Some(body)));
                }

                ParseState::Done => {
                    return Err(HttpError::invalid_request(
                        "parser already produced its request",
                    ));
                }
            }
        }
    }

    fn insert_header(&mut self, line: String) -> HttpResult<()> {
        let (name, value) = line
            .split_once(HEADER_SEPARATOR)
            .ok_or_else(|| HttpError::MalformedHeader(line.clone()))?;
        self.headers.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn finish(&mut self, body: Option<Vec<u8>>) -> Request {
        Request {
            protocol: std::mem::take(&mut self.protocol),
            headers: std::mem::take(&mut self.headers),
            body,
        }
    }
}

/// Parses a single request from `reader` with a fresh parser.
pub async fn parse_request<R>(reader: &mut LineReader<R>) -> HttpResult<Request>
where
    R: AsyncRead + Unpin,
{
    RequestParser::new().parse(reader).await
}
