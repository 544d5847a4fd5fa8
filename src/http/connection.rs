use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::time::Instant;

use crate::http::deadline::with_deadline;
use crate::http::error::{HttpError, HttpResult};
use crate::http::parser::RequestParser;
use crate::http::reader::{LineReader, Limits};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// One accepted socket, driven through exactly one request/response cycle.
pub struct Connection<S> {
    reader: LineReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    router: Router,
    deadline: Option<Instant>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Accepted,
    Receiving,
    Responding(ResponseWriter),
    Failed(HttpError),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite,
{
    pub fn new(stream: S, router: Router, deadline: Option<Instant>) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: LineReader::with_deadline(read_half, deadline),
            writer: write_half,
            router,
            deadline,
            state: ConnectionState::Accepted,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.reader = self.reader.with_limits(limits);
        self
    }

    /// Runs the connection to completion and closes the stream.
    ///
    /// The stream is shut down and dropped on every path, including parse,
    /// routing and write failures. The first failure is returned.
    pub async fn run(mut self) -> HttpResult<()> {
        let mut result = Ok(());

        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);
            self.state = match state {
                ConnectionState::Accepted => ConnectionState::Receiving,

                ConnectionState::Receiving => match self.receive().await {
                    Ok(response) => ConnectionState::Responding(ResponseWriter::new(response)),
                    Err(e) => ConnectionState::Failed(e),
                },

                ConnectionState::Responding(mut writer) => {
                    match writer.write_to_stream(&mut self.writer, self.deadline).await {
                        Ok(()) => ConnectionState::Closed,
                        Err(e) => ConnectionState::Failed(e),
                    }
                }

                ConnectionState::Failed(e) => {
                    result = Err(e);
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    // Best effort: the peer may already be gone.
                    let _ = with_deadline(self.deadline, self.writer.shutdown()).await;
                    break;
                }
            };
        }

        result
    }

    async fn receive(&mut self) -> HttpResult<Response> {
        let request = RequestParser::new().parse(&mut self.reader).await?;
        let outcome = self.router.handle(&request).await?;
        let response = outcome.into_response();

        tracing::info!(
            method = %request.method().map(|m| m.as_str()).unwrap_or("-"),
            target = %request.target().unwrap_or_default(),
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "Responding"
        );

        Ok(response)
    }
}
