//! HTTP/1.1 protocol layer.
//!
//! One request and one response per connection; no keep-alive, chunked
//! encoding or pipelining.
//!
//! # Architecture
//!
//! - **`reader`**: Buffers socket bytes into CRLF lines, plus a raw mode for bodies
//! - **`parser`**: Start line / header / body state machine producing a [`request::Request`]
//! - **`request`**: Request representation and start-line accessors
//! - **`response`**: Status codes, response bodies and the response builder
//! - **`writer`**: Wire serialization and the partial-write-safe response writer
//! - **`connection`**: Drives one socket through parse, route and respond
//! - **`deadline`**: Optional per-connection deadline on every read and write
//! - **`error`**: Errors that abort a connection
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │  Accepted   │
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │  Receiving  │ ← Parse the request, route it
//!        └──────┬──────┘
//!               ├─ error ──────────────┐
//!               ▼                      ▼
//!        ┌─────────────┐        ┌─────────────┐
//!        │ Responding  │─error─▶│   Failed    │
//!        └──────┬──────┘        └──────┬──────┘
//!               ▼                      │
//!        ┌─────────────┐               │
//!        │   Closed    │◀──────────────┘
//!        └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use courier::http::connection::Connection;
//! use courier::router::{Router, files::FileStore};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Router::new(FileStore::new("."));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, router, None).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod deadline;
pub mod error;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
