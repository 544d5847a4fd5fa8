//! Courier - a minimal HTTP/1.1 file and echo server
//!
//! Core library: request parsing, response serialization, routing and the
//! per-connection driver.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
