//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A fresh, empty directory under the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "courier-test-{}-{}-{}",
        std::process::id(),
        name,
        n
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A response as a client reads it: status code, headers, and a body of
/// exactly `Content-Length` bytes (empty when the header is absent).
#[derive(Debug)]
pub struct ClientResponse {
    pub status_line: String,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub header_order: Vec<String>,
    pub body: Vec<u8>,
}

pub fn parse_response(raw: &[u8]) -> ClientResponse {
    let head_end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator");
    let head = std::str::from_utf8(&raw[..head_end]).expect("head is not utf-8");
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap().to_string();
    let status = status_line
        .split(' ')
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("bad status line");

    let mut headers = HashMap::new();
    let mut header_order = Vec::new();
    for line in lines {
        let (k, v) = line.split_once(": ").expect("bad header line");
        header_order.push(k.to_string());
        headers.insert(k.to_string(), v.to_string());
    }

    let rest = &raw[head_end + 4..];
    let len = headers
        .get("Content-Length")
        .map(|v| v.parse::<usize>().unwrap())
        .unwrap_or(0);
    assert!(rest.len() >= len, "body shorter than Content-Length");

    ClientResponse {
        status_line,
        status,
        headers,
        header_order,
        body: rest[..len].to_vec(),
    }
}

/// Collects formatted log output in memory.
///
/// Install with `tracing::subscriber::set_default` inside a current-thread
/// `#[tokio::test]` so spawned tasks log into the same buffer.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
