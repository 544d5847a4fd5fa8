use std::collections::HashMap;

use crate::http::error::{HttpError, HttpResult};

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const USER_AGENT: &str = "User-Agent";

/// HTTP request methods the server recognises. Any other method token
/// routes to 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
}

/// A request as read off the wire.
///
/// `protocol` is the start line verbatim. Header names keep the case they
/// were received in and a repeated name keeps only its last value. `body` is
/// `Some` only when a `Content-Length` header was present and that many
/// bytes were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub protocol: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body and a matching `Content-Length` header.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.headers
            .insert(CONTENT_LENGTH.to_string(), body.len().to_string());
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let method = self.method.ok_or("method missing")?;
        let target = self.target.ok_or("target missing")?;
        Ok(Request {
            protocol: format!("{} {} HTTP/1.1", method.as_str(), target),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// The method token of the start line, if it is one we know.
    pub fn method(&self) -> Option<Method> {
        self.protocol
            .split_whitespace()
            .next()
            .and_then(Method::from_str)
    }

    /// The request-target: second whitespace-delimited token of the start line.
    pub fn target(&self) -> HttpResult<&str> {
        self.protocol.split_whitespace().nth(1).ok_or_else(|| {
            HttpError::invalid_request(format!(
                "start line has no request-target: {:?}",
                self.protocol
            ))
        })
    }

    /// Retrieves a header value by its exact, case-sensitive name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

pub fn parse_content_length(value: &str) -> HttpResult<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HttpError::InvalidContentLength(value.to_string()));
    }
    value
        .parse::<usize>()
        .map_err(|_| HttpError::InvalidContentLength(value.to_string()))
}
