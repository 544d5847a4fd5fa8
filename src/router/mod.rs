//! Request routing.
//!
//! Dispatch is a lookup in [`ROUTES`], keyed by method and the first path
//! segment of the request-target. Adding a route means adding a table row
//! and a [`Route`] variant; [`Router::handle`] matches on every variant.
//!
//! | Method | Segment      | Route       |
//! |--------|--------------|-------------|
//! | GET    | *(empty)*    | `Root`      |
//! | GET    | `echo`       | `Echo`      |
//! | GET    | `user-agent` | `UserAgent` |
//! | GET    | `files`      | `ReadFile`  |
//! | POST   | `files`      | `WriteFile` |
//!
//! Everything else is 404.

pub mod files;
pub mod handlers;
pub mod target;

use crate::http::error::HttpResult;
use crate::http::request::{Method, Request};
use crate::router::files::FileStore;
use crate::router::handlers::Outcome;
use crate::router::target::Segments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Echo,
    UserAgent,
    ReadFile,
    WriteFile,
}

pub const ROUTES: &[(Method, &str, Route)] = &[
    (Method::GET, "", Route::Root),
    (Method::GET, "echo", Route::Echo),
    (Method::GET, "user-agent", Route::UserAgent),
    (Method::GET, "files", Route::ReadFile),
    (Method::POST, "files", Route::WriteFile),
];

/// Looks up the route for a method and first path segment.
pub fn resolve(method: Method, key: &str) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(m, k, _)| *m == method && *k == key)
        .map(|(_, _, route)| *route)
}

#[derive(Debug, Clone)]
pub struct Router {
    store: FileStore,
}

impl Router {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Routes one request.
    ///
    /// Fails only when the start line has no request-target or the
    /// filesystem errors; every unmatched combination is `NotFound`.
    pub async fn handle(&self, request: &Request) -> HttpResult<Outcome> {
        let target = request.target()?;
        let segments = Segments::parse(target);

        let route = match (request.method(), segments.key) {
            (Some(method), Some(key)) => resolve(method, key),
            _ => None,
        };

        tracing::debug!(request_target = %target, route = ?route, "Routing request");

        let Some(route) = route else {
            return Ok(Outcome::NotFound);
        };

        match route {
            Route::Root => Ok(handlers::root(&segments)),
            Route::Echo => Ok(handlers::echo(&segments)),
            Route::UserAgent => Ok(handlers::user_agent(request)),
            Route::ReadFile => handlers::read_file(&self.store, &segments).await,
            Route::WriteFile => handlers::write_file(&self.store, &segments, request).await,
        }
    }
}
