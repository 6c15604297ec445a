//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps the synchronizer deterministic and
//! easy to test: every failure mode, including transport errors, can be
//! simulated by handing back the corresponding value.
//!
//! All fields use owned types (`String`, `Vec`) so values carry no lifetime
//! concerns across the host boundary.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by the synchronizer's `start_*` methods. The host is responsible
/// for executing this request against the network and feeding the result
/// back via `Synchronizer::complete`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`. Any status is
/// acceptable here; non-2xx interpretation happens during parsing.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The request never completed at all (DNS failure, refused connection,
/// aborted stream). Produced by the host transport, never by the core.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);
