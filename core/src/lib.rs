//! Client-side state synchronizer for a remote todo collection.
//!
//! # Overview
//! Owns an in-memory ordered list of todo items and mirrors every mutation to
//! a remote collection resource over HTTP, using the server's response as the
//! authoritative state for the affected item. The presentation layer drives
//! it through typed intents and receives explicit outcomes back; nothing here
//! renders anything.
//!
//! # Design
//! - Host-does-IO: the core builds `HttpRequest` values and consumes
//!   `HttpResponse` values as plain data, never touching the network itself.
//!   Every failure mode is simulatable in a unit test.
//! - Each operation performs exactly one remote call, started by a `start_*`
//!   method and settled by `Synchronizer::complete` in response-arrival
//!   order.
//! - The collection endpoint URL is injected at construction; there is no
//!   module-level configuration.
//! - Failures are distinguished as transport / server / decode, recorded
//!   against the affected item, reported through `tracing`, and returned to
//!   the caller. No retries, no merge on update — the server wins.

pub mod client;
pub mod error;
pub mod http;
pub mod state;
pub mod sync;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, StartError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use state::ClientState;
pub use sync::{Applied, Dispatched, Intent, PendingOp, Synchronizer};
pub use types::{CreateTodo, Todo, UpdateTodo};
