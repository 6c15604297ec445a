//! Error types for the todo synchronizer.
//!
//! # Design
//! `ApiError` keeps the three failure kinds distinct — transport, server,
//! decode — so the log sink and any presentation layer can tell them apart.
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status"; all other non-2xx responses land in `Http` with the raw status
//! code and body for debugging.
//!
//! `StartError` covers refusals that happen before any request is built, so
//! a refused operation is guaranteed to have had no network effect.

use thiserror::Error;

/// A remote operation failed. Local state is left unchanged apart from the
/// per-item error record.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (transport failure, reported by the host).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned 404 — the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Coarse classification used when reporting to the log sink.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::NotFound | ApiError::Http { .. } => "server",
            ApiError::Deserialization(_) | ApiError::Serialization(_) => "decode",
        }
    }
}

/// An operation was refused before any request was built.
#[derive(Debug, Error)]
pub enum StartError {
    /// No item with the given id exists in local state.
    #[error("no item with the given id")]
    UnknownItem,

    /// An operation for the same target is already outstanding.
    #[error("an operation for this target is already in flight")]
    InFlight,

    /// Commit was requested for an item that is not under edit.
    #[error("the item is not under edit")]
    NotEditing,

    /// The request payload could not be built.
    #[error(transparent)]
    Api(#[from] ApiError),
}
