//! The synchronizer: local state mirrored to the remote collection.
//!
//! # Design
//! Every remote operation is split in two. A `start_*` method validates the
//! operation against local state, marks its target in flight, and returns a
//! `PendingOp` token together with the `HttpRequest` the host must execute.
//! `complete` consumes the token with the host's result and reconciles local
//! state from the server's response — the response is authoritative for every
//! field of the affected item (replace, not merge).
//!
//! State updates are applied in the order completions arrive, not the order
//! requests were issued. Operations on different items commute; a second
//! operation on an item that already has one outstanding is refused with
//! `StartError::InFlight`, which is the debounce policy for double-submission.
//!
//! Cancellation is a generation counter: `cancel_pending` invalidates every
//! outstanding token, and a completion carrying a stale generation is dropped
//! without touching state.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, StartError};
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::state::ClientState;
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// A user-interface action on a single list row, consumed by
/// [`Synchronizer::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Toggle { id: String },
    Delete { id: String },
    BeginEdit { id: String },
    CommitEdit { id: String },
}

/// What `dispatch` decided to do with an intent.
#[derive(Debug)]
pub enum Dispatched {
    /// A request must be executed by the host and fed back via `complete`.
    Request(PendingOp, HttpRequest),
    /// The intent was handled locally with no network effect.
    Local,
}

#[derive(Debug)]
enum Op {
    Load,
    Create,
    Delete { id: String },
    Toggle { id: String },
    CommitEdit { id: String },
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Op::Load => "load",
            Op::Create => "create",
            Op::Delete { .. } => "delete",
            Op::Toggle { .. } => "toggle",
            Op::CommitEdit { .. } => "commit_edit",
        }
    }

    /// The item this operation targets, if it targets one.
    fn target(&self) -> Option<&str> {
        match self {
            Op::Load | Op::Create => None,
            Op::Delete { id } | Op::Toggle { id } | Op::CommitEdit { id } => Some(id),
        }
    }
}

/// Token for one outstanding remote call. Consumed exactly once by
/// [`Synchronizer::complete`]; not cloneable, so a completion cannot be
/// applied twice.
#[derive(Debug)]
pub struct PendingOp {
    op: Op,
    generation: u64,
}

/// Successful reconciliation outcome, returned so the presentation layer can
/// decide what to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Loaded { count: usize },
    Created(Todo),
    Deleted { id: String },
    Toggled(Todo),
    EditCommitted(Todo),
    /// The completion belonged to a cancelled generation; state untouched.
    Stale,
}

/// Owns the [`ClientState`] and mirrors every mutation to the remote
/// collection through a [`TodoClient`].
#[derive(Debug)]
pub struct Synchronizer {
    client: TodoClient,
    state: ClientState,
    inflight_items: HashSet<String>,
    load_in_flight: bool,
    create_in_flight: bool,
    generation: u64,
}

impl Synchronizer {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            state: ClientState::default(),
            inflight_items: HashSet::new(),
            load_in_flight: false,
            create_in_flight: false,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Update the draft for the not-yet-created item. Pure local mutation.
    pub fn set_draft(&mut self, text: &str) {
        self.state.set_draft(text);
    }

    /// Update the working text of the item under edit. Pure local mutation.
    pub fn set_edit_buffer(&mut self, text: &str) {
        self.state.set_edit_buffer(text);
    }

    /// Enter edit mode for `id`, seeding the buffer from the item's current
    /// text. Beginning an edit on a new id silently abandons any unsaved
    /// edit on the previous one.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), StartError> {
        let seed = self
            .state
            .find(id)
            .ok_or(StartError::UnknownItem)?
            .text
            .clone();
        self.state.begin_edit(id, &seed);
        Ok(())
    }

    /// Request the full collection. On completion the local list is replaced
    /// wholesale with the server's sequence.
    pub fn start_load(&mut self) -> Result<(PendingOp, HttpRequest), StartError> {
        if self.load_in_flight {
            return Err(StartError::InFlight);
        }
        let request = self.client.build_list();
        self.load_in_flight = true;
        Ok((self.pending(Op::Load), request))
    }

    /// Submit the current draft as a new item. Returns `Ok(None)` without
    /// building a request when the draft is empty after trimming.
    pub fn start_create(&mut self) -> Result<Option<(PendingOp, HttpRequest)>, StartError> {
        if self.create_in_flight {
            return Err(StartError::InFlight);
        }
        let text = self.state.draft_text().trim().to_string();
        if text.is_empty() {
            return Ok(None);
        }
        let input = CreateTodo {
            text,
            completed: false,
        };
        let request = self.client.build_create(&input)?;
        self.create_in_flight = true;
        Ok(Some((self.pending(Op::Create), request)))
    }

    /// Request deletion of an existing item.
    pub fn start_delete(&mut self, id: &str) -> Result<(PendingOp, HttpRequest), StartError> {
        if self.state.find(id).is_none() {
            return Err(StartError::UnknownItem);
        }
        if self.inflight_items.contains(id) {
            return Err(StartError::InFlight);
        }
        let request = self.client.build_delete(id);
        self.inflight_items.insert(id.to_string());
        Ok((self.pending(Op::Delete { id: id.to_string() }), request))
    }

    /// Submit the inverse of the item's `completed` value, captured now, as
    /// a partial update.
    pub fn start_toggle(&mut self, id: &str) -> Result<(PendingOp, HttpRequest), StartError> {
        let current = self
            .state
            .find(id)
            .ok_or(StartError::UnknownItem)?
            .completed;
        if self.inflight_items.contains(id) {
            return Err(StartError::InFlight);
        }
        let input = UpdateTodo {
            text: None,
            completed: Some(!current),
        };
        let request = self.client.build_update(id, &input)?;
        self.inflight_items.insert(id.to_string());
        Ok((self.pending(Op::Toggle { id: id.to_string() }), request))
    }

    /// Submit the edit buffer as the item's new text. On completion the item
    /// is replaced and edit mode exited; on failure edit mode is kept so the
    /// user's draft survives.
    pub fn start_commit_edit(&mut self, id: &str) -> Result<(PendingOp, HttpRequest), StartError> {
        if self.state.editing_id() != Some(id) {
            return Err(StartError::NotEditing);
        }
        if self.inflight_items.contains(id) {
            return Err(StartError::InFlight);
        }
        let input = UpdateTodo {
            text: Some(self.state.edit_buffer().to_string()),
            completed: None,
        };
        let request = self.client.build_update(id, &input)?;
        self.inflight_items.insert(id.to_string());
        Ok((self.pending(Op::CommitEdit { id: id.to_string() }), request))
    }

    /// Data-driven entry point: map a typed row intent to the matching
    /// operation.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Dispatched, StartError> {
        match intent {
            Intent::Toggle { id } => self
                .start_toggle(&id)
                .map(|(pending, request)| Dispatched::Request(pending, request)),
            Intent::Delete { id } => self
                .start_delete(&id)
                .map(|(pending, request)| Dispatched::Request(pending, request)),
            Intent::CommitEdit { id } => self
                .start_commit_edit(&id)
                .map(|(pending, request)| Dispatched::Request(pending, request)),
            Intent::BeginEdit { id } => self.begin_edit(&id).map(|()| Dispatched::Local),
        }
    }

    /// Invalidate every outstanding operation, e.g. when the consuming view
    /// goes away. Completions for already-issued requests will be dropped as
    /// stale instead of mutating state that no longer has an owner.
    pub fn cancel_pending(&mut self) {
        self.generation += 1;
        self.load_in_flight = false;
        self.create_in_flight = false;
        self.inflight_items.clear();
    }

    /// Reconcile local state from the host's result for one operation.
    ///
    /// On any failure the affected state is left unchanged (the create draft
    /// and edit buffer included), the error is recorded against the target
    /// and reported to the log sink, and the caller gets it back to surface
    /// as it sees fit. No retry is attempted.
    pub fn complete(
        &mut self,
        pending: PendingOp,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Applied, ApiError> {
        if pending.generation != self.generation {
            debug!(op = pending.op.name(), "dropping completion from a cancelled generation");
            return Ok(Applied::Stale);
        }
        self.settle(&pending.op);

        let response = match result {
            Ok(response) => response,
            Err(TransportError(message)) => {
                return Err(self.fail(&pending.op, ApiError::Transport(message)))
            }
        };

        match pending.op {
            Op::Load => match self.client.parse_list(response) {
                Ok(items) => {
                    let count = items.len();
                    self.state.replace_items(items);
                    self.state.clear_collection_error();
                    Ok(Applied::Loaded { count })
                }
                Err(err) => Err(self.fail(&Op::Load, err)),
            },
            Op::Create => match self.client.parse_create(response) {
                Ok(todo) => {
                    self.state.push_item(todo.clone());
                    self.state.clear_draft();
                    self.state.clear_collection_error();
                    Ok(Applied::Created(todo))
                }
                // Draft is kept on failure so the user's input is not lost.
                Err(err) => Err(self.fail(&Op::Create, err)),
            },
            Op::Delete { id } => match self.client.parse_delete(response) {
                Ok(()) => {
                    self.state.remove_item(&id);
                    self.state.clear_item_error(&id);
                    Ok(Applied::Deleted { id })
                }
                Err(err) => Err(self.fail(&Op::Delete { id }, err)),
            },
            Op::Toggle { id } => match self.client.parse_update(response) {
                Ok(todo) => {
                    if !self.state.replace_item(todo.clone()) {
                        debug!(%id, "toggle response for an item no longer present locally");
                    }
                    self.state.clear_item_error(&id);
                    Ok(Applied::Toggled(todo))
                }
                Err(err) => Err(self.fail(&Op::Toggle { id }, err)),
            },
            Op::CommitEdit { id } => match self.client.parse_update(response) {
                Ok(todo) => {
                    if !self.state.replace_item(todo.clone()) {
                        debug!(%id, "commit response for an item no longer present locally");
                    }
                    // Only leave edit mode if this item still owns it; the
                    // user may have started editing another item meanwhile.
                    if self.state.editing_id() == Some(id.as_str()) {
                        self.state.clear_edit();
                    }
                    self.state.clear_item_error(&id);
                    Ok(Applied::EditCommitted(todo))
                }
                // Edit mode is kept on failure so the buffer survives.
                Err(err) => Err(self.fail(&Op::CommitEdit { id }, err)),
            },
        }
    }

    fn pending(&self, op: Op) -> PendingOp {
        PendingOp {
            op,
            generation: self.generation,
        }
    }

    fn settle(&mut self, op: &Op) {
        match op {
            Op::Load => self.load_in_flight = false,
            Op::Create => self.create_in_flight = false,
            Op::Delete { id } | Op::Toggle { id } | Op::CommitEdit { id } => {
                self.inflight_items.remove(id);
            }
        }
    }

    fn fail(&mut self, op: &Op, err: ApiError) -> ApiError {
        warn!(
            op = op.name(),
            kind = err.kind(),
            error = %err,
            "remote operation failed; local state unchanged"
        );
        match op.target() {
            Some(id) => self.state.set_item_error(id, err.to_string()),
            None => self.state.set_collection_error(err.to_string()),
        }
        err
    }
}
