//! Local client state mirrored against the remote collection.
//!
//! # Design
//! Fields are private and mutated only through the crate-internal methods the
//! synchronizer calls, so the invariants hold at every observable point:
//! at most one item is under edit, the edited id always exists in `items`,
//! and `items` never contains duplicate ids. Item order is server/append
//! order; nothing here sorts.

use std::collections::HashMap;

use crate::types::Todo;

/// In-memory UI state: the item list plus the two working buffers (draft for
/// the not-yet-created item, edit buffer for the item under inline edit) and
/// the transient per-item error records.
#[derive(Debug, Default)]
pub struct ClientState {
    items: Vec<Todo>,
    editing_id: Option<String>,
    edit_buffer: String,
    draft_text: String,
    item_errors: HashMap<String, String>,
    collection_error: Option<String>,
}

impl ClientState {
    /// Items in server/append order.
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Id of the item under inline edit, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// Working copy of the text for the item under edit.
    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Working copy of the text for the not-yet-created item.
    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    /// Message of the most recent failed operation on `id`, cleared by the
    /// next successful operation on that id.
    pub fn error_for(&self, id: &str) -> Option<&str> {
        self.item_errors.get(id).map(String::as_str)
    }

    /// Message of the most recent failed Load or Create, if not yet cleared.
    pub fn collection_error(&self) -> Option<&str> {
        self.collection_error.as_deref()
    }

    /// Replace the whole list with the server's sequence, preserving its
    /// order. Duplicate ids keep their first occurrence. Edit mode and error
    /// records tied to ids no longer present are dropped; no operation on a
    /// vanished id can ever run again to clear them.
    pub(crate) fn replace_items(&mut self, items: Vec<Todo>) {
        self.items.clear();
        for todo in items {
            if self.find(&todo.id).is_none() {
                self.items.push(todo);
            }
        }
        let editing_gone = self
            .editing_id
            .as_deref()
            .is_some_and(|id| self.find(id).is_none());
        if editing_gone {
            self.clear_edit();
        }
        let items = &self.items;
        self.item_errors.retain(|id, _| items.iter().any(|t| t.id == *id));
    }

    /// Append a server-created item. If the id somehow already exists the
    /// existing entry is replaced in place, keeping ids unique.
    pub(crate) fn push_item(&mut self, todo: Todo) {
        match self.items.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => *existing = todo,
            None => self.items.push(todo),
        }
    }

    /// Replace the item with a matching id wholesale. Returns `false` if no
    /// such item exists locally.
    pub(crate) fn replace_item(&mut self, todo: Todo) -> bool {
        match self.items.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => {
                *existing = todo;
                true
            }
            None => false,
        }
    }

    /// Remove the item with a matching id. Edit mode is dropped if it
    /// referenced the removed item. Returns `false` if no such item exists.
    pub(crate) fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        if self.editing_id.as_deref() == Some(id) {
            self.clear_edit();
        }
        self.items.len() < before
    }

    pub(crate) fn set_draft(&mut self, text: &str) {
        self.draft_text = text.to_string();
    }

    pub(crate) fn clear_draft(&mut self) {
        self.draft_text.clear();
    }

    /// Enter edit mode for `id`, seeding the buffer from the item's current
    /// text. Any previous unsaved edit is silently abandoned. The caller has
    /// already verified the id exists.
    pub(crate) fn begin_edit(&mut self, id: &str, seed: &str) {
        self.editing_id = Some(id.to_string());
        self.edit_buffer = seed.to_string();
    }

    pub(crate) fn set_edit_buffer(&mut self, text: &str) {
        self.edit_buffer = text.to_string();
    }

    pub(crate) fn clear_edit(&mut self) {
        self.editing_id = None;
        self.edit_buffer.clear();
    }

    pub(crate) fn set_item_error(&mut self, id: &str, message: String) {
        self.item_errors.insert(id.to_string(), message);
    }

    pub(crate) fn clear_item_error(&mut self, id: &str) {
        self.item_errors.remove(id);
    }

    pub(crate) fn set_collection_error(&mut self, message: String) {
        self.collection_error = Some(message);
    }

    pub(crate) fn clear_collection_error(&mut self) {
        self.collection_error = None;
    }
}
