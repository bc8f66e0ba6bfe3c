//! # Pool Store
//!
//! Holds every uploaded [`Entry`] in insertion order together with the set of ids
//! already drawn. The available view is never stored; [`PoolStore::available`]
//! recomputes it from the two on every call.
//!
//! ## Invariants
//!
//! - Entry ids are unique for the lifetime of the store.
//! - Every selected id refers to an entry still in the pool. Removal prunes the
//!   selection and [`PoolStore::mark_selected`] ignores unknown ids.

use crate::model::{Entry, EntryId, EntryUpload};
use std::collections::HashSet;
use tracing::{debug, trace};

type IdGenerator = Box<dyn Fn() -> EntryId + Send + Sync>;

/// Mints a UUID v4 string.
pub fn uuid_id() -> EntryId {
    EntryId::new(uuid::Uuid::new_v4().to_string())
}

pub struct PoolStore {
    entries: Vec<Entry>,
    selected: HashSet<EntryId>,
    next_id_fn: IdGenerator,
}

impl Default for PoolStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PoolStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolStore")
            .field("entries", &self.entries)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl PoolStore {
    /// Creates an empty store minting UUID v4 ids.
    pub fn new() -> Self {
        Self::with_id_generator(uuid_id)
    }

    /// Creates an empty store with a custom id generator.
    ///
    /// The generator must never return the same id twice.
    pub fn with_id_generator(next_id_fn: impl Fn() -> EntryId + Send + Sync + 'static) -> Self {
        Self {
            entries: Vec::new(),
            selected: HashSet::new(),
            next_id_fn: Box::new(next_id_fn),
        }
    }

    /// Appends one entry per upload, each with a freshly minted id.
    ///
    /// Uploads are not deduplicated by content.
    pub fn add(&mut self, uploads: impl IntoIterator<Item = EntryUpload>) -> Vec<Entry> {
        let created: Vec<Entry> = uploads
            .into_iter()
            .map(|upload| Entry::new((self.next_id_fn)(), upload.resource_ref))
            .collect();
        self.entries.extend(created.iter().cloned());
        debug!(added = created.len(), pool = self.entries.len(), "Entries added");
        created
    }

    /// Removes the entry and prunes it from the selection.
    ///
    /// Returns `false` when no entry has that id; removing twice is the same as
    /// removing once.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        self.selected.remove(id);
        let removed = self.entries.len() != before;
        debug!(%id, removed, pool = self.entries.len(), "Remove");
        removed
    }

    /// Clears the selection. The pool itself is untouched.
    pub fn reset(&mut self) {
        self.selected.clear();
        debug!(pool = self.entries.len(), "Selection cleared");
    }

    /// Pool entries not yet selected, in pool order.
    pub fn available(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| !self.selected.contains(&entry.id))
            .cloned()
            .collect()
    }

    pub fn available_len(&self) -> usize {
        self.entries.len() - self.selected.len()
    }

    /// Records drawn entries. Ids not present in the pool are ignored.
    pub fn mark_selected<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntryId>) {
        for id in ids {
            if self.entries.iter().any(|entry| &entry.id == id) {
                self.selected.insert(id.clone());
            } else {
                trace!(%id, "Ignoring selection of unknown entry");
            }
        }
    }

    pub fn is_selected(&self, id: &EntryId) -> bool {
        self.selected.contains(id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Selected entries, in pool order.
    pub fn selected(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| self.selected.contains(&entry.id))
            .cloned()
            .collect()
    }

    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
