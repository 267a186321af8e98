//! Read-later and favorites collections.
//!
//! Each collection holds full activity snapshots keyed by the activity id, in
//! the order they were first added. Nothing is persisted; a `SavedStore`
//! lives as long as the process that created it.

use std::fmt;

use serde_json::Value;

use crate::error::{FeedError, FeedResult};
use crate::event::id_from_value;

/// The two named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    ReadLater,
    Favorites,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::ReadLater, CollectionKind::Favorites];

    /// Path segment under `/api`.
    pub fn slug(self) -> &'static str {
        match self {
            CollectionKind::ReadLater => "read-later",
            CollectionKind::Favorites => "favorites",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::ReadLater => f.write_str("read later"),
            CollectionKind::Favorites => f.write_str("favorites"),
        }
    }
}

/// A saved activity snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItem {
    pub id: String,
    pub snapshot: Value,
}

impl SavedItem {
    /// Validate a client-supplied snapshot: it must be a JSON object with a
    /// non-empty string or numeric `id`.
    pub fn from_snapshot(snapshot: Value) -> FeedResult<Self> {
        let id = snapshot
            .as_object()
            .and_then(|fields| fields.get("id"))
            .and_then(id_from_value)
            .ok_or(FeedError::InvalidActivity)?;

        Ok(SavedItem { id, snapshot })
    }
}

/// One keyed collection of snapshots.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<SavedItem>,
}

impl Collection {
    /// Insert or replace. A snapshot with an id that is already present
    /// replaces the old one in place.
    pub fn insert(&mut self, item: SavedItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Remove by id. Returns whether something was removed; removing an
    /// unknown id is not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn snapshots(&self) -> Vec<Value> {
        self.items.iter().map(|item| item.snapshot.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Both collections together.
#[derive(Debug, Clone, Default)]
pub struct SavedStore {
    read_later: Collection,
    favorites: Collection,
}

impl SavedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, kind: CollectionKind) -> &Collection {
        match kind {
            CollectionKind::ReadLater => &self.read_later,
            CollectionKind::Favorites => &self.favorites,
        }
    }

    pub fn collection_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        match kind {
            CollectionKind::ReadLater => &mut self.read_later,
            CollectionKind::Favorites => &mut self.favorites,
        }
    }

    pub fn is_read_later(&self, id: &str) -> bool {
        self.read_later.contains(id)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }
}
