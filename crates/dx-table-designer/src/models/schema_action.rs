//! Per-column action marks for a schema draft

use serde::Serialize;
use std::collections::BTreeMap;

/// What has happened to a column slot since the draft was initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaAction {
    /// Appended in this draft, not yet persisted
    Add,
    /// Existing column scheduled for removal
    Del,
    /// Existing column edited in place
    Update,
    /// Added and then discarded; contributes nothing
    None,
}

/// Marks keyed by column slot index. A missing entry means unchanged.
///
/// Slots are never removed from the draft, so an index keeps referring to
/// the same column for the whole life of the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaActionMap(BTreeMap<usize, SchemaAction>);

impl SchemaActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<SchemaAction> {
        self.0.get(&index).copied()
    }

    pub fn mark_add(&mut self, index: usize) {
        self.0.insert(index, SchemaAction::Add);
    }

    /// A column added in this draft vanishes; an existing one is dropped.
    /// Deleting a slot twice never resurrects it as a drop.
    pub fn mark_delete(&mut self, index: usize) {
        let next = match self.get(index) {
            Some(SchemaAction::Add) | Some(SchemaAction::None) => SchemaAction::None,
            Some(SchemaAction::Del) | Some(SchemaAction::Update) | None => SchemaAction::Del,
        };
        self.0.insert(index, next);
    }

    /// Added columns stay added; untouched ones become updated
    pub fn mark_update(&mut self, index: usize) {
        self.0.entry(index).or_insert(SchemaAction::Update);
    }

    /// Whether the slot still holds a column that will exist after saving
    pub fn is_live(&self, index: usize) -> bool {
        !matches!(
            self.get(index),
            Some(SchemaAction::Del) | Some(SchemaAction::None)
        )
    }

    /// Whether any mark would produce a request
    pub fn has_changes(&self) -> bool {
        self.0.values().any(|a| *a != SchemaAction::None)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, SchemaAction)> + '_ {
        self.0.iter().map(|(i, a)| (*i, *a))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(usize, SchemaAction)> for SchemaActionMap {
    fn from_iter<T: IntoIterator<Item = (usize, SchemaAction)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
