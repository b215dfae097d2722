//! Patron repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own every registered `Patron`, keyed by its seven-digit id.
//! - Provide add/remove/lookup/search APIs with deterministic ordering.
//!
//! # Invariants
//! - At most one patron per id; `add` never overwrites.
//! - List and search results are sorted ascending by id.
//! - Callers only receive clones; stored patrons are never exposed mutably.

use crate::model::patron::Patron;
use log::debug;
use std::collections::HashMap;

/// Repository interface for patron storage and queries.
pub trait PatronRepository {
    /// Inserts `patron` unless its id is already taken.
    ///
    /// Returns `false` without mutation on duplicate id.
    fn add(&mut self, patron: Patron) -> bool;
    /// Deletes the patron with `id`. Returns `false` when absent.
    fn remove(&mut self, id: &str) -> bool;
    /// Returns every patron sorted by id.
    fn list_all(&self) -> Vec<Patron>;
    /// Exact id lookup.
    fn find_by_id(&self, id: &str) -> Option<Patron>;
    /// Case-insensitive substring match on name, sorted by id.
    fn find_by_name(&self, query: &str) -> Vec<Patron>;
    /// Number of stored patrons.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local patron storage backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryPatronRepository {
    patrons: HashMap<String, Patron>,
}

impl InMemoryPatronRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatronRepository for InMemoryPatronRepository {
    fn add(&mut self, patron: Patron) -> bool {
        if self.patrons.contains_key(patron.id()) {
            debug!(
                "event=patron_add module=repo status=skip reason=duplicate_id id={}",
                patron.id()
            );
            return false;
        }

        debug!(
            "event=patron_add module=repo status=ok id={}",
            patron.id()
        );
        self.patrons.insert(patron.id().to_string(), patron);
        true
    }

    fn remove(&mut self, id: &str) -> bool {
        let removed = self.patrons.remove(id).is_some();
        debug!(
            "event=patron_remove module=repo status={} id={}",
            if removed { "ok" } else { "skip" },
            id
        );
        removed
    }

    fn list_all(&self) -> Vec<Patron> {
        sorted_by_id(self.patrons.values())
    }

    fn find_by_id(&self, id: &str) -> Option<Patron> {
        self.patrons.get(id).cloned()
    }

    fn find_by_name(&self, query: &str) -> Vec<Patron> {
        let needle = query.to_lowercase();
        sorted_by_id(
            self.patrons
                .values()
                .filter(|patron| patron.name().to_lowercase().contains(&needle)),
        )
    }

    fn len(&self) -> usize {
        self.patrons.len()
    }
}

fn sorted_by_id<'a>(patrons: impl Iterator<Item = &'a Patron>) -> Vec<Patron> {
    let mut items = patrons.cloned().collect::<Vec<_>>();
    // Fixed-width digit ids: lexicographic order equals numeric order.
    items.sort_by(|left, right| left.id().cmp(right.id()));
    items
}
