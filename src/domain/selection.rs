//! Per-view selection state for bulk actions.
//!
//! Selection is transient input: it is the one piece of state allowed to
//! change ahead of backend confirmation. Sealed documents may sit in a
//! selection (bulk download accepts them); destructive actions filter at
//! the point of use.

use std::collections::{BTreeSet, HashMap};

/// Where a selection lives. Each block's document table and the global
/// pending-document view keep independent sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Pending,
    Block(u64),
}

#[derive(Debug, Default)]
pub struct SelectionSet {
    sets: HashMap<Scope, BTreeSet<u64>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id` in the set at `scope`.
    pub fn toggle(&mut self, scope: Scope, id: u64) {
        let set = self.sets.entry(scope).or_default();
        if !set.remove(&id) {
            set.insert(id);
        }
    }

    pub fn select_all(&mut self, scope: Scope, ids: impl IntoIterator<Item = u64>) {
        self.sets.insert(scope, ids.into_iter().collect());
    }

    pub fn clear_all(&mut self, scope: Scope) {
        self.sets.remove(&scope);
    }

    pub fn is_selected(&self, scope: Scope, id: u64) -> bool {
        self.sets.get(&scope).is_some_and(|set| set.contains(&id))
    }

    /// Selected ids in ascending order.
    pub fn selected(&self, scope: Scope) -> Vec<u64> {
        self.sets
            .get(&scope)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, scope: Scope) -> usize {
        self.sets.get(&scope).map_or(0, BTreeSet::len)
    }

    /// Drop every scope. Called on a full refresh: a stale selection must
    /// not survive a reload of the lists it indexes into.
    pub fn reset(&mut self) {
        self.sets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_is_identity() {
        let mut sel = SelectionSet::new();
        sel.toggle(Scope::Pending, 7);
        assert!(sel.is_selected(Scope::Pending, 7));
        sel.toggle(Scope::Pending, 7);
        assert!(!sel.is_selected(Scope::Pending, 7));
        assert_eq!(sel.count(Scope::Pending), 0);
    }

    #[test]
    fn scopes_are_independent() {
        let mut sel = SelectionSet::new();
        sel.toggle(Scope::Pending, 1);
        sel.toggle(Scope::Block(3), 1);
        sel.clear_all(Scope::Pending);
        assert!(!sel.is_selected(Scope::Pending, 1));
        assert!(sel.is_selected(Scope::Block(3), 1));
    }

    #[test]
    fn select_all_replaces_previous_set() {
        let mut sel = SelectionSet::new();
        sel.toggle(Scope::Pending, 99);
        sel.select_all(Scope::Pending, [3, 1, 2]);
        assert_eq!(sel.selected(Scope::Pending), vec![1, 2, 3]);
        assert!(!sel.is_selected(Scope::Pending, 99));
    }

    #[test]
    fn reset_clears_every_scope() {
        let mut sel = SelectionSet::new();
        sel.toggle(Scope::Pending, 1);
        sel.toggle(Scope::Block(2), 5);
        sel.reset();
        assert_eq!(sel.count(Scope::Pending), 0);
        assert_eq!(sel.count(Scope::Block(2)), 0);
    }
}
