use crate::graph::NodeId;
use std::collections::BTreeSet;

/// Selected nodes, kept in id order.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: BTreeSet<NodeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on a node.
    ///
    /// A plain click makes `id` the only selected node; with `shift_held` it
    /// toggles `id` in or out of the selection.
    pub fn handle_interaction(&mut self, id: NodeId, shift_held: bool) {
        if shift_held {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        } else {
            if self.selected.len() == 1 && self.selected.contains(&id) {
                return;
            }
            self.selected.clear();
            self.selected.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the current selection with a new set of ids
    pub fn replace_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected.clear();
        self.selected.extend(ids);
    }

    /// Drop `id` from the selection (e.g. after it was deleted)
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.selected.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
