//! Per-node bounded slots in a single arena.
//!
//! Every node owns `capacity(node)` consecutive slots in one flat vector.
//! Nodes are addressed by index only, so a cascade can mutate any node's
//! slots without holding references into another node's storage.

use suitor_graph::NodeId;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct SlotArena<T> {
    /// `offsets[i]..offsets[i + 1]` are the slots of node `i`
    offsets: Vec<usize>,
    slots: Vec<Option<T>>,
}

impl<T: Copy + PartialEq> SlotArena<T> {
    pub(crate) fn new(capacities: &[usize]) -> Self {
        let mut offsets = Vec::with_capacity(capacities.len() + 1);
        let mut total = 0;
        offsets.push(0);
        for &b in capacities {
            total += b;
            offsets.push(total);
        }
        Self {
            offsets,
            slots: vec![None; total],
        }
    }

    /// Number of nodes.
    pub(crate) fn nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    pub(crate) fn capacity(&self, node: NodeId) -> usize {
        let i = node.index();
        self.offsets[i + 1] - self.offsets[i]
    }

    pub(crate) fn slots(&self, node: NodeId) -> &[Option<T>] {
        let i = node.index();
        &self.slots[self.offsets[i]..self.offsets[i + 1]]
    }

    pub(crate) fn slots_mut(&mut self, node: NodeId) -> &mut [Option<T>] {
        let i = node.index();
        &mut self.slots[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Occupied slots of `node`, in slot order.
    pub(crate) fn occupied(&self, node: NodeId) -> impl Iterator<Item = T> + '_ {
        self.slots(node).iter().flatten().copied()
    }

    pub(crate) fn contains(&self, node: NodeId, value: T) -> bool {
        self.slots(node).contains(&Some(value))
    }

    /// Put `value` into the first empty slot of `node`.
    /// Returns `false` if every slot is occupied.
    pub(crate) fn insert_first_free(&mut self, node: NodeId, value: T) -> bool {
        match self.slots_mut(node).iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// Clear the slot holding `value`. Returns `false` if it was not present.
    pub(crate) fn clear_value(&mut self, node: NodeId, value: T) -> bool {
        match self
            .slots_mut(node)
            .iter_mut()
            .find(|slot| **slot == Some(value))
        {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Remove the first value accepted by `matches` and close the gap,
    /// keeping occupied slots packed at the front in their existing order.
    pub(crate) fn remove_packed_where<F>(&mut self, node: NodeId, matches: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let slots = self.slots_mut(node);
        let i = slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&matches))?;
        let removed = slots[i];
        slots[i..].rotate_left(1);
        if let Some(last) = slots.last_mut() {
            *last = None;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId(i)
    }

    #[test]
    fn layout_follows_capacities() {
        let arena: SlotArena<u32> = SlotArena::new(&[2, 0, 3]);
        assert_eq!(arena.nodes(), 3);
        assert_eq!(arena.capacity(n(0)), 2);
        assert_eq!(arena.capacity(n(1)), 0);
        assert_eq!(arena.capacity(n(2)), 3);
        assert!(arena.slots(n(1)).is_empty());
    }

    #[test]
    fn nodes_do_not_share_slots() {
        let mut arena = SlotArena::new(&[1, 1]);
        assert!(arena.insert_first_free(n(0), 7u32));
        assert!(!arena.insert_first_free(n(0), 8));
        assert!(arena.insert_first_free(n(1), 9));

        assert_eq!(arena.slots(n(0)), &[Some(7)]);
        assert_eq!(arena.slots(n(1)), &[Some(9)]);
    }

    #[test]
    fn clear_leaves_hole() {
        let mut arena = SlotArena::new(&[3]);
        for v in [1u32, 2, 3] {
            arena.insert_first_free(n(0), v);
        }
        assert!(arena.clear_value(n(0), 2));
        assert!(!arena.clear_value(n(0), 2));
        assert_eq!(arena.slots(n(0)), &[Some(1), None, Some(3)]);

        // the hole is reused first
        arena.insert_first_free(n(0), 4);
        assert_eq!(arena.slots(n(0)), &[Some(1), Some(4), Some(3)]);
    }

    #[test]
    fn remove_packed_closes_gap() {
        let mut arena = SlotArena::new(&[3]);
        for v in [1u32, 2, 3] {
            arena.insert_first_free(n(0), v);
        }
        assert_eq!(arena.remove_packed_where(n(0), |v| *v == 1), Some(1));
        assert_eq!(arena.remove_packed_where(n(0), |v| *v == 1), None);
        assert_eq!(arena.slots(n(0)), &[Some(2), Some(3), None]);
        assert_eq!(arena.occupied(n(0)).collect::<Vec<_>>(), vec![2, 3]);
        assert!(arena.contains(n(0), 3));
        assert!(!arena.contains(n(0), 1));
    }
}
