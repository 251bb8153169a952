//! Priority frontier of a search, with lazy deletion.
//!
//! Entries live in a slot arena and are ordered by a `BinaryHeap` of
//! lightweight references. Re-queuing a node does not search the heap for
//! its old entry: the old entry is marked invalid in place and thrown away
//! once it reaches the front.

use std::collections::BinaryHeap;

use crate::node::{NodeId, NodePool};

/// Generation-checked token for an open-set entry, held by the node that
/// the entry refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EntryHandle {
    slot: u32,
    generation: u32,
}

impl EntryHandle {
    #[cfg(test)]
    pub(crate) fn dangling() -> Self {
        Self {
            slot: u32::MAX,
            generation: u32::MAX,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    /// `None` once the entry has been invalidated or released.
    node: Option<NodeId>,
    f: i32,
    generation: u32,
}

/// Heap key. Ordered so that `BinaryHeap` (a max-heap) yields the smallest
/// `f` first, and the oldest insertion among equal `f`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct QueueRef {
    f: i32,
    seq: u64,
    slot: u32,
}

impl Ord for QueueRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of nodes keyed by `f = cost so far + heuristic`.
#[derive(Debug, Default)]
pub struct OpenSet {
    entries: Vec<Entry>,
    free: Vec<u32>,
    heap: BinaryHeap<QueueRef>,
    next_seq: u64,
    live: usize,
    discarded: usize,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no live entry remains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of stale entries swept since the last [`clear`](Self::clear).
    #[inline]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Queue `id` with its current cost and heuristic.
    ///
    /// If the node already has a live entry, that entry is invalidated and
    /// the node's handle moves to the new one. Callers must only re-queue a
    /// node with a strictly better cost.
    pub fn push(&mut self, pool: &mut NodePool, id: NodeId) {
        let node = pool.node(id);
        let f = node.tu_cost(false) + node.heuristic();
        if let Some(old) = node.open_entry {
            self.invalidate(old);
        }

        let handle = self.alloc(id, f);
        pool.node_mut(id).open_entry = Some(handle);
        self.heap.push(QueueRef {
            f,
            seq: self.next_seq,
            slot: handle.slot,
        });
        self.next_seq += 1;
        self.live += 1;
    }

    /// Remove and return the node with the smallest `f`.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty; check [`is_empty`](Self::is_empty) first.
    pub fn pop(&mut self, pool: &mut NodePool) -> NodeId {
        self.sweep();
        let Some(top) = self.heap.pop() else {
            panic!("pop from an empty open set");
        };
        let Some(id) = self.entries[top.slot as usize].node else {
            unreachable!("stale entry at the front after sweep");
        };
        self.release(top.slot);
        self.live -= 1;
        pool.node_mut(id).open_entry = None;
        self.sweep();
        id
    }

    /// Drop every entry and detach the nodes they referenced.
    pub fn clear(&mut self, pool: &mut NodePool) {
        self.heap.clear();
        self.free.clear();
        for (slot, e) in self.entries.iter_mut().enumerate() {
            if let Some(id) = e.node.take() {
                pool.node_mut(id).open_entry = None;
            }
            e.generation = e.generation.wrapping_add(1);
            self.free.push(slot as u32);
        }
        self.live = 0;
        self.discarded = 0;
    }

    fn alloc(&mut self, id: NodeId, f: i32) -> EntryHandle {
        match self.free.pop() {
            Some(slot) => {
                let e = &mut self.entries[slot as usize];
                e.node = Some(id);
                e.f = f;
                EntryHandle {
                    slot,
                    generation: e.generation,
                }
            }
            None => {
                let slot = self.entries.len() as u32;
                self.entries.push(Entry {
                    node: Some(id),
                    f,
                    generation: 0,
                });
                EntryHandle {
                    slot,
                    generation: 0,
                }
            }
        }
    }

    fn invalidate(&mut self, handle: EntryHandle) {
        let Some(e) = self.entries.get_mut(handle.slot as usize) else {
            return;
        };
        if e.generation == handle.generation && e.node.take().is_some() {
            self.live -= 1;
        }
    }

    /// Return a slot to the free list. Only called once its heap key is gone.
    fn release(&mut self, slot: u32) {
        let e = &mut self.entries[slot as usize];
        e.node = None;
        e.generation = e.generation.wrapping_add(1);
        self.free.push(slot);
    }

    /// Discard invalidated entries sitting at the front of the heap.
    fn sweep(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.entries[top.slot as usize].node.is_some() {
                break;
            }
            let slot = top.slot;
            self.heap.pop();
            self.release(slot);
            self.discarded += 1;
        }
    }

    /// Priority of the front entry, if any.
    pub fn peek_f(&self) -> Option<i32> {
        let top = self.heap.peek()?;
        let e = &self.entries[top.slot as usize];
        e.node.map(|_| e.f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlescape_core::{Bounds, Position};

    fn node_at(pool: &mut NodePool, x: i32, cost: i32) -> NodeId {
        let id = pool.get_or_create(Position::new(x, 0, 0)).unwrap();
        pool.node_mut(id).connect_without_target(cost, None, None);
        id
    }

    #[test]
    fn pops_in_priority_order() {
        let mut pool = NodePool::new(Bounds::new(8, 1, 1));
        let mut open = OpenSet::new();
        let a = node_at(&mut pool, 0, 7);
        let b = node_at(&mut pool, 1, 2);
        let c = node_at(&mut pool, 2, 5);
        for id in [a, b, c] {
            open.push(&mut pool, id);
        }
        assert_eq!(open.len(), 3);
        assert_eq!(open.peek_f(), Some(2));
        assert_eq!(open.pop(&mut pool), b);
        assert_eq!(open.pop(&mut pool), c);
        assert_eq!(open.pop(&mut pool), a);
        assert!(open.is_empty());
    }

    #[test]
    fn heuristic_counts_toward_priority() {
        let mut pool = NodePool::new(Bounds::new(8, 1, 1));
        let mut open = OpenSet::new();
        let target = Position::new(7, 0, 0);

        let near = pool.get_or_create(Position::new(6, 0, 0)).unwrap();
        pool.node_mut(near).connect(10, None, None, target); // f = 10 + 4
        let far = pool.get_or_create(Position::new(0, 0, 0)).unwrap();
        pool.node_mut(far).connect(0, None, None, target); // f = 0 + 28

        open.push(&mut pool, far);
        open.push(&mut pool, near);
        assert_eq!(open.pop(&mut pool), near);
        assert_eq!(open.pop(&mut pool), far);
    }

    #[test]
    fn equal_priorities_pop_in_insertion_order() {
        let mut pool = NodePool::new(Bounds::new(8, 1, 1));
        let mut open = OpenSet::new();
        let ids: Vec<NodeId> = (0..6).map(|x| node_at(&mut pool, x, 3)).collect();
        for &id in &ids {
            open.push(&mut pool, id);
        }
        let popped: Vec<NodeId> = (0..6).map(|_| open.pop(&mut pool)).collect();
        assert_eq!(popped, ids);
    }

    #[test]
    fn repeated_push_pops_once_with_best_cost() {
        let mut pool = NodePool::new(Bounds::new(4, 1, 1));
        let mut open = OpenSet::new();
        let id = pool.get_or_create(Position::ZERO).unwrap();
        for cost in (1..=10).rev() {
            pool.node_mut(id).connect_without_target(cost * 3, None, None);
            open.push(&mut pool, id);
            assert_eq!(open.len(), 1);
        }

        assert_eq!(open.peek_f(), Some(3));
        assert_eq!(open.pop(&mut pool), id);
        assert_eq!(pool.node(id).tu_cost(false), 3);
        assert!(!pool.node(id).in_open_set());
        assert!(open.is_empty());
        assert_eq!(open.peek_f(), None);
        // The nine superseded entries were swept, none survive.
        assert_eq!(open.discarded(), 9);
    }

    #[test]
    fn stale_entries_behind_live_ones_are_skipped() {
        let mut pool = NodePool::new(Bounds::new(4, 1, 1));
        let mut open = OpenSet::new();
        let a = node_at(&mut pool, 0, 5);
        let b = node_at(&mut pool, 1, 8);
        open.push(&mut pool, a);
        open.push(&mut pool, b);

        // b improves past a; its old entry (f = 8) is now stale.
        pool.node_mut(b).connect_without_target(1, None, None);
        open.push(&mut pool, b);

        assert_eq!(open.pop(&mut pool), b);
        assert_eq!(open.pop(&mut pool), a);
        assert!(open.is_empty());
        assert_eq!(open.discarded(), 1);
    }

    #[test]
    fn node_can_be_requeued_after_pop() {
        let mut pool = NodePool::new(Bounds::new(4, 1, 1));
        let mut open = OpenSet::new();
        let a = node_at(&mut pool, 0, 5);
        open.push(&mut pool, a);
        assert_eq!(open.pop(&mut pool), a);
        open.push(&mut pool, a);
        assert!(pool.node(a).in_open_set());
        assert_eq!(open.pop(&mut pool), a);
        assert!(open.is_empty());
    }

    #[test]
    fn clear_detaches_nodes_and_reuses_slots() {
        let mut pool = NodePool::new(Bounds::new(4, 1, 1));
        let mut open = OpenSet::new();
        let a = node_at(&mut pool, 0, 1);
        let b = node_at(&mut pool, 1, 2);
        open.push(&mut pool, a);
        open.push(&mut pool, b);

        open.clear(&mut pool);
        assert!(open.is_empty());
        assert!(!pool.node(a).in_open_set());
        assert!(!pool.node(b).in_open_set());

        open.push(&mut pool, b);
        assert_eq!(open.pop(&mut pool), b);
        assert!(open.is_empty());
    }

    #[test]
    fn fuzzed_improvements_pop_each_node_once_at_its_best() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut pool = NodePool::new(Bounds::new(16, 1, 1));
            let mut open = OpenSet::new();
            let mut best = vec![i32::MAX; 16];

            for _ in 0..200 {
                let x = rng.random_range(0..16);
                let cost = rng.random_range(0..1000);
                // Only strictly improving pushes are allowed.
                if cost >= best[x as usize] {
                    continue;
                }
                best[x as usize] = cost;
                let id = node_at(&mut pool, x, cost);
                open.push(&mut pool, id);
            }

            let queued = best.iter().filter(|&&c| c != i32::MAX).count();
            assert_eq!(open.len(), queued);

            let mut seen = vec![false; 16];
            let mut last = i32::MIN;
            while !open.is_empty() {
                let id = open.pop(&mut pool);
                let x = pool.node(id).position().x as usize;
                let cost = pool.node(id).tu_cost(false);
                assert!(!seen[x], "node popped twice");
                seen[x] = true;
                assert_eq!(cost, best[x]);
                assert!(cost >= last);
                last = cost;
            }
            assert_eq!(seen.iter().filter(|&&s| s).count(), queued);
        }
    }

    #[test]
    #[should_panic(expected = "empty open set")]
    fn pop_empty_panics() {
        let mut pool = NodePool::new(Bounds::new(1, 1, 1));
        let mut open = OpenSet::new();
        open.pop(&mut pool);
    }
}
