use battlescape_core::{Bounds, Direction, Position};

use crate::open_set::EntryHandle;

/// Scale between Euclidean tile distance and the heuristic, matching the
/// cheapest lateral step cost in time units.
pub const HEURISTIC_SCALE: f64 = 4.0;

/// Index of a node inside a [`NodePool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-tile search state.
///
/// The node never owns its predecessor or its open-set entry; both are
/// plain indices that are only meaningful inside the owning [`NodePool`]
/// and [`OpenSet`](crate::OpenSet).
#[derive(Clone, Debug)]
pub struct PathfindingNode {
    position: Position,
    checked: bool,
    tu_cost: i32,
    heuristic: i32,
    predecessor: Option<NodeId>,
    predecessor_dir: Option<Direction>,
    pub(crate) open_entry: Option<EntryHandle>,
}

impl PathfindingNode {
    /// Create an unlinked node for `position`.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            checked: false,
            tu_cost: 0,
            heuristic: 0,
            predecessor: None,
            predecessor_dir: None,
            open_entry: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Cost of the best known path to this node. Missile traces spend no
    /// time units, so they always see 0.
    #[inline]
    pub fn tu_cost(&self, missile: bool) -> i32 {
        if missile { 0 } else { self.tu_cost }
    }

    #[inline]
    pub fn heuristic(&self) -> i32 {
        self.heuristic
    }

    #[inline]
    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    /// Direction taken from the predecessor to reach this node.
    #[inline]
    pub fn predecessor_dir(&self) -> Option<Direction> {
        self.predecessor_dir
    }

    /// Whether the node has been finalized by the current search.
    #[inline]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    #[inline]
    pub fn set_checked(&mut self) {
        self.checked = true;
    }

    /// Whether the node currently has a live open-set entry.
    #[inline]
    pub fn in_open_set(&self) -> bool {
        self.open_entry.is_some()
    }

    /// Link this node into a path toward `target`.
    ///
    /// The heuristic is computed only when the node is not already queued:
    /// it depends on the fixed target and the node position, so a cheaper
    /// path found later only needs the new cost.
    pub fn connect(
        &mut self,
        cost: i32,
        predecessor: Option<NodeId>,
        direction: Option<Direction>,
        target: Position,
    ) {
        self.tu_cost = cost;
        self.predecessor = predecessor;
        self.predecessor_dir = direction;
        if !self.in_open_set() {
            self.heuristic = (HEURISTIC_SCALE * self.position.distance(target)) as i32;
        }
    }

    /// Link this node without a target, for exhaustive searches.
    pub fn connect_without_target(
        &mut self,
        cost: i32,
        predecessor: Option<NodeId>,
        direction: Option<Direction>,
    ) {
        self.tu_cost = cost;
        self.predecessor = predecessor;
        self.predecessor_dir = direction;
        self.heuristic = 0;
    }

    /// Prepare the node for an independent search.
    pub fn reset(&mut self) {
        self.checked = false;
        self.open_entry = None;
    }
}

/// Arena of [`PathfindingNode`]s covering one map.
///
/// Nodes are created the first time a search touches their tile and stay
/// allocated afterwards. [`reset`](Self::reset) only walks the nodes touched
/// since the previous reset.
#[derive(Debug)]
pub struct NodePool {
    bounds: Bounds,
    slots: Vec<Option<NodeId>>,
    nodes: Vec<PathfindingNode>,
    touched: Vec<NodeId>,
    touched_mark: Vec<bool>,
}

impl NodePool {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            slots: vec![None; bounds.len()],
            nodes: Vec::new(),
            touched: Vec::new(),
            touched_mark: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Node for `pos`, creating it on first use. `None` if out of bounds.
    pub fn get_or_create(&mut self, pos: Position) -> Option<NodeId> {
        let slot = self.bounds.index(pos)?;
        let id = match self.slots[slot] {
            Some(id) => id,
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(PathfindingNode::new(pos));
                self.touched_mark.push(false);
                self.slots[slot] = Some(id);
                id
            }
        };
        if !self.touched_mark[id.index()] {
            self.touched_mark[id.index()] = true;
            self.touched.push(id);
        }
        Some(id)
    }

    /// Existing node for `pos`, without creating one.
    pub fn find(&self, pos: Position) -> Option<NodeId> {
        self.slots[self.bounds.index(pos)?]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &PathfindingNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut PathfindingNode {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes allocated so far.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes touched since the last reset.
    #[inline]
    pub fn touched(&self) -> usize {
        self.touched.len()
    }

    /// Reset every node touched since the last reset.
    pub fn reset(&mut self) {
        for id in self.touched.drain(..) {
            self.nodes[id.index()].reset();
            self.touched_mark[id.index()] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tu_cost_ignores_terrain_for_missiles() {
        let mut n = PathfindingNode::new(Position::ZERO);
        n.connect(12, None, None, Position::ZERO);
        assert_eq!(n.tu_cost(false), 12);
        assert_eq!(n.tu_cost(true), 0);
    }

    #[test]
    fn connect_computes_scaled_distance() {
        let mut n = PathfindingNode::new(Position::ZERO);
        n.connect(0, None, None, Position::new(4, 4, 0));
        // floor(4 * sqrt(32)) = floor(22.627..)
        assert_eq!(n.heuristic(), 22);

        let mut m = PathfindingNode::new(Position::new(1, 2, 0));
        m.connect(0, None, None, Position::new(1, 2, 3));
        assert_eq!(m.heuristic(), 12);
    }

    #[test]
    fn connect_links_predecessor() {
        let mut n = PathfindingNode::new(Position::new(1, 0, 0));
        n.connect(4, Some(NodeId(7)), Some(Direction::East), Position::new(3, 0, 0));
        assert_eq!(n.predecessor(), Some(NodeId(7)));
        assert_eq!(n.predecessor_dir(), Some(Direction::East));
        assert_eq!(n.tu_cost(false), 4);
    }

    #[test]
    fn connect_keeps_heuristic_while_queued() {
        let mut n = PathfindingNode::new(Position::ZERO);
        n.connect(10, None, None, Position::new(3, 0, 0));
        assert_eq!(n.heuristic(), 12);
        n.open_entry = Some(EntryHandle::dangling());
        n.connect(6, None, None, Position::new(9, 0, 0));
        assert_eq!(n.heuristic(), 12);
        assert_eq!(n.tu_cost(false), 6);
    }

    #[test]
    fn connect_without_target_zeroes_heuristic() {
        let mut n = PathfindingNode::new(Position::ZERO);
        n.connect(0, None, None, Position::new(5, 5, 0));
        assert!(n.heuristic() > 0);
        n.open_entry = Some(EntryHandle::dangling());
        n.connect_without_target(3, None, None);
        assert_eq!(n.heuristic(), 0);
    }

    #[test]
    fn reset_clears_search_flags_only() {
        let pos = Position::new(2, 3, 1);
        let mut n = PathfindingNode::new(pos);
        n.set_checked();
        n.open_entry = Some(EntryHandle::dangling());
        assert!(n.is_checked());
        assert!(n.in_open_set());
        n.reset();
        assert!(!n.is_checked());
        assert!(!n.in_open_set());
        assert_eq!(n.position(), pos);
    }

    #[test]
    fn pool_creates_lazily() {
        let mut pool = NodePool::new(Bounds::new(4, 4, 2));
        assert_eq!(pool.allocated(), 0);
        let p = Position::new(1, 2, 1);
        assert_eq!(pool.find(p), None);
        let id = pool.get_or_create(p).unwrap();
        assert_eq!(pool.get_or_create(p), Some(id));
        assert_eq!(pool.find(p), Some(id));
        assert_eq!(pool.node(id).position(), p);
        assert_eq!(pool.allocated(), 1);
        assert_eq!(pool.get_or_create(Position::new(4, 0, 0)), None);
        assert_eq!(pool.find(Position::new(0, 0, 2)), None);
    }

    #[test]
    fn pool_reset_reuses_nodes() {
        let mut pool = NodePool::new(Bounds::new(3, 3, 1));
        let a = pool.get_or_create(Position::new(0, 0, 0)).unwrap();
        let b = pool.get_or_create(Position::new(1, 0, 0)).unwrap();
        pool.node_mut(a).set_checked();
        pool.node_mut(b).set_checked();
        assert_eq!(pool.touched(), 2);

        pool.reset();
        assert_eq!(pool.touched(), 0);
        assert!(!pool.node(a).is_checked());
        assert!(!pool.node(b).is_checked());

        assert_eq!(pool.get_or_create(Position::new(0, 0, 0)), Some(a));
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.touched(), 1);
    }
}
