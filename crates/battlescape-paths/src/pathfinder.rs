use battlescape_core::{Bounds, Direction, MovementMode, Position};

use crate::config::PathfinderConfig;
use crate::error::{Endpoint, PathError};
use crate::node::{NodeId, NodePool, PathfindingNode};
use crate::open_set::OpenSet;
use crate::traits::TerrainCost;

/// A path query: one origin, one goal, one movement mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub origin: Position,
    pub goal: Position,
    pub mode: MovementMode,
    /// Discard partial paths costing more than this many time units.
    pub max_tu: Option<i32>,
}

impl PathRequest {
    pub fn new(origin: Position, goal: Position) -> Self {
        Self {
            origin,
            goal,
            mode: MovementMode::Walk,
            max_tu: None,
        }
    }

    pub fn mode(mut self, mode: MovementMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_tu(mut self, tu: i32) -> Self {
        self.max_tu = Some(tu);
        self
    }
}

/// A found path: the moves from origin to goal and what they cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    origin: Position,
    directions: Vec<Direction>,
    positions: Vec<Position>,
    total_tu: i32,
}

impl Path {
    #[inline]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Tile the path ends on (the origin for an empty path).
    pub fn destination(&self) -> Position {
        self.positions.last().copied().unwrap_or(self.origin)
    }

    /// Moves in walking order.
    #[inline]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Tile reached after each move, excluding the origin.
    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Total time units. Always 0 for missile traces.
    #[inline]
    pub fn total_tu(&self) -> i32 {
        self.total_tu
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Iterate over `(direction, tile reached)` pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        self.directions
            .iter()
            .copied()
            .zip(self.positions.iter().copied())
    }
}

/// A tile found by [`Pathfinder::reachable`] and its cheapest cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reachable {
    pub pos: Position,
    pub tu: i32,
}

/// Where a session is in its life cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Ready,
    Running,
    Success,
    Failure,
}

/// Counters for the most recent search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes finalized.
    pub expanded: usize,
    /// Open-set insertions, including re-queues.
    pub pushed: usize,
    /// Superseded open-set entries thrown away.
    pub discarded: usize,
    /// Distinct tiles the search touched.
    pub touched: usize,
}

/// A reusable search session over one map.
///
/// The node pool and open set are kept between calls and reset at the start
/// of each search, so repeated previews on the same map do not reallocate.
/// Each call searches toward exactly one goal.
#[derive(Debug)]
pub struct Pathfinder {
    pool: NodePool,
    open: OpenSet,
    config: PathfinderConfig,
    status: SearchStatus,
    stats: SearchStats,
    reachable: Vec<Reachable>,
}

impl Pathfinder {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_config(bounds, PathfinderConfig::default())
    }

    pub fn with_config(bounds: Bounds, config: PathfinderConfig) -> Self {
        Self {
            pool: NodePool::new(bounds),
            open: OpenSet::new(),
            config,
            status: SearchStatus::Ready,
            stats: SearchStats::default(),
            reachable: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.pool.bounds()
    }

    #[inline]
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut PathfinderConfig {
        &mut self.config
    }

    /// Outcome of the most recent search.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search state of the node at `pos` after the most recent search.
    pub fn node_at(&self, pos: Position) -> Option<&PathfindingNode> {
        self.pool.find(pos).map(|id| self.pool.node(id))
    }

    /// Final cost of `pos` in the most recent search, if it was settled.
    pub fn settled_cost(&self, pos: Position, missile: bool) -> Option<i32> {
        self.node_at(pos)
            .filter(|n| n.is_checked())
            .map(|n| n.tu_cost(missile))
    }

    /// Find the cheapest path for `req` using A*.
    ///
    /// Returns `Ok(None)` when the goal cannot be reached (walled off, over
    /// the TU budget, or over the expansion limit).
    pub fn find_path<T: TerrainCost>(
        &mut self,
        terrain: &T,
        req: &PathRequest,
    ) -> Result<Option<Path>, PathError> {
        let start = self.begin(req.origin)?;
        if !self.bounds().contains(req.goal) {
            self.status = SearchStatus::Failure;
            return Err(PathError::OutOfBounds {
                endpoint: Endpoint::Goal,
                pos: req.goal,
            });
        }
        log::debug!(
            "path search {} -> {} ({})",
            req.origin,
            req.goal,
            req.mode
        );

        self.pool
            .node_mut(start)
            .connect(0, None, None, req.goal);
        self.open.push(&mut self.pool, start);
        self.stats.pushed += 1;

        let missile = req.mode.is_missile();
        let found = self.search(terrain, req.mode, missile, req.max_tu, Some(req.goal));
        let path = found.map(|goal| self.trace_back(goal, req.origin, req.mode.is_missile()));
        self.finish(path.is_some());
        Ok(path)
    }

    /// Every tile reachable from `origin` within `max_tu`, with its cheapest
    /// cost, in the order the tiles were settled (cheapest first).
    ///
    /// Step costs always accumulate here, missiles included, so `max_tu`
    /// bounds how far a missile flies.
    pub fn reachable<T: TerrainCost>(
        &mut self,
        terrain: &T,
        origin: Position,
        mode: MovementMode,
        max_tu: i32,
    ) -> Result<&[Reachable], PathError> {
        let start = self.begin(origin)?;
        log::debug!("reachability from {origin} within {max_tu} TU ({mode})");

        self.pool
            .node_mut(start)
            .connect_without_target(0, None, None);
        self.open.push(&mut self.pool, start);
        self.stats.pushed += 1;

        self.search(terrain, mode, false, Some(max_tu), None);
        self.finish(!self.reachable.is_empty());
        Ok(&self.reachable)
    }

    fn begin(&mut self, origin: Position) -> Result<NodeId, PathError> {
        self.open.clear(&mut self.pool);
        self.pool.reset();
        self.reachable.clear();
        self.stats = SearchStats::default();
        self.status = SearchStatus::Running;
        self.pool.get_or_create(origin).ok_or_else(|| {
            self.status = SearchStatus::Failure;
            PathError::OutOfBounds {
                endpoint: Endpoint::Origin,
                pos: origin,
            }
        })
    }

    fn finish(&mut self, success: bool) {
        self.status = if success {
            SearchStatus::Success
        } else {
            SearchStatus::Failure
        };
        self.stats.discarded = self.open.discarded();
        self.stats.touched = self.pool.touched();
        log::debug!("search finished: {:?} {:?}", self.status, self.stats);
    }

    /// The main loop. With a goal, stops when the goal is settled and
    /// returns it; without one, settles everything in budget and records it
    /// in `self.reachable`. `missile` drops the running cost, see
    /// [`PathfindingNode::tu_cost`].
    fn search<T: TerrainCost>(
        &mut self,
        terrain: &T,
        mode: MovementMode,
        missile: bool,
        max_tu: Option<i32>,
        goal: Option<Position>,
    ) -> Option<NodeId> {
        while !self.open.is_empty() {
            if let Some(limit) = self.config.max_expansions {
                if self.stats.expanded >= limit {
                    log::debug!("expansion limit {limit} reached");
                    return None;
                }
            }

            let current = self.open.pop(&mut self.pool);
            let node = self.pool.node_mut(current);
            if node.is_checked() {
                continue;
            }
            node.set_checked();
            self.stats.expanded += 1;

            let pos = node.position();
            let cost = node.tu_cost(missile);
            if self.config.debug_trace {
                log::trace!(
                    "expand {pos} g={} h={} next f={:?}",
                    node.tu_cost(false),
                    node.heuristic(),
                    self.open.peek_f()
                );
            }

            match goal {
                Some(g) if g == pos => return Some(current),
                Some(_) => {}
                None => self.reachable.push(Reachable { pos, tu: cost }),
            }

            for &dir in mode.directions() {
                let Some(step) = terrain.step(pos, dir, mode) else {
                    continue;
                };
                let total = cost + step.tu;
                if max_tu.is_some_and(|limit| total > limit) {
                    continue;
                }
                let Some(next) = self.pool.get_or_create(step.destination) else {
                    continue;
                };

                let n = self.pool.node_mut(next);
                if n.is_checked() {
                    continue;
                }
                if n.in_open_set() && n.tu_cost(missile) <= total {
                    continue;
                }
                match goal {
                    Some(g) => n.connect(total, Some(current), Some(dir), g),
                    None => n.connect_without_target(total, Some(current), Some(dir)),
                }
                self.open.push(&mut self.pool, next);
                self.stats.pushed += 1;
            }
        }
        None
    }

    fn trace_back(&self, goal: NodeId, origin: Position, missile: bool) -> Path {
        let mut directions = Vec::new();
        let mut positions = Vec::new();
        let mut cur = self.pool.node(goal);
        while let (Some(prev), Some(dir)) = (cur.predecessor(), cur.predecessor_dir()) {
            directions.push(dir);
            positions.push(cur.position());
            cur = self.pool.node(prev);
        }
        directions.reverse();
        positions.reverse();
        Path {
            origin,
            directions,
            positions,
            total_tu: self.pool.node(goal).tu_cost(missile),
        }
    }
}
