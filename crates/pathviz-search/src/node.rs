use pathviz_core::Point;

/// Dijkstra distance label of a node that has not been reached.
pub const INFINITE_DIST: f64 = f64::INFINITY;

/// Handle to a [`SearchNode`] in the engine's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A grid position together with its search bookkeeping.
///
/// Two nodes are equal when their positions are equal, whatever their
/// costs or predecessors; open and closed set membership relies on this.
#[derive(Debug, Clone, Copy)]
pub struct SearchNode {
    pub pos: Point,
    /// A* cost from the start.
    pub g: f64,
    /// A* estimate to the target.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Dijkstra label.
    pub dist: f64,
    /// Predecessor on the best known route, `None` for the start and for
    /// nodes not reached yet.
    pub prev: Option<NodeId>,
}

impl SearchNode {
    /// A node at `pos` with zero A* costs and an infinite Dijkstra label.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            dist: INFINITE_DIST,
            prev: None,
        }
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for SearchNode {}
