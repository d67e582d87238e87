use std::fmt;
use std::str::FromStr;

use log::debug;
use pathviz_core::{CellState, Grid, Point};
use thiserror::Error;

use crate::error::SearchError;
use crate::node::{NodeId, SearchNode};
use crate::route::{Route, reconstruct};

/// Search strategy, chosen at [`SearchEngine::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AStar => f.write_str("A*"),
            Self::Dijkstra => f.write_str("Dijkstra"),
        }
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm \u{201c}{0}\u{201d}, expected astar or dijkstra")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Lifecycle of a search: `Idle → Running → {Found, NoSolution}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// Reset, nothing expanded yet.
    #[default]
    Idle,
    Running,
    Found,
    NoSolution,
}

impl SearchState {
    /// Whether the search has ended. Terminal states last until the next
    /// reset.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::NoSolution)
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Found => "found",
            Self::NoSolution => "without solution",
        };
        f.write_str(s)
    }
}

/// Outcome of a single [`SearchEngine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepResult {
    /// One node was expanded; call again.
    Continue,
    /// The target was taken off the frontier.
    Found,
    /// The frontier ran dry without reaching the target.
    NoSolution,
}

/// Frontier structure of the selected algorithm.
#[derive(Debug, Default)]
pub(crate) enum Frontier {
    /// No search configured.
    #[default]
    Unset,
    /// A*: open list, minimum `f` taken first.
    AStar { open: Vec<NodeId> },
    /// Dijkstra: the start's connected component, kept sorted by `dist`.
    Dijkstra { graph: Vec<NodeId> },
}

/// Incremental A*/Dijkstra search over an owned [`Grid`].
///
/// The engine owns the grid while a search is configured, which is what
/// keeps obstacles stable during a run: the driver either reads it through
/// [`grid`](Self::grid), or takes it back with [`into_grid`](Self::into_grid)
/// or [`grid_mut`](Self::grid_mut), the latter discarding the current run.
///
/// Besides the frontier and closed bookkeeping, the engine writes
/// [`CellState::Frontier`], [`CellState::Closed`] and [`CellState::Route`]
/// markers into the grid. The Robot and Target cells are never overwritten.
#[derive(Debug)]
pub struct SearchEngine {
    pub(crate) grid: Grid,
    pub(crate) start: Point,
    pub(crate) target: Point,
    pub(crate) algorithm: Algorithm,
    pub(crate) state: SearchState,
    /// Append-only arena; `prev` links index into it.
    pub(crate) nodes: Vec<SearchNode>,
    pub(crate) frontier: Frontier,
    pub(crate) closed: Vec<NodeId>,
    pub(crate) expanded: usize,
    /// Cells whose classification changed during the last call.
    pub(crate) touched: Vec<Point>,
    // shared scratch buffer for successor queries
    pub(crate) nbuf: Vec<Point>,
}

impl SearchEngine {
    /// Take ownership of `grid`. No search is configured until
    /// [`reset`](Self::reset) succeeds.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            start: Point::ZERO,
            target: Point::ZERO,
            algorithm: Algorithm::default(),
            state: SearchState::Idle,
            nodes: Vec::new(),
            frontier: Frontier::Unset,
            closed: Vec::new(),
            expanded: 0,
            touched: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Prepare a new search from `start` to `target` on the owned grid.
    ///
    /// Discards any in-progress or finished run, clears the search markers
    /// in the grid and moves the Robot/Target markers. On error nothing is
    /// configured and [`advance`](Self::advance) refuses to run.
    pub fn reset(
        &mut self,
        start: Point,
        target: Point,
        algorithm: Algorithm,
    ) -> Result<(), SearchError> {
        self.discard();
        self.validate(start, target)?;

        self.grid.clear_search_marks();
        self.grid.place_endpoints(start, target);
        self.start = start;
        self.target = target;
        self.algorithm = algorithm;

        self.frontier = match algorithm {
            Algorithm::AStar => {
                let id = self.alloc(SearchNode::new(start));
                Frontier::AStar { open: vec![id] }
            }
            Algorithm::Dijkstra => Frontier::Dijkstra {
                graph: self.connected_component(),
            },
        };
        debug!(
            "reset {} search from {} to {} ({} nodes seeded)",
            algorithm,
            start,
            target,
            self.nodes.len()
        );
        Ok(())
    }

    /// Replace the grid and [`reset`](Self::reset) on it.
    ///
    /// If validation fails the engine keeps the new grid, unconfigured.
    pub fn reset_with(
        &mut self,
        grid: Grid,
        start: Point,
        target: Point,
        algorithm: Algorithm,
    ) -> Result<(), SearchError> {
        self.grid = grid;
        self.reset(start, target, algorithm)
    }

    fn validate(&self, start: Point, target: Point) -> Result<(), SearchError> {
        for p in [start, target] {
            if !self.grid.contains(p) {
                return Err(SearchError::OutOfBoundsCoordinate(p));
            }
            if self.grid.is_obstacle(p) {
                return Err(SearchError::ObstructedEndpoint(p));
            }
        }
        if start == target {
            return Err(SearchError::CoincidentEndpoints(start));
        }
        Ok(())
    }

    /// Drop all run state.
    fn discard(&mut self) {
        self.state = SearchState::Idle;
        self.frontier = Frontier::Unset;
        self.nodes.clear();
        self.closed.clear();
        self.touched.clear();
        self.expanded = 0;
    }

    /// Expand exactly one node.
    ///
    /// The first call moves the engine from `Idle` to `Running`. An empty
    /// frontier ends the search with [`StepResult::NoSolution`]; taking the
    /// target off the frontier ends it with [`StepResult::Found`]. Calling
    /// again after either is an error until the next reset.
    pub fn advance(&mut self) -> Result<StepResult, SearchError> {
        if self.state.is_terminal() {
            return Err(SearchError::IllegalStateTransition {
                state: self.state,
                operation: "advance",
            });
        }
        self.touched.clear();

        let mut frontier = std::mem::take(&mut self.frontier);
        let result = match &mut frontier {
            Frontier::Unset => Err(SearchError::NotConfigured),
            Frontier::AStar { open } => Ok(self.expand_astar(open)),
            Frontier::Dijkstra { graph } => Ok(self.expand_dijkstra(graph)),
        };
        self.frontier = frontier;
        let result = result?;

        self.state = match result {
            StepResult::Continue => SearchState::Running,
            StepResult::Found => SearchState::Found,
            StepResult::NoSolution => SearchState::NoSolution,
        };
        if self.state.is_terminal() {
            debug!(
                "{} search {} after {} expansions",
                self.algorithm, self.state, self.expanded
            );
        }
        Ok(result)
    }

    /// Call [`advance`](Self::advance) until the search ends.
    pub fn run_to_end(&mut self) -> Result<StepResult, SearchError> {
        loop {
            match self.advance()? {
                StepResult::Continue => continue,
                done => return Ok(done),
            }
        }
    }

    /// Reconstruct the route of a finished search and mark its inner cells
    /// as [`CellState::Route`].
    pub fn plot_route(&mut self) -> Result<Route, SearchError> {
        if self.state != SearchState::Found {
            return Err(SearchError::IllegalStateTransition {
                state: self.state,
                operation: "plot a route",
            });
        }
        let route = reconstruct(&self.nodes, &self.closed, self.start, self.target)?;
        self.touched.clear();
        for &p in &route.cells {
            self.mark(p, CellState::Route);
        }
        Ok(route)
    }

    /// Status line for a plotted route, including the expansion count.
    pub fn summary(&self, route: &Route) -> String {
        format!("Nodes expanded: {}, {}", self.expanded, route)
    }

    /// Write a search marker into the grid, leaving endpoints untouched.
    pub(crate) fn mark(&mut self, p: Point, state: CellState) {
        match self.grid.at(p) {
            Some(old) if !old.is_endpoint() && old != state => {
                self.grid.set(p, state);
                self.touched.push(p);
            }
            _ => {}
        }
    }

    pub(crate) fn alloc(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The grid, including the search markers written so far.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid for editing obstacles.
    ///
    /// Any configured search is discarded; call [`reset`](Self::reset)
    /// afterwards.
    pub fn grid_mut(&mut self) -> &mut Grid {
        self.discard();
        &mut self.grid
    }

    /// Give the grid back to the driver.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Classification of the cell at `p`, or `None` if out of bounds.
    pub fn cell(&self, p: Point) -> Option<CellState> {
        self.grid.at(p)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Whether a search is configured.
    pub fn is_configured(&self) -> bool {
        !matches!(self.frontier, Frontier::Unset)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Number of nodes expanded, not counting the final pop of the target.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Positions currently waiting on the frontier.
    ///
    /// For Dijkstra these are the component members already relaxed but not
    /// yet settled.
    pub fn frontier(&self) -> Vec<Point> {
        match &self.frontier {
            Frontier::Unset => Vec::new(),
            Frontier::AStar { open } => open.iter().map(|id| self.nodes[id.0].pos).collect(),
            Frontier::Dijkstra { graph } => graph
                .iter()
                .map(|id| &self.nodes[id.0])
                .filter(|n| n.prev.is_some())
                .map(|n| n.pos)
                .collect(),
        }
    }

    /// Positions in the closed set, in the order they were closed.
    pub fn closed(&self) -> Vec<Point> {
        self.closed.iter().map(|id| self.nodes[id.0].pos).collect()
    }

    /// Handles of the closed set, in the order they were closed.
    pub fn closed_ids(&self) -> &[NodeId] {
        &self.closed
    }

    /// Look up a node of the current run.
    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Cells whose classification changed in the last `advance` or
    /// `plot_route` call.
    pub fn touched(&self) -> &[Point] {
        &self.touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(text: &str) -> SearchEngine {
        SearchEngine::new(text.parse().unwrap())
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("astar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("Dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert!("bfs".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Dijkstra.to_string(), "Dijkstra");
    }

    #[test]
    fn advance_before_reset_is_rejected() {
        let mut e = engine("...\n...");
        assert_eq!(e.advance(), Err(SearchError::NotConfigured));
        assert!(!e.is_configured());
    }

    #[test]
    fn reset_validates_endpoints() {
        let mut e = engine("..#\n...");
        let a = Algorithm::AStar;
        assert_eq!(
            e.reset(Point::new(3, 0), Point::new(0, 0), a),
            Err(SearchError::OutOfBoundsCoordinate(Point::new(3, 0)))
        );
        assert_eq!(
            e.reset(Point::new(0, 0), Point::new(2, 0), a),
            Err(SearchError::ObstructedEndpoint(Point::new(2, 0)))
        );
        assert_eq!(
            e.reset(Point::new(1, 1), Point::new(1, 1), a),
            Err(SearchError::CoincidentEndpoints(Point::new(1, 1)))
        );
        assert!(!e.is_configured());
        assert!(e.reset(Point::new(0, 0), Point::new(2, 1), a).is_ok());
        assert!(e.is_configured());
    }

    #[test]
    fn reset_places_endpoints_and_clears_marks() {
        let mut e = engine("S.x\no*.\n..T");
        e.reset(Point::new(0, 2), Point::new(2, 0), Algorithm::AStar)
            .unwrap();
        assert_eq!(e.grid().to_string(), "..T\n...\nS..");
        assert_eq!(e.state(), SearchState::Idle);
    }

    #[test]
    fn state_machine_runs_to_terminal() {
        let mut e = engine("....\n....");
        e.reset(Point::new(0, 0), Point::new(3, 1), Algorithm::AStar)
            .unwrap();
        assert_eq!(e.advance().unwrap(), StepResult::Continue);
        assert_eq!(e.state(), SearchState::Running);
        assert_eq!(e.run_to_end().unwrap(), StepResult::Found);
        assert_eq!(e.state(), SearchState::Found);
        assert_eq!(
            e.advance(),
            Err(SearchError::IllegalStateTransition {
                state: SearchState::Found,
                operation: "advance"
            })
        );
        e.reset(Point::new(0, 0), Point::new(3, 1), Algorithm::AStar)
            .unwrap();
        assert_eq!(e.state(), SearchState::Idle);
        assert_eq!(e.expanded(), 0);
    }

    #[test]
    fn plot_route_requires_found() {
        let mut e = engine("...\n...");
        e.reset(Point::new(0, 0), Point::new(2, 1), Algorithm::Dijkstra)
            .unwrap();
        assert!(matches!(
            e.plot_route(),
            Err(SearchError::IllegalStateTransition {
                state: SearchState::Idle,
                ..
            })
        ));
    }

    #[test]
    fn endpoints_survive_marking() {
        let mut e = engine(".....\n.....\n.....");
        e.reset(Point::new(0, 1), Point::new(4, 1), Algorithm::AStar)
            .unwrap();
        e.run_to_end().unwrap();
        e.plot_route().unwrap();
        assert_eq!(e.cell(Point::new(0, 1)), Some(CellState::Robot));
        assert_eq!(e.cell(Point::new(4, 1)), Some(CellState::Target));
        assert_eq!(e.grid().count(CellState::Robot), 1);
        assert_eq!(e.grid().count(CellState::Target), 1);
        assert_eq!(e.grid().count(CellState::Route), 3);
    }

    #[test]
    fn touched_reports_changed_cells() {
        let mut e = engine("...\n...\n...");
        e.reset(Point::new(1, 1), Point::new(2, 2), Algorithm::AStar)
            .unwrap();
        e.advance().unwrap();
        // Neither endpoint is repainted: seven of the eight successors.
        assert_eq!(e.touched().len(), 7);
        for &p in e.touched() {
            assert_eq!(e.cell(p), Some(CellState::Frontier), "{p}");
        }
        assert_eq!(e.frontier().len(), 8);
    }

    #[test]
    fn grid_mut_discards_run() {
        let mut e = engine("...\n...");
        e.reset(Point::new(0, 0), Point::new(2, 1), Algorithm::AStar)
            .unwrap();
        e.advance().unwrap();
        e.grid_mut().set_obstacle(Point::new(1, 0), true);
        assert!(!e.is_configured());
        assert_eq!(e.advance(), Err(SearchError::NotConfigured));
    }

    #[test]
    fn summary_line() {
        let mut e = engine("....");
        e.reset(Point::new(0, 0), Point::new(3, 0), Algorithm::AStar)
            .unwrap();
        e.run_to_end().unwrap();
        let route = e.plot_route().unwrap();
        assert_eq!(
            e.summary(&route),
            "Nodes expanded: 3, Steps: 3, Distance: 3.000"
        );
    }
}
